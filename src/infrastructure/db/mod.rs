// ============================================================
// DASHBOARD DATABASE LAYER
// ============================================================
// Connection bootstrap, per-entity repositories, and the store trait

mod connection;
mod issues;
mod scorecard;
mod store;
mod todos;
mod vto;

pub use connection::{connect_pool, init_dashboard_db};
pub use issues::IssueRepository;
pub use scorecard::ScorecardRepository;
pub use store::{DashboardStore, ImportCounts, SqliteDashboardStore};
pub use todos::TodoRepository;
pub use vto::VtoRepository;
