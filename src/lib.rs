pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::csv_import::{CsvImportUseCase, ImportSummary};
pub use application::use_cases::dashboard::DashboardUseCase;
pub use domain::error::{AppError, Result};
pub use infrastructure::bootstrap::{bootstrap, init_logging, AppContext};
pub use infrastructure::config::AppConfig;
