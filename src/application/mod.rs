pub mod events;
pub mod use_cases;

pub use use_cases::csv_import::{CsvImportUseCase, ImportSummary};
pub use use_cases::dashboard::DashboardUseCase;
