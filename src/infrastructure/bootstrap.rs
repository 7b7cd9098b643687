use std::sync::Arc;

use tracing::error;

use crate::application::events::DashboardEvents;
use crate::application::use_cases::csv_import::CsvImportUseCase;
use crate::application::use_cases::dashboard::DashboardUseCase;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::{
    connect_pool, init_dashboard_db, DashboardStore, SqliteDashboardStore,
};
use crate::infrastructure::snapshot::SnapshotStore;
use crate::infrastructure::storage::ensure_data_dir;

/// Everything a front end needs, wired.
pub struct AppContext {
    pub csv_import: CsvImportUseCase,
    pub dashboard: DashboardUseCase,
    pub store: Arc<dyn DashboardStore>,
    pub events: DashboardEvents,
}

pub fn init_logging(filter: &str) {
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn bootstrap(config: &AppConfig) -> Result<AppContext> {
    ensure_data_dir(&config.data_dir).map_err(|err| {
        error!(
            error = %err,
            data_dir = %config.data_dir.display(),
            "Failed to create data dir"
        );
        AppError::IoError(format!("Failed to create data dir: {}", err))
    })?;

    let pool = connect_pool(&config.database_path()).await?;
    init_dashboard_db(&pool).await?;

    let store: Arc<dyn DashboardStore> = Arc::new(SqliteDashboardStore::new(pool));
    let snapshot = Arc::new(SnapshotStore::new(config.snapshot_path()));
    let events = DashboardEvents::new();

    let csv_import = CsvImportUseCase::new(store.clone(), snapshot.clone(), events.clone());
    let dashboard = DashboardUseCase::new(store.clone(), snapshot, events.clone());

    Ok(AppContext {
        csv_import,
        dashboard,
        store,
        events,
    })
}
