use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration, merged from defaults, an optional
/// `opsboard.toml`, and `OPSBOARD_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the database and snapshot files.
    pub data_dir: PathBuf,
    pub database_file: String,
    pub snapshot_file: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            database_file: "opsboard.db".to_string(),
            snapshot_file: "dashboard_snapshot.json".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("opsboard.toml"))
            .merge(Env::prefixed("OPSBOARD_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}
