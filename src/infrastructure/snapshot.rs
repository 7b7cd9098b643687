use crate::domain::entities::DashboardState;
use crate::domain::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Dashboard state as last assembled, with its generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub state: DashboardState,
}

/// Read-through cache of the dashboard state under a fixed file name.
/// The database is the single source of truth; the snapshot only saves
/// reassembly on unchanged data and must be invalidated on every write.
pub struct SnapshotStore {
    path: PathBuf,
    cached: Mutex<Option<DashboardSnapshot>>,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: Mutex::new(None),
        }
    }

    /// Memory first, then disk. A missing or unreadable file is a miss.
    pub fn load(&self) -> Option<DashboardSnapshot> {
        if let Some(snapshot) = self.cached.lock().unwrap().clone() {
            return Some(snapshot);
        }

        let content = fs::read_to_string(&self.path).ok()?;
        let snapshot: DashboardSnapshot = serde_json::from_str(&content).ok()?;
        *self.cached.lock().unwrap() = Some(snapshot.clone());
        Some(snapshot)
    }

    pub fn save(&self, snapshot: &DashboardSnapshot) -> Result<()> {
        let serialized = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AppError::Internal(format!("Failed to serialize snapshot: {}", e)))?;
        fs::write(&self.path, serialized)
            .map_err(|e| AppError::IoError(format!("Failed to write snapshot: {}", e)))?;

        *self.cached.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    /// Drop the cached copy and remove the file.
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap() = None;
        let _ = fs::remove_file(&self.path);
    }
}
