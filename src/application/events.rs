// ============================================================
// DASHBOARD EVENTS
// ============================================================
// Change notifications for whatever view is displaying the data

use crate::infrastructure::db::ImportCounts;
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Issue,
    Todo,
    Scorecard,
    Vto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DashboardEvent {
    /// A CSV upload finished and its rows were stored.
    ImportCompleted {
        import_id: String,
        counts: ImportCounts,
    },
    /// A single entity changed through the CRUD surface.
    EntityChanged {
        entity: EntityKind,
        id: i64,
        change: ChangeKind,
    },
}

/// Broadcast fan-out to subscribed views. Cloning shares the channel.
#[derive(Clone)]
pub struct DashboardEvents {
    sender: broadcast::Sender<DashboardEvent>,
}

impl DashboardEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// Best effort: no live subscriber is not an error.
    pub fn emit(&self, event: DashboardEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for DashboardEvents {
    fn default() -> Self {
        Self::new()
    }
}
