//! # Todo Sync Service
//!
//! Decides where the todo list comes from. The remote list is pulled into the
//! local store once per installation, on the first load that happens while
//! the network is reachable. Every other load reads the local store.
//!
//! Remote failures never fail a load: the local list is returned instead, and
//! the first-launch flag stays set so the next load tries again.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::todo::Todo;
use crate::network::api_client::TodoSource;
use crate::network::monitor::NetworkMonitor;
use crate::storage::error::StoreError;
use crate::storage::traits::{LaunchSettings, TodoStorage};

#[derive(Clone)]
pub struct TodoSyncService {
    storage: Arc<dyn TodoStorage>,
    source: Arc<dyn TodoSource>,
    monitor: Arc<dyn NetworkMonitor>,
    settings: Arc<dyn LaunchSettings>,
}

impl TodoSyncService {
    pub fn new(
        storage: Arc<dyn TodoStorage>,
        source: Arc<dyn TodoSource>,
        monitor: Arc<dyn NetworkMonitor>,
        settings: Arc<dyn LaunchSettings>,
    ) -> Self {
        Self {
            storage,
            source,
            monitor,
            settings,
        }
    }

    /// Load the todo list, syncing from the remote source on first launch.
    ///
    /// After a successful sync the list is re-read from the local store, so
    /// the caller always receives persisted records.
    pub async fn load_list(&self) -> Result<Vec<Todo>, StoreError> {
        if self.monitor.has_internet_connection() && self.settings.is_first_launch().await {
            info!("First launch with connectivity, syncing remote todos");
            if self.sync_remote().await {
                return self.storage.fetch_all().await;
            }
        }

        self.storage.fetch_all().await
    }

    /// Fetch and persist the remote list. Returns whether the sync completed.
    async fn sync_remote(&self) -> bool {
        let page = match self.source.fetch_todo_list().await {
            Ok(page) => page,
            Err(e) => {
                warn!("Remote sync failed, falling back to local todos: {}", e);
                return false;
            }
        };

        let fetched_at = Utc::now();
        let todos: Vec<Todo> = page
            .todos
            .into_iter()
            .map(|remote| Todo::from_remote(remote, fetched_at))
            .collect();

        if let Err(e) = self.storage.insert_many(&todos).await {
            warn!("Failed to persist {} remote todos, falling back to local todos: {}", todos.len(), e);
            return false;
        }

        if let Err(e) = self.settings.set_first_launch(false).await {
            warn!("Failed to record completed sync: {:#}", e);
        }

        info!("Synced {} remote todos", todos.len());
        true
    }
}
