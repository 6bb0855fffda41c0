use thiserror::Error;

use crate::domain::errors::ErrorAlert;

/// Failures reported by the local todo store.
///
/// Every mutating failure is reported only after the in-flight transaction
/// has been rolled back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Todo with ID {0} not found")]
    NotFound(i64),

    #[error("Failed to load todos: {0}")]
    FetchFailed(String),

    #[error("Failed to save todos: {0}")]
    SaveFailed(String),

    #[error("Failed to update todo: {0}")]
    UpdateFailed(String),

    #[error("Failed to delete todo: {0}")]
    DeleteFailed(String),

    #[error("Failed to add todo: {0}")]
    AddFailed(String),

    /// The underlying cause is intentionally not carried
    #[error("Failed to search todos")]
    SearchFailed,

    #[error("No free todo ID found after {attempts} attempts")]
    IdsExhausted { attempts: u32 },
}

impl ErrorAlert for StoreError {
    fn alert_title(&self) -> String {
        "Database Error".to_string()
    }

    fn alert_message(&self) -> String {
        self.to_string()
    }
}
