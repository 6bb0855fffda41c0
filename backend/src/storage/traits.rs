//! # Storage Traits
//!
//! Storage abstractions consumed by the domain layer. The domain never talks
//! to SQLite or the settings file directly, so tests can substitute fakes.

use anyhow::Result;
use async_trait::async_trait;

use super::error::StoreError;
use crate::domain::models::todo::Todo;

/// The local todo store.
///
/// Implementations run operations one at a time in submission order, and a
/// failed mutation leaves the store in its prior committed state.
#[async_trait]
pub trait TodoStorage: Send + Sync {
    /// Append each record as a new row, all or nothing.
    /// Records whose ID already exists are skipped.
    async fn insert_many(&self, todos: &[Todo]) -> Result<(), StoreError>;

    /// All records, newest first
    async fn fetch_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// Flip `completed` and return the updated record
    async fn toggle_completed(&self, id: i64) -> Result<Todo, StoreError>;

    /// Remove a record and return it as it was before deletion
    async fn delete(&self, id: i64) -> Result<Todo, StoreError>;

    /// Create a record with a freshly generated unique ID
    async fn insert_one(&self, title: Option<String>, body: Option<String>) -> Result<Todo, StoreError>;

    /// Overwrite title and body; `completed` and the creation date are kept
    async fn edit_title_and_body(
        &self,
        id: i64,
        title: Option<String>,
        body: Option<String>,
    ) -> Result<Todo, StoreError>;

    /// Records whose title or body contains `text`.
    /// Blank input yields an empty list without querying.
    async fn search(&self, text: &str) -> Result<Vec<Todo>, StoreError>;
}

/// Process-wide launch settings
#[async_trait]
pub trait LaunchSettings: Send + Sync {
    /// True until a remote sync has been confirmed for this installation
    async fn is_first_launch(&self) -> bool;

    /// Persist the first-launch state
    async fn set_first_launch(&self, first_launch: bool) -> Result<()>;
}
