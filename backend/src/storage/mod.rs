//! # Storage Module
//!
//! Local persistence for the todo client.
//!
//! ## Layout
//!
//! ```text
//! {data_dir}/
//! ├── todos.db        ← TodoRepository (SQLite, table `TodoEntity`)
//! └── settings.yaml   ← SettingsRepository
//! ```

pub mod connection;
pub mod error;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use error::StoreError;
pub use repositories::{SettingsRepository, TodoRepository};
pub use traits::{LaunchSettings, TodoStorage};
