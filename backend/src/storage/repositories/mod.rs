//! # Repositories
//!
//! Concrete storage backends: SQLite for todos, a YAML file for launch settings.

pub mod settings_repository;
pub mod todo_repository;

pub use settings_repository::{AppSettings, SettingsRepository};
pub use todo_repository::TodoRepository;
