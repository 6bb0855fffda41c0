//! # Domain Module
//!
//! Business logic of the todo client.
//!
//! - **todo_service**: the facade presentation clients talk to
//! - **sync_service**: first-launch reconciliation between remote and local data
//! - **errors**: the unified error taxonomy
//! - **models**: domain entities

pub mod errors;
pub mod models;
pub mod sync_service;
pub mod todo_service;

pub use errors::{AppError, ErrorAlert};
pub use sync_service::TodoSyncService;
pub use todo_service::TodoService;
