use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::AppError;
use crate::domain::models::todo::Todo;
use crate::domain::sync_service::TodoSyncService;
use crate::storage::traits::TodoStorage;

/// Entry point for presentation clients.
///
/// Loading goes through the sync service; every other operation goes
/// straight to the local store. Failures come back as [`AppError`].
#[derive(Clone)]
pub struct TodoService {
    storage: Arc<dyn TodoStorage>,
    sync_service: TodoSyncService,
}

impl TodoService {
    pub fn new(storage: Arc<dyn TodoStorage>, sync_service: TodoSyncService) -> Self {
        Self { storage, sync_service }
    }

    /// Load the todo list, newest first
    pub async fn load_list(&self) -> Result<Vec<Todo>, AppError> {
        info!("Loading todo list");

        let todos = self.sync_service.load_list().await.map_err(|e| {
            warn!("Failed to load todo list: {}", e);
            AppError::from(e)
        })?;

        info!("Loaded {} todos", todos.len());
        Ok(todos)
    }

    pub async fn toggle_complete(&self, id: i64) -> Result<Todo, AppError> {
        info!("Toggling todo {}", id);

        let todo = self.storage.toggle_completed(id).await.map_err(|e| {
            warn!("Failed to toggle todo {}: {}", id, e);
            AppError::from(e)
        })?;

        info!("Todo {} is now completed={}", id, todo.completed);
        Ok(todo)
    }

    /// Delete a todo, returning it as it was before deletion
    pub async fn delete(&self, id: i64) -> Result<Todo, AppError> {
        info!("Deleting todo {}", id);

        let todo = self.storage.delete(id).await.map_err(|e| {
            warn!("Failed to delete todo {}: {}", id, e);
            AppError::from(e)
        })?;

        info!("Deleted todo {}", id);
        Ok(todo)
    }

    pub async fn add(&self, title: Option<String>, body: Option<String>) -> Result<Todo, AppError> {
        info!("Adding todo");

        let todo = self.storage.insert_one(title, body).await.map_err(|e| {
            warn!("Failed to add todo: {}", e);
            AppError::from(e)
        })?;

        info!("Added todo {}", todo.id);
        Ok(todo)
    }

    pub async fn edit(&self, id: i64, title: Option<String>, body: Option<String>) -> Result<Todo, AppError> {
        info!("Editing todo {}", id);

        let todo = self.storage.edit_title_and_body(id, title, body).await.map_err(|e| {
            warn!("Failed to edit todo {}: {}", id, e);
            AppError::from(e)
        })?;

        info!("Edited todo {}", id);
        Ok(todo)
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Todo>, AppError> {
        info!("Searching todos for '{}'", text);

        let todos = self.storage.search(text).await.map_err(|e| {
            warn!("Search for '{}' failed: {}", text, e);
            AppError::from(e)
        })?;

        info!("Search for '{}' found {} todos", text, todos.len());
        Ok(todos)
    }
}
