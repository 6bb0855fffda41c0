//! # Todo Backend
//!
//! Data-access and sync layer of the todo client: a SQLite local store, a
//! remote todo source with reachability monitoring, first-launch
//! reconciliation between the two, and a REST API over the todo service.

pub mod config;
pub mod domain;
pub mod io;
pub mod network;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{TodoService, TodoSyncService};
use crate::network::{ApiClient, NetworkMonitor, ReachabilityMonitor};
use crate::storage::{DbConnection, LaunchSettings, SettingsRepository, TodoRepository, TodoStorage};

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub todo_service: TodoService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::open(&config.data_dir).await?;
    let storage: Arc<dyn TodoStorage> = Arc::new(TodoRepository::new(db_conn));
    let settings: Arc<dyn LaunchSettings> = Arc::new(SettingsRepository::new(&config.data_dir));

    info!("Setting up network");
    let monitor: Arc<dyn NetworkMonitor> =
        ReachabilityMonitor::for_base_url(&config.api_base_url, config.reachability_interval).await?;
    let source = Arc::new(ApiClient::new(
        config.api_base_url.clone(),
        config.http_timeout,
        monitor.clone(),
    )?);

    info!("Setting up domain model");
    let sync_service = TodoSyncService::new(storage.clone(), source, monitor, settings);
    let todo_service = TodoService::new(storage, sync_service);

    Ok(AppState { todo_service })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:8080"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/todos", get(io::list_todos).post(io::create_todo))
        .route("/todos/search", get(io::search_todos))
        .route("/todos/:id", delete(io::delete_todo).put(io::edit_todo))
        .route("/todos/:id/toggle", post(io::toggle_todo));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
