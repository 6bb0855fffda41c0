//! # REST API for Todos
//!
//! Endpoints for loading, creating, editing, toggling, deleting and
//! searching todos.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::domain::errors::AppError;
use crate::io::rest::mappers::TodoMapper;
use crate::network::error::NetworkError;
use crate::storage::error::StoreError;
use crate::AppState;
use shared::{CreateTodoRequest, EditTodoRequest, ErrorResponse, SearchTodosQuery};

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Network(_) => StatusCode::BAD_GATEWAY,
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
    }
}

fn error_response(error: AppError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        warn!("Request rejected: {}", error);
    }

    let body = ErrorResponse {
        title: error.title(),
        message: error.message(),
    };
    (status, Json(body)).into_response()
}

fn invalid_path(rejection: PathRejection) -> Response {
    error_response(AppError::Validation(rejection.body_text()))
}

fn invalid_body(rejection: JsonRejection) -> Response {
    error_response(AppError::Validation(rejection.body_text()))
}

/// List all todos, syncing from the remote source on first launch
pub async fn list_todos(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/todos");

    match state.todo_service.load_list().await {
        Ok(todos) => (StatusCode::OK, Json(TodoMapper::to_dto_list(todos))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a todo
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(rejection),
    };
    info!("POST /api/todos - request: {:?}", request);

    match state.todo_service.add(request.title, request.body).await {
        Ok(todo) => (StatusCode::CREATED, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Replace a todo's title and body
pub async fn edit_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EditTodoRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return invalid_path(rejection),
    };
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(rejection),
    };
    info!("PUT /api/todos/{} - request: {:?}", id, request);

    match state.todo_service.edit(id, request.title, request.body).await {
        Ok(todo) => (StatusCode::OK, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Flip a todo's completion state
pub async fn toggle_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return invalid_path(rejection),
    };
    info!("POST /api/todos/{}/toggle", id);

    match state.todo_service.toggle_complete(id).await {
        Ok(todo) => (StatusCode::OK, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete a todo, responding with the deleted record
pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return invalid_path(rejection),
    };
    info!("DELETE /api/todos/{}", id);

    match state.todo_service.delete(id).await {
        Ok(todo) => (StatusCode::OK, Json(TodoMapper::to_dto(todo))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Search todos by title or body
pub async fn search_todos(
    State(state): State<AppState>,
    Query(query): Query<SearchTodosQuery>,
) -> impl IntoResponse {
    info!("GET /api/todos/search?q={}", query.q);

    match state.todo_service.search(&query.q).await {
        Ok(todos) => (StatusCode::OK, Json(TodoMapper::to_dto_list(todos))).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sync_service::TodoSyncService;
    use crate::domain::todo_service::TodoService;
    use crate::network::api_client::TodoSource;
    use crate::network::monitor::StaticReachability;
    use crate::storage::connection::DbConnection;
    use crate::storage::repositories::todo_repository::TodoRepository;
    use crate::storage::traits::{LaunchSettings, TodoStorage};
    use crate::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use serde::de::DeserializeOwned;
    use shared::{Todo, TodoPage};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OfflineSource;

    #[async_trait]
    impl TodoSource for OfflineSource {
        async fn fetch_todo_list(&self) -> Result<TodoPage, NetworkError> {
            Err(NetworkError::NoInternetConnection)
        }
    }

    struct LaunchedBefore;

    #[async_trait]
    impl LaunchSettings for LaunchedBefore {
        async fn is_first_launch(&self) -> bool {
            false
        }

        async fn set_first_launch(&self, _first_launch: bool) -> anyhow::Result<()> {
            Ok(())
        }
    }

    async fn setup_test() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let storage: Arc<dyn TodoStorage> = Arc::new(TodoRepository::new(db));
        let sync_service = TodoSyncService::new(
            storage.clone(),
            Arc::new(OfflineSource),
            Arc::new(StaticReachability::new(false)),
            Arc::new(LaunchedBefore),
        );
        create_router(AppState {
            todo_service: TodoService::new(storage, sync_service),
        })
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn send<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, T) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).expect("Response body is not the expected JSON");
        (status, body)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let app = setup_test().await;

        let (status, created): (_, Todo) = send(
            &app,
            json_request("POST", "/api/todos", r#"{"title":"Test Todo","body":"Test Body"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.title.as_deref(), Some("Test Todo"));
        assert!(!created.completed);

        let (status, todos): (_, Vec<Todo>) = send(&app, empty_request("GET", "/api/todos")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn test_edit_toggle_delete() {
        let app = setup_test().await;
        let (_, created): (_, Todo) = send(&app, json_request("POST", "/api/todos", r#"{"title":"Draft"}"#)).await;

        let (status, edited): (_, Todo) = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/todos/{}", created.id),
                r#"{"title":"Updated Title","body":"Updated Body"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited.title.as_deref(), Some("Updated Title"));
        assert_eq!(edited.body.as_deref(), Some("Updated Body"));

        let (status, toggled): (_, Todo) =
            send(&app, empty_request("POST", &format!("/api/todos/{}/toggle", created.id))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(toggled.completed);

        let (status, deleted): (_, Todo) =
            send(&app, empty_request("DELETE", &format!("/api/todos/{}", created.id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, toggled);

        let (_, todos): (_, Vec<Todo>) = send(&app, empty_request("GET", "/api/todos")).await;
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_missing_todo_is_not_found() {
        let app = setup_test().await;

        let (status, error): (_, ErrorResponse) = send(&app, empty_request("POST", "/api/todos/42/toggle")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.title, "Database Error");
        assert_eq!(error.message, "Todo with ID 42 not found");
    }

    #[tokio::test]
    async fn test_malformed_requests_are_validation_errors() {
        let app = setup_test().await;

        let (status, error): (_, ErrorResponse) =
            send(&app, json_request("POST", "/api/todos", r#"{"title": 12"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.title, "Validation Error");

        let (status, _): (_, ErrorResponse) = send(&app, empty_request("DELETE", "/api/todos/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search() {
        let app = setup_test().await;
        for body in [
            r#"{"title":"Apple Pie","body":"Sweet dessert"}"#,
            r#"{"title":"Banana Bread","body":"Tasty snack"}"#,
            r#"{"title":"Orange Juice","body":"Refreshing apple drink"}"#,
        ] {
            send::<Todo>(&app, json_request("POST", "/api/todos", body)).await;
        }

        let (status, results): (_, Vec<Todo>) = send(&app, empty_request("GET", "/api/todos/search?q=apple")).await;
        assert_eq!(status, StatusCode::OK);
        let mut titles: Vec<_> = results.into_iter().filter_map(|t| t.title).collect();
        titles.sort();
        assert_eq!(titles, vec!["Apple Pie", "Orange Juice"]);

        let (_, results): (_, Vec<Todo>) = send(&app, empty_request("GET", "/api/todos/search")).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AppError::Store(StoreError::NotFound(1))), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&AppError::Store(StoreError::SearchFailed)), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&AppError::Network(NetworkError::ServerError(500))), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&AppError::Validation("bad".to_string())), StatusCode::BAD_REQUEST);
    }
}
