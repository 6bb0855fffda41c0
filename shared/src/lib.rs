use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo record as exposed to presentation clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub completed: bool,
    /// Creation timestamp (RFC 3339)
    pub created_date: String,
}

/// A todo record as served by the remote list endpoint.
///
/// The endpoint only sends `id`, `todo` and `completed`; `body` and `date`
/// are accepted when present and left empty otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTodo {
    pub id: i64,
    /// Title text of the todo
    pub todo: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// One page of the remote list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<RemoteTodo>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

/// Request body for creating a todo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Request body for editing a todo's title and body.
/// Omitted fields clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Query string for the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchTodosQuery {
    #[serde(default)]
    pub q: String,
}

/// Error payload returned to presentation clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short, user-displayable heading
    pub title: String,
    /// User-displayable description of what went wrong
    pub message: String,
}
