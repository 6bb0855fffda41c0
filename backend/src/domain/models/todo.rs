use chrono::{DateTime, Utc};
use shared::RemoteTodo;

/// The single persistent entity of the application
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// Unique and immutable once created
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub completed: bool,
    pub created_date: DateTime<Utc>,
}

impl Todo {
    /// Build a record from the remote list. The endpoint has no notion of a
    /// creation date, so one is only taken from the payload when present.
    pub fn from_remote(remote: RemoteTodo, fetched_at: DateTime<Utc>) -> Self {
        Self {
            id: remote.id,
            title: Some(remote.todo),
            body: remote.body,
            completed: remote.completed,
            created_date: remote.date.unwrap_or(fetched_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_remote_defaults_missing_fields() {
        let fetched_at = Utc.with_ymd_and_hms(2025, 5, 8, 12, 0, 0).unwrap();
        let remote = RemoteTodo {
            id: 1,
            todo: "Network Todo".to_string(),
            completed: false,
            body: None,
            date: None,
        };

        let todo = Todo::from_remote(remote, fetched_at);
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title.as_deref(), Some("Network Todo"));
        assert!(todo.body.is_none());
        assert!(!todo.completed);
        assert_eq!(todo.created_date, fetched_at);
    }

    #[test]
    fn test_from_remote_keeps_supplied_date() {
        let fetched_at = Utc.with_ymd_and_hms(2025, 5, 8, 12, 0, 0).unwrap();
        let sent = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let remote = RemoteTodo {
            id: 2,
            todo: "Dated".to_string(),
            completed: true,
            body: Some("With body".to_string()),
            date: Some(sent),
        };

        let todo = Todo::from_remote(remote, fetched_at);
        assert_eq!(todo.created_date, sent);
        assert_eq!(todo.body.as_deref(), Some("With body"));
        assert!(todo.completed);
    }
}
