use crate::domain::models::todo::Todo as DomainTodo;
use shared::Todo as SharedTodo;

/// Mapper from domain todos to shared DTOs
pub struct TodoMapper;

impl TodoMapper {
    pub fn to_dto(domain: DomainTodo) -> SharedTodo {
        SharedTodo {
            id: domain.id,
            title: domain.title,
            body: domain.body,
            completed: domain.completed,
            created_date: domain.created_date.to_rfc3339(),
        }
    }

    pub fn to_dto_list(domain_todos: Vec<DomainTodo>) -> Vec<SharedTodo> {
        domain_todos.into_iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_to_dto() {
        let domain = DomainTodo {
            id: 7,
            title: Some("Title".to_string()),
            body: None,
            completed: true,
            created_date: Utc.with_ymd_and_hms(2025, 5, 8, 12, 30, 0).unwrap(),
        };

        let dto = TodoMapper::to_dto(domain);
        assert_eq!(dto.id, 7);
        assert_eq!(dto.title.as_deref(), Some("Title"));
        assert!(dto.body.is_none());
        assert!(dto.completed);
        assert_eq!(dto.created_date, "2025-05-08T12:30:00+00:00");
    }
}
