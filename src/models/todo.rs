use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a todo.
///
/// Missing fields deserialize as empty strings so that validation rejects them.
/// Any `status` sent by older clients is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoInput {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub description: String,
}

/// Payload of `PUT /markcomplete`.
#[derive(Debug, Deserialize)]
pub struct MarkCompleteInput {
    #[serde(default)]
    pub id: Option<Uuid>,
}

/// A todo item as stored in the `todos` table and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Only ever moves from `false` to `true`.
    pub done: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A todo ready to be inserted, owned by `user_id`.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

impl NewTodo {
    pub fn new(input: TodoInput, user_id: Uuid) -> Self {
        Self {
            title: input.title,
            description: input.description,
            user_id,
        }
    }
}

impl Todo {
    /// Builds a not-yet-done todo with a fresh id.
    pub fn new(input: NewTodo) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            done: false,
            user_id: input.user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let owner = Uuid::new_v4();
        let input = TodoInput {
            title: "Buy milk".to_string(),
            description: "Semi-skimmed".to_string(),
        };

        let todo = Todo::new(NewTodo::new(input, owner));
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.user_id, owner);
        assert!(!todo.done);
    }

    #[test]
    fn test_todo_input_validation() {
        let valid: TodoInput =
            serde_json::from_str(r#"{"title":"a","description":"b","status":"pending"}"#).unwrap();
        assert!(valid.validate().is_ok());

        let missing_title: TodoInput = serde_json::from_str(r#"{"description":"b"}"#).unwrap();
        assert!(missing_title.validate().is_err());

        let empty_description: TodoInput =
            serde_json::from_str(r#"{"title":"a","description":""}"#).unwrap();
        assert!(empty_description.validate().is_err());
    }

    #[test]
    fn test_todo_serializes_camel_case() {
        let todo = Todo::new(NewTodo {
            title: "t".to_string(),
            description: "d".to_string(),
            user_id: Uuid::nil(),
        });

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], Uuid::nil().to_string());
        assert_eq!(json["done"], false);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_mark_complete_input_id_is_optional() {
        let input: MarkCompleteInput = serde_json::from_str("{}").unwrap();
        assert!(input.id.is_none());
    }
}
