use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{TaskListDetail, TaskListId, ToDoId};

/// Input for creating a to-do inside a list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewToDoInput {
    /// Free text, may be empty.
    #[validate(length(max = 10000))]
    pub content: String,
    pub task_list_id: TaskListId,
}

/// Partial update of a to-do. Only the provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ToDoPatch {
    #[validate(length(max = 10000))]
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}

impl ToDoPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.is_completed.is_none()
    }

    /// Applies the provided fields to `todo` in place.
    pub fn apply(&self, todo: &mut ToDo) {
        if let Some(content) = &self.content {
            todo.content = content.clone();
        }
        if let Some(is_completed) = self.is_completed {
            todo.is_completed = is_completed;
        }
    }
}

/// A single to-do item as stored by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDo {
    pub id: ToDoId,
    pub content: String,
    pub is_completed: bool,
    /// Owning list. Never changes after creation.
    pub task_list_id: TaskListId,
    /// Creation time, used to keep a list's items in order.
    pub created_at: DateTime<Utc>,
}

impl ToDo {
    /// Creates an uncompleted to-do belonging to `task_list_id`.
    pub fn new(content: String, task_list_id: TaskListId) -> Self {
        Self {
            id: ToDoId::new(),
            content,
            is_completed: false,
            task_list_id,
            created_at: Utc::now(),
        }
    }
}

/// A to-do together with its resolved parent list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToDoDetail {
    #[serde(flatten)]
    pub todo: ToDo,
    pub task_list: TaskListDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_is_not_completed() {
        let list = TaskListId::new();
        let todo = ToDo::new("Milk".to_string(), list);
        assert!(!todo.is_completed);
        assert_eq!(todo.task_list_id, list);
    }

    #[test]
    fn test_patch_touches_only_provided_fields() {
        let mut todo = ToDo::new("Milk".to_string(), TaskListId::new());
        todo.is_completed = true;

        ToDoPatch {
            content: Some("Oat milk".to_string()),
            is_completed: None,
        }
        .apply(&mut todo);
        assert_eq!(todo.content, "Oat milk");
        assert!(todo.is_completed);

        ToDoPatch {
            content: None,
            is_completed: Some(false),
        }
        .apply(&mut todo);
        assert_eq!(todo.content, "Oat milk");
        assert!(!todo.is_completed);
    }

    #[test]
    fn test_empty_content_is_valid() {
        let input = NewToDoInput {
            content: String::new(),
            task_list_id: TaskListId::new(),
        };
        assert!(input.validate().is_ok());

        let too_long = ToDoPatch {
            content: Some("x".repeat(10001)),
            is_completed: None,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_patch_deserializes_partial_body() {
        let patch: ToDoPatch = serde_json::from_str(r#"{"is_completed": true}"#).unwrap();
        assert_eq!(patch.is_completed, Some(true));
        assert!(patch.content.is_none());
        assert!(!patch.is_empty());
        assert!(ToDoPatch::default().is_empty());
    }
}
