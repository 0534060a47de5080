use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ToDo, TaskListId, User, UserId};

/// Input for creating or renaming a task list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskListInput {
    /// The title of the list.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Payload for adding a collaborator to a task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberInput {
    pub user_id: UserId,
}

/// A task list as stored by the persistence gateway.
///
/// Progress is not stored. It is derived from the list's to-dos at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique identifier for the list.
    pub id: TaskListId,
    /// Current title.
    pub title: String,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Collaborators in the order they joined. The creator is always first.
    pub member_ids: Vec<UserId>,
}

impl TaskList {
    /// Creates a new list whose only member is `owner`.
    pub fn new(title: String, owner: UserId) -> Self {
        Self {
            id: TaskListId::new(),
            title,
            created_at: Utc::now(),
            member_ids: vec![owner],
        }
    }

    pub fn has_member(&self, user_id: UserId) -> bool {
        self.member_ids.contains(&user_id)
    }
}

/// A task list together with its computed relational fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListDetail {
    #[serde(flatten)]
    pub list: TaskList,
    /// Percentage of completed to-dos, in `[0, 100]`.
    pub progress: f64,
    /// Resolved members; ids with no matching user are left out.
    pub users: Vec<User>,
    pub todos: Vec<ToDo>,
}

/// Completion percentage over `todos`, `0` for an empty list.
pub fn progress(todos: &[ToDo]) -> f64 {
    if todos.is_empty() {
        return 0.0;
    }
    let completed = todos.iter().filter(|todo| todo.is_completed).count();
    100.0 * completed as f64 / todos.len() as f64
}
