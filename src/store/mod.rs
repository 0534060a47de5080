//! Persistence gateway.
//!
//! The gateway is the only I/O boundary of the service. It exposes
//! collection-scoped operations over users, task lists and to-dos, keyed by
//! their canonical ids. Implementations translate whatever identifiers the
//! backing storage uses into those ids, so nothing above this layer sees a
//! storage-internal representation.
//!
//! Contract shared by every implementation:
//! - update and remove operations on a missing id are silent no-ops; callers
//!   re-fetch to observe the resulting state.
//! - `add_task_list_member` is an atomic set-union.
//! - `remove_task_list` removes the list and all of its to-dos in one
//!   transaction.
//! - faults surface as [`StoreError::Unavailable`] and are never retried here.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{TaskList, TaskListId, ToDo, ToDoId, ToDoPatch, User, UserId};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a persistence gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Duplicate(String),
    /// The backing storage could not be reached or failed the operation.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Duplicate(msg) => write!(f, "duplicate key: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::Duplicate(db_error.constraint().unwrap_or("unique").to_string())
            }
            _ => StoreError::Unavailable(error.to_string()),
        }
    }
}

/// Collection-scoped access to users, task lists and to-dos.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Fails with [`StoreError::Duplicate`] if the email is taken.
    async fn insert_user(&self, user: &User) -> StoreResult<User>;
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;
    /// Looks a user up by already-normalized email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Returns the users that exist among `ids`, in no particular order.
    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;

    async fn insert_task_list(&self, list: &TaskList) -> StoreResult<TaskList>;
    async fn find_task_list(&self, id: TaskListId) -> StoreResult<Option<TaskList>>;
    /// Lists containing `member`, oldest first.
    async fn find_task_lists_for_member(&self, member: UserId) -> StoreResult<Vec<TaskList>>;
    async fn update_task_list_title(&self, id: TaskListId, title: &str) -> StoreResult<()>;
    /// Appends `member` unless it is already present.
    async fn add_task_list_member(&self, id: TaskListId, member: UserId) -> StoreResult<()>;
    /// Removes the list together with every to-do it owns.
    async fn remove_task_list(&self, id: TaskListId) -> StoreResult<()>;

    async fn insert_todo(&self, todo: &ToDo) -> StoreResult<ToDo>;
    async fn find_todo(&self, id: ToDoId) -> StoreResult<Option<ToDo>>;
    /// To-dos of one list, oldest first.
    async fn find_todos_for_list(&self, task_list_id: TaskListId) -> StoreResult<Vec<ToDo>>;
    async fn update_todo(&self, id: ToDoId, patch: &ToDoPatch) -> StoreResult<()>;
    async fn remove_todo(&self, id: ToDoId) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        let error = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_unavailable() {
        // Lookups use fetch_optional, so a missing row here is a gateway bug.
        let error = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, StoreError::Unavailable(_)));
    }
}
