//! Membership checks gating every task-list and to-do operation.

use crate::error::AppError;
use crate::models::{TaskList, TaskListId, UserId};
use crate::store::Store;

/// Loads the task list `task_list_id` and checks that `caller` is a member.
///
/// Returns the loaded list so callers do not fetch it twice.
///
/// # Errors
/// - `NotFound` if the list does not exist.
/// - `Forbidden` if `caller` is not in its member set.
/// - `StorageUnavailable` if the gateway fails.
pub async fn require_member(
    store: &dyn Store,
    caller: UserId,
    task_list_id: TaskListId,
) -> Result<TaskList, AppError> {
    let list = store
        .find_task_list(task_list_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task list not found".into()))?;

    ensure_member(&list, caller)?;
    Ok(list)
}

/// Membership check against an already loaded list.
pub fn ensure_member(list: &TaskList, caller: UserId) -> Result<(), AppError> {
    if !list.has_member(caller) {
        log::debug!("user {} denied access to task list {}", caller, list.id);
        return Err(AppError::Forbidden);
    }
    Ok(())
}
