use validator::Validate;

use super::TaskService;
use crate::context::RequestContext;
use crate::error::AppError;
use crate::guard::{ensure_member, require_member};
use crate::models::{TaskList, TaskListDetail, TaskListId, TaskListInput, UserId};

impl TaskService {
    /// Every list the caller is a member of, oldest first.
    pub async fn my_task_lists(&self, ctx: &RequestContext) -> Result<Vec<TaskListDetail>, AppError> {
        let caller = ctx.require_user()?;
        let lists = self.store.find_task_lists_for_member(caller).await?;

        let mut details = Vec::with_capacity(lists.len());
        for list in lists {
            details.push(self.task_list_detail(list).await?);
        }
        Ok(details)
    }

    /// Fetches one list the caller is a member of.
    pub async fn get_task_list(
        &self,
        ctx: &RequestContext,
        id: TaskListId,
    ) -> Result<TaskListDetail, AppError> {
        let caller = ctx.require_user()?;
        let list = require_member(self.store(), caller, id).await?;
        self.task_list_detail(list).await
    }

    /// Creates a list owned by the caller, who becomes its only member.
    pub async fn create_task_list(
        &self,
        ctx: &RequestContext,
        input: TaskListInput,
    ) -> Result<TaskListDetail, AppError> {
        let caller = ctx.require_user()?;
        input.validate()?;

        let list = self
            .store
            .insert_task_list(&TaskList::new(input.title, caller))
            .await?;
        log::info!("user {} created task list {}", caller, list.id);
        self.task_list_detail(list).await
    }

    /// Renames a list and returns its re-fetched state.
    pub async fn update_task_list(
        &self,
        ctx: &RequestContext,
        id: TaskListId,
        input: TaskListInput,
    ) -> Result<TaskListDetail, AppError> {
        let caller = ctx.require_user()?;
        require_member(self.store(), caller, id).await?;
        input.validate()?;

        self.store.update_task_list_title(id, &input.title).await?;
        let list = self.refetch_task_list(id).await?;
        self.task_list_detail(list).await
    }

    /// Deletes a list and, with it, all of its to-dos.
    pub async fn delete_task_list(&self, ctx: &RequestContext, id: TaskListId) -> Result<bool, AppError> {
        let caller = ctx.require_user()?;
        require_member(self.store(), caller, id).await?;

        self.store.remove_task_list(id).await?;
        log::info!("user {} deleted task list {}", caller, id);
        Ok(true)
    }

    /// Adds `user_id` as a collaborator.
    ///
    /// Returns `None` when the list does not exist. Adding an existing member
    /// changes nothing and returns the list as it is.
    ///
    /// # Errors
    /// - `Forbidden` if the caller is not a member.
    /// - `NotFound` if `user_id` names no user.
    pub async fn add_user_to_task_list(
        &self,
        ctx: &RequestContext,
        task_list_id: TaskListId,
        user_id: UserId,
    ) -> Result<Option<TaskListDetail>, AppError> {
        let caller = ctx.require_user()?;
        let Some(list) = self.store.find_task_list(task_list_id).await? else {
            return Ok(None);
        };
        ensure_member(&list, caller)?;

        if list.has_member(user_id) {
            return self.task_list_detail(list).await.map(Some);
        }
        if self.store.find_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        self.store.add_task_list_member(task_list_id, user_id).await?;
        log::info!(
            "user {} added {} to task list {}",
            caller,
            user_id,
            task_list_id
        );
        let list = self.refetch_task_list(task_list_id).await?;
        self.task_list_detail(list).await.map(Some)
    }

    async fn refetch_task_list(&self, id: TaskListId) -> Result<TaskList, AppError> {
        self.store
            .find_task_list(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task list not found".into()))
    }
}
