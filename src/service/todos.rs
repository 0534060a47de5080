use validator::Validate;

use super::TaskService;
use crate::context::RequestContext;
use crate::error::AppError;
use crate::guard::require_member;
use crate::models::{NewToDoInput, ToDo, ToDoDetail, ToDoId, ToDoPatch};

impl TaskService {
    /// Adds an uncompleted to-do to a list the caller is a member of.
    pub async fn create_todo(
        &self,
        ctx: &RequestContext,
        input: NewToDoInput,
    ) -> Result<ToDoDetail, AppError> {
        let caller = ctx.require_user()?;
        let list = require_member(self.store(), caller, input.task_list_id).await?;
        input.validate()?;

        let todo = self
            .store
            .insert_todo(&ToDo::new(input.content, input.task_list_id))
            .await?;
        self.todo_detail(todo, list).await
    }

    /// Fetches a to-do from a list the caller is a member of.
    ///
    /// A to-do removed together with its list is `NotFound`.
    pub async fn get_todo(&self, ctx: &RequestContext, id: ToDoId) -> Result<ToDoDetail, AppError> {
        let caller = ctx.require_user()?;
        let todo = self.find_todo(id).await?;
        let list = require_member(self.store(), caller, todo.task_list_id).await?;
        self.todo_detail(todo, list).await
    }

    /// Changes only the provided fields and returns the re-fetched to-do.
    pub async fn update_todo(
        &self,
        ctx: &RequestContext,
        id: ToDoId,
        patch: ToDoPatch,
    ) -> Result<ToDoDetail, AppError> {
        let caller = ctx.require_user()?;
        let todo = self.find_todo(id).await?;
        let list = require_member(self.store(), caller, todo.task_list_id).await?;
        patch.validate()?;

        if !patch.is_empty() {
            self.store.update_todo(id, &patch).await?;
        }
        let todo = self.find_todo(id).await?;
        self.todo_detail(todo, list).await
    }

    /// Deletes a to-do from a list the caller is a member of.
    pub async fn delete_todo(&self, ctx: &RequestContext, id: ToDoId) -> Result<bool, AppError> {
        let caller = ctx.require_user()?;
        let todo = self.find_todo(id).await?;
        require_member(self.store(), caller, todo.task_list_id).await?;

        self.store.remove_todo(id).await?;
        Ok(true)
    }

    async fn find_todo(&self, id: ToDoId) -> Result<ToDo, AppError> {
        self.store
            .find_todo(id)
            .await?
            .ok_or_else(|| AppError::NotFound("To-do not found".into()))
    }
}
