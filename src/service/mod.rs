//! Task-list and to-do use cases.
//!
//! `TaskService` is the request-handling core: every operation takes the
//! caller's [`RequestContext`], rejects anonymous callers with
//! `Unauthenticated` (except sign-up and sign-in), checks list membership
//! through the guard, and talks to storage only through the [`Store`]
//! gateway. It keeps no state of its own between requests.
//!
//! Relational fields (`progress`, `users`, `todos`, a to-do's list) are
//! computed here at read time and never stored.

mod accounts;
mod task_lists;
mod todos;

use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::context::RequestContext;
use crate::error::AppError;
use crate::models::{progress, TaskList, TaskListDetail, ToDo, ToDoDetail, User};
use crate::store::Store;

pub struct TaskService {
    store: Arc<dyn Store>,
    credentials: CredentialStore,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>, credentials: CredentialStore) -> Self {
        Self { store, credentials }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Turns the inbound credential (zero or one opaque string) into a caller
    /// context.
    ///
    /// A missing, invalid or expired token, or one naming a user that no longer
    /// exists, gives the anonymous context. Only storage faults are errors.
    pub async fn resolve_context(&self, credential: Option<&str>) -> Result<RequestContext, AppError> {
        let Some(user_id) = credential.and_then(|token| self.credentials.resolve_token(token)) else {
            return Ok(RequestContext::anonymous());
        };
        match self.store.find_user(user_id).await? {
            Some(user) => Ok(RequestContext::user(user.id)),
            None => {
                log::debug!("token subject {} does not exist", user_id);
                Ok(RequestContext::anonymous())
            }
        }
    }

    /// Completion percentage of `list`.
    pub async fn progress(&self, list: &TaskList) -> Result<f64, AppError> {
        Ok(progress(&self.todos(list).await?))
    }

    /// Members of `list` resolved to user records, in join order.
    ///
    /// Member ids without a user record are dropped and logged.
    pub async fn users(&self, list: &TaskList) -> Result<Vec<User>, AppError> {
        let mut found = self.store.find_users(&list.member_ids).await?;
        let mut users = Vec::with_capacity(list.member_ids.len());
        for member_id in &list.member_ids {
            match found.iter().position(|user| user.id == *member_id) {
                Some(index) => users.push(found.swap_remove(index)),
                None => log::warn!(
                    "task list {} references missing user {}",
                    list.id,
                    member_id
                ),
            }
        }
        Ok(users)
    }

    /// To-dos belonging to `list`, oldest first.
    pub async fn todos(&self, list: &TaskList) -> Result<Vec<ToDo>, AppError> {
        Ok(self.store.find_todos_for_list(list.id).await?)
    }

    /// The list that owns `todo`.
    pub async fn todo_task_list(&self, todo: &ToDo) -> Result<TaskList, AppError> {
        self.store
            .find_task_list(todo.task_list_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task list not found".into()))
    }

    /// Attaches every computed field to `list`.
    pub async fn task_list_detail(&self, list: TaskList) -> Result<TaskListDetail, AppError> {
        let todos = self.todos(&list).await?;
        let users = self.users(&list).await?;
        Ok(TaskListDetail {
            progress: progress(&todos),
            users,
            todos,
            list,
        })
    }

    async fn todo_detail(&self, todo: ToDo, list: TaskList) -> Result<ToDoDetail, AppError> {
        Ok(ToDoDetail {
            task_list: self.task_list_detail(list).await?,
            todo,
        })
    }
}
