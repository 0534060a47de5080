//! In-process gateway.
//!
//! All three collections live behind one lock, which makes the cascading
//! list removal and the member set-union atomic without further machinery.
//! Backs the unit and integration test suites.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{TaskList, TaskListId, ToDo, ToDoId, ToDoPatch, User, UserId};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    task_lists: Vec<TaskList>,
    todos: Vec<ToDo>,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with `Unavailable` (or succeed
    /// again), to exercise fault propagation.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        if collections.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("users_email_key".into()));
        }
        collections.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn insert_task_list(&self, list: &TaskList) -> StoreResult<TaskList> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        collections.task_lists.push(list.clone());
        Ok(list.clone())
    }

    async fn find_task_list(&self, id: TaskListId) -> StoreResult<Option<TaskList>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections.task_lists.iter().find(|l| l.id == id).cloned())
    }

    async fn find_task_lists_for_member(&self, member: UserId) -> StoreResult<Vec<TaskList>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .task_lists
            .iter()
            .filter(|l| l.has_member(member))
            .cloned()
            .collect())
    }

    async fn update_task_list_title(&self, id: TaskListId, title: &str) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        if let Some(list) = collections.task_lists.iter_mut().find(|l| l.id == id) {
            list.title = title.to_string();
        }
        Ok(())
    }

    async fn add_task_list_member(&self, id: TaskListId, member: UserId) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        if let Some(list) = collections.task_lists.iter_mut().find(|l| l.id == id) {
            if !list.has_member(member) {
                list.member_ids.push(member);
            }
        }
        Ok(())
    }

    async fn remove_task_list(&self, id: TaskListId) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        collections.todos.retain(|t| t.task_list_id != id);
        collections.task_lists.retain(|l| l.id != id);
        Ok(())
    }

    async fn insert_todo(&self, todo: &ToDo) -> StoreResult<ToDo> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        collections.todos.push(todo.clone());
        Ok(todo.clone())
    }

    async fn find_todo(&self, id: ToDoId) -> StoreResult<Option<ToDo>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections.todos.iter().find(|t| t.id == id).cloned())
    }

    async fn find_todos_for_list(&self, task_list_id: TaskListId) -> StoreResult<Vec<ToDo>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        Ok(collections
            .todos
            .iter()
            .filter(|t| t.task_list_id == task_list_id)
            .cloned()
            .collect())
    }

    async fn update_todo(&self, id: ToDoId, patch: &ToDoPatch) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        if let Some(todo) = collections.todos.iter_mut().find(|t| t.id == id) {
            patch.apply(todo);
        }
        Ok(())
    }

    async fn remove_todo(&self, id: ToDoId) -> StoreResult<()> {
        self.ensure_online()?;
        let mut collections = self.collections.write().await;
        collections.todos.retain(|t| t.id != id);
        Ok(())
    }
}
