//! Postgres gateway built on `sqlx`.
//!
//! Rows are read into private row structs holding raw UUIDs and converted to
//! the domain records at this boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{TaskList, TaskListId, ToDo, ToDoId, ToDoPatch, User, UserId};

const USER_COLUMNS: &str = "id, name, email, password_hash, avatar";
const TASK_LIST_COLUMNS: &str = "id, title, created_at, member_ids";
const TODO_COLUMNS: &str = "id, content, is_completed, task_list_id, created_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    avatar: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> User {
        User {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            avatar: row.avatar,
        }
    }
}

#[derive(FromRow)]
struct TaskListRow {
    id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
    member_ids: Vec<Uuid>,
}

impl From<TaskListRow> for TaskList {
    fn from(row: TaskListRow) -> TaskList {
        TaskList {
            id: row.id.into(),
            title: row.title,
            created_at: row.created_at,
            member_ids: row.member_ids.into_iter().map(UserId::from).collect(),
        }
    }
}

#[derive(FromRow)]
struct ToDoRow {
    id: Uuid,
    content: String,
    is_completed: bool,
    task_list_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ToDoRow> for ToDo {
    fn from(row: ToDoRow) -> ToDo {
        ToDo {
            id: row.id.into(),
            content: row.content,
            is_completed: row.is_completed,
            task_list_id: row.task_list_id.into(),
            created_at: row.created_at,
        }
    }
}

/// Gateway over a Postgres connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, name, email, password_hash, avatar)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let ids: Vec<Uuid> = ids.iter().map(UserId::as_uuid).collect();
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_task_list(&self, list: &TaskList) -> StoreResult<TaskList> {
        let member_ids: Vec<Uuid> = list.member_ids.iter().map(UserId::as_uuid).collect();
        let row = sqlx::query_as::<_, TaskListRow>(&format!(
            "INSERT INTO task_lists (id, title, created_at, member_ids)
             VALUES ($1, $2, $3, $4)
             RETURNING {TASK_LIST_COLUMNS}"
        ))
        .bind(list.id.as_uuid())
        .bind(&list.title)
        .bind(list.created_at)
        .bind(member_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_task_list(&self, id: TaskListId) -> StoreResult<Option<TaskList>> {
        let row = sqlx::query_as::<_, TaskListRow>(&format!(
            "SELECT {TASK_LIST_COLUMNS} FROM task_lists WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TaskList::from))
    }

    async fn find_task_lists_for_member(&self, member: UserId) -> StoreResult<Vec<TaskList>> {
        let rows = sqlx::query_as::<_, TaskListRow>(&format!(
            "SELECT {TASK_LIST_COLUMNS} FROM task_lists
             WHERE member_ids @> ARRAY[$1]::uuid[]
             ORDER BY created_at"
        ))
        .bind(member.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(TaskList::from).collect())
    }

    async fn update_task_list_title(&self, id: TaskListId, title: &str) -> StoreResult<()> {
        sqlx::query("UPDATE task_lists SET title = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(title)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_task_list_member(&self, id: TaskListId, member: UserId) -> StoreResult<()> {
        // Single conditional statement: the row lock plus the re-checked WHERE
        // make concurrent appends of the same member collapse into one.
        sqlx::query(
            "UPDATE task_lists SET member_ids = array_append(member_ids, $2)
             WHERE id = $1 AND NOT ($2 = ANY(member_ids))",
        )
        .bind(id.as_uuid())
        .bind(member.as_uuid())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_task_list(&self, id: TaskListId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM todos WHERE task_list_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM task_lists WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_todo(&self, todo: &ToDo) -> StoreResult<ToDo> {
        let row = sqlx::query_as::<_, ToDoRow>(&format!(
            "INSERT INTO todos (id, content, is_completed, task_list_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(todo.id.as_uuid())
        .bind(&todo.content)
        .bind(todo.is_completed)
        .bind(todo.task_list_id.as_uuid())
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_todo(&self, id: ToDoId) -> StoreResult<Option<ToDo>> {
        let row = sqlx::query_as::<_, ToDoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ToDo::from))
    }

    async fn find_todos_for_list(&self, task_list_id: TaskListId) -> StoreResult<Vec<ToDo>> {
        let rows = sqlx::query_as::<_, ToDoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE task_list_id = $1 ORDER BY created_at, id"
        ))
        .bind(task_list_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ToDo::from).collect())
    }

    async fn update_todo(&self, id: ToDoId, patch: &ToDoPatch) -> StoreResult<()> {
        sqlx::query(
            "UPDATE todos
             SET content = COALESCE($2, content), is_completed = COALESCE($3, is_completed)
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(&patch.content)
        .bind(patch.is_completed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_todo(&self, id: ToDoId) -> StoreResult<()> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
