use crate::{
    context::RequestContext,
    error::AppError,
    models::{NewToDoInput, ToDoId, ToDoPatch},
    service::TaskService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};

/// Creates a to-do in a task list the caller is a member of.
///
/// ## Request Body:
/// - `content`: Free text, may be empty.
/// - `task_list_id`: The owning list.
///
/// ## Responses:
/// - `201 Created`: The to-do with its `task_list`.
/// - `401 Unauthorized`, `403 Forbidden`, `404 Not Found` (list).
#[post("")]
pub async fn create_todo(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    payload: web::Json<NewToDoInput>,
) -> Result<impl Responder, AppError> {
    let todo = tasks.create_todo(&ctx, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(todo))
}

/// Fetches one to-do.
#[get("/{id}")]
pub async fn get_todo(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<ToDoId>,
) -> Result<impl Responder, AppError> {
    let todo = tasks.get_todo(&ctx, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Updates `content` and/or `is_completed`; omitted fields keep their value.
#[patch("/{id}")]
pub async fn update_todo(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<ToDoId>,
    payload: web::Json<ToDoPatch>,
) -> Result<impl Responder, AppError> {
    let todo = tasks
        .update_todo(&ctx, id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Deletes a to-do. Answers `true`.
#[delete("/{id}")]
pub async fn delete_todo(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<ToDoId>,
) -> Result<impl Responder, AppError> {
    let deleted = tasks.delete_todo(&ctx, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}
