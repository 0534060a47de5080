use crate::{
    context::RequestContext,
    error::AppError,
    models::{AddMemberInput, TaskListId, TaskListInput},
    service::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists every task list the caller is a member of.
///
/// ## Responses:
/// - `200 OK`: JSON array of task lists with `progress`, `users` and `todos`.
/// - `401 Unauthorized`: No valid session token.
#[get("")]
pub async fn my_task_lists(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
) -> Result<impl Responder, AppError> {
    let lists = tasks.my_task_lists(&ctx).await?;
    Ok(HttpResponse::Ok().json(lists))
}

/// Creates a task list owned by the caller.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters.
///
/// ## Responses:
/// - `201 Created`: The new list.
/// - `401 Unauthorized`: No valid session token.
/// - `422 Unprocessable Entity`: Invalid title.
#[post("")]
pub async fn create_task_list(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    payload: web::Json<TaskListInput>,
) -> Result<impl Responder, AppError> {
    let list = tasks.create_task_list(&ctx, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(list))
}

/// Fetches one task list.
///
/// ## Responses:
/// - `200 OK`: The list.
/// - `401 Unauthorized`, `403 Forbidden` (not a member), `404 Not Found`.
#[get("/{id}")]
pub async fn get_task_list(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<TaskListId>,
) -> Result<impl Responder, AppError> {
    let list = tasks.get_task_list(&ctx, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Renames a task list.
#[put("/{id}")]
pub async fn update_task_list(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<TaskListId>,
    payload: web::Json<TaskListInput>,
) -> Result<impl Responder, AppError> {
    let list = tasks
        .update_task_list(&ctx, id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Deletes a task list and every to-do in it. Answers `true`.
#[delete("/{id}")]
pub async fn delete_task_list(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<TaskListId>,
) -> Result<impl Responder, AppError> {
    let deleted = tasks.delete_task_list(&ctx, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}

/// Adds a collaborator to a task list.
///
/// ## Request Body:
/// - `user_id`: The user to add.
///
/// ## Responses:
/// - `200 OK`: The updated list, or `null` if the list does not exist.
/// - `403 Forbidden`: Caller is not a member.
/// - `404 Not Found`: `user_id` names no user.
#[post("/{id}/users")]
pub async fn add_user_to_task_list(
    tasks: web::Data<TaskService>,
    ctx: RequestContext,
    id: web::Path<TaskListId>,
    payload: web::Json<AddMemberInput>,
) -> Result<impl Responder, AppError> {
    let list = tasks
        .add_user_to_task_list(&ctx, id.into_inner(), payload.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(list))
}
