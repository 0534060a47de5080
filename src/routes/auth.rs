use crate::{
    auth::{SignInRequest, SignUpRequest},
    error::AppError,
    service::TaskService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new user account and returns it together with a session token.
///
/// ## Responses:
/// - `201 Created`: `{ "user": User, "token": String }`.
/// - `400 Bad Request`: Email already registered, or malformed JSON.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/signup")]
pub async fn sign_up(
    tasks: web::Data<TaskService>,
    payload: web::Json<SignUpRequest>,
) -> Result<impl Responder, AppError> {
    let response = tasks.sign_up(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Sign in
///
/// Authenticates a user and returns it together with a session token.
///
/// ## Responses:
/// - `200 OK`: `{ "user": User, "token": String }`.
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable).
#[post("/signin")]
pub async fn sign_in(
    tasks: web::Data<TaskService>,
    payload: web::Json<SignInRequest>,
) -> Result<impl Responder, AppError> {
    let response = tasks.sign_in(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
