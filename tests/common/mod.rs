#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;

use listforge::auth::{AuthMiddleware, AuthResponse, CredentialStore};
use listforge::models::UserId;
use listforge::routes::{self, health};
use listforge::store::MemoryStore;
use listforge::{RequestContext, TaskService};

pub const TEST_SECRET: &str = "listforge_test_secret";
pub const TEST_BCRYPT_COST: u32 = 4;

/// Service over a fresh in-memory store. The store handle is returned so tests
/// can inspect it or take it offline.
pub fn task_service() -> (web::Data<TaskService>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let credentials = CredentialStore::new(TEST_SECRET, 30, TEST_BCRYPT_COST);
    let tasks = TaskService::new(store.clone(), credentials);
    (web::Data::new(tasks), store)
}

/// Same wiring as `main`, minus CORS.
pub async fn init_app(
    tasks: web::Data<TaskService>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(tasks)
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

// Helper struct to hold auth details
pub struct TestUser {
    pub id: UserId,
    pub token: String,
}

impl TestUser {
    pub fn ctx(&self) -> RequestContext {
        RequestContext::user(self.id)
    }

    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn sign_up_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to sign up user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let auth: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse sign-up response: {}", e))?;

    Ok(TestUser {
        id: auth.user.id,
        token: auth.token,
    })
}

/// Signs a user up directly through the service.
pub async fn register(tasks: &TaskService, name: &str, email: &str) -> TestUser {
    let auth = tasks
        .sign_up(listforge::auth::SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            avatar: None,
        })
        .await
        .expect("sign up");
    TestUser {
        id: auth.user.id,
        token: auth.token,
    }
}
