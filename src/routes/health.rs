use actix_web::{get, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    fn now() -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness probe. Never touches storage and needs no session, so it stays
/// outside the `/api` scope.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthReport::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_service_and_version() {
        let app = test::init_service(App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let report: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(report["status"], "ok");
        assert_eq!(report["service"], "listforge");
        assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
        assert!(report["timestamp"].as_str().is_some_and(|t| t.contains('T')));
    }
}
