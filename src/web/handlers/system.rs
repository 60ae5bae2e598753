use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

use crate::web::models::{HealthResponse, RecentResponse, StatusResponse};
use crate::web::server::AppState;

/// Health check used by the header test pages to detect the server
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Browser lab server running - can set real HTTP headers".to_string(),
        timestamp: Utc::now(),
    })
}

/// Overall server status
pub async fn status(data: web::Data<AppState>) -> impl Responder {
    let uploads = data.uploads.read().await;
    let recent = data.recent.read().await;

    HttpResponse::Ok().json(StatusResponse {
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - data.started_at).num_seconds(),
        uploads_received: uploads.len(),
        upload_bytes: uploads.total_bytes(),
        recent_routes: recent.len(),
    })
}

/// Get the recently visited routes, most recent first
pub async fn get_recent(data: web::Data<AppState>) -> impl Responder {
    let recent = data.recent.read().await;
    HttpResponse::Ok().json(RecentResponse {
        routes: recent.routes().to_vec(),
    })
}

/// Clear the recently visited routes
pub async fn clear_recent(data: web::Data<AppState>) -> impl Responder {
    data.recent.write().await.clear();
    HttpResponse::Ok().json(RecentResponse { routes: Vec::new() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::lab::catalog::FeatureCatalog;
    use crate::lab::recent::RecentPages;
    use crate::lab::uploads::UploadLog;

    fn test_state() -> web::Data<AppState> {
        let recent_path = std::env::temp_dir()
            .join(format!("browser-lab-sys-test-{}.json", uuid::Uuid::new_v4()));
        web::Data::new(AppState {
            catalog: FeatureCatalog::new(),
            recent: Arc::new(RwLock::new(RecentPages::load(recent_path))),
            uploads: Arc::new(RwLock::new(UploadLog::new())),
            started_at: Utc::now(),
        })
    }

    #[actix_web::test]
    async fn test_health_reports_ok() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .route("/api/health", web::get().to(health)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_recent_round_trip() {
        let state = test_state();
        state.recent.write().await.record("/download");
        state.recent.write().await.record("/upload");

        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/api/recent", web::get().to(get_recent))
                .route("/api/recent", web::delete().to(clear_recent)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/recent").to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["routes"], serde_json::json!(["/upload", "/download"]));

        let req = test::TestRequest::delete().uri("/api/recent").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/api/recent").to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["routes"].as_array().unwrap().len(), 0);
    }
}
