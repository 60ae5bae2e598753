use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use log::{info, warn};

use crate::web::models::{ErrorResponse, UploadResponse};
use crate::web::server::AppState;

/// Receive a multipart upload and echo back what was declared about it.
///
/// File content is drained and discarded; only the metadata (field name,
/// filename, content type, size) is recorded in the upload log.
pub async fn receive_upload(
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> impl Responder {
    let mut received = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                warn!("Malformed multipart payload: {}", e);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: format!("Malformed multipart payload: {}", e),
                });
            }
        };

        let field_name = field
            .content_disposition()
            .get_name()
            .unwrap_or("file")
            .to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or("unknown")
            .to_string();
        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        // Drain the part without storing it
        let mut size_bytes = 0usize;
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => size_bytes += bytes.len(),
                Err(e) => {
                    warn!("Upload stream error on field '{}': {}", field_name, e);
                    return HttpResponse::BadRequest().json(ErrorResponse {
                        error: format!("Upload stream error: {}", e),
                    });
                }
            }
        }

        let record = data
            .uploads
            .write()
            .await
            .record(&field_name, &file_name, &content_type, size_bytes);
        info!(
            "Upload received: {} ({}, {} bytes)",
            record.file_name, record.content_type, record.size_bytes
        );
        received.push(record);
    }

    if received.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "No file parts in upload".to_string(),
        });
    }

    HttpResponse::Ok().json(UploadResponse {
        success: true,
        message: "Received!".to_string(),
        files: received,
    })
}

/// List the uploads received since startup
pub async fn list_uploads(data: web::Data<AppState>) -> impl Responder {
    let uploads = data.uploads.read().await;
    HttpResponse::Ok().json(uploads.records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{test, App};
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::lab::catalog::FeatureCatalog;
    use crate::lab::recent::RecentPages;
    use crate::lab::uploads::UploadLog;

    fn test_state() -> web::Data<AppState> {
        let recent_path = std::env::temp_dir()
            .join(format!("browser-lab-up-test-{}.json", uuid::Uuid::new_v4()));
        web::Data::new(AppState {
            catalog: FeatureCatalog::new(),
            recent: Arc::new(RwLock::new(RecentPages::load(recent_path))),
            uploads: Arc::new(RwLock::new(UploadLog::new())),
            started_at: Utc::now(),
        })
    }

    const BOUNDARY: &str = "lab-test-boundary";

    fn multipart_body(file_name: &str, content: &str) -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
        .into_bytes()
    }

    #[actix_web::test]
    async fn test_upload_echoes_file_metadata() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/api/upload", web::post().to(receive_upload)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body("hello.txt", "hello world"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Received!");
        assert_eq!(body["files"][0]["field_name"], "file");
        assert_eq!(body["files"][0]["file_name"], "hello.txt");
        assert_eq!(body["files"][0]["content_type"], "text/plain");
        assert_eq!(body["files"][0]["size_bytes"], 11);

        // The upload log recorded the metadata too
        let uploads = state.uploads.read().await;
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads.records()[0].file_name, "hello.txt");
        assert_eq!(uploads.total_bytes(), 11);
    }

    #[actix_web::test]
    async fn test_empty_multipart_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .route("/api/upload", web::post().to(receive_upload)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(format!("--{}--\r\n", BOUNDARY))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No file parts in upload");
    }

    #[actix_web::test]
    async fn test_non_multipart_payload_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(test_state())
                .route("/api/upload", web::post().to(receive_upload)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("just some text")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
