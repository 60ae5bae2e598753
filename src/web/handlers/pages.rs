use actix_web::{web, HttpResponse, Responder};
use handlebars::Handlebars;
use serde_json::json;
use std::sync::Arc;
use log::error;

use crate::web::server::AppState;

/// Shared handlebars instance
lazy_static::lazy_static! {
    static ref HBS: Arc<Handlebars<'static>> = {
        let mut hbs = Handlebars::new();
        // Register templates
        if let Err(e) = hbs.register_templates_directory(".hbs", "./src/web/templates") {
            error!("Error registering Handlebars templates: {}", e);
        }
        Arc::new(hbs)
    };
}

fn render(template: &str, context: &serde_json::Value) -> HttpResponse {
    match HBS.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            error!("Template rendering error: {}", e);
            HttpResponse::InternalServerError().body(format!("Template error: {}", e))
        }
    }
}

/// Build the context shared by every page: nav entries and active route
fn page_context(data: &AppState, title: &str, route: &str) -> serde_json::Value {
    let features: Vec<_> = data
        .catalog
        .all()
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "route": f.route,
                "active": f.route == route,
            })
        })
        .collect();
    json!({
        "title": title,
        "features": features,
        "route": route,
        "version": env!("CARGO_PKG_VERSION"),
    })
}

/// Record a visit in the recent-pages list
async fn track_visit(data: &AppState, route: &str) {
    data.recent.write().await.record(route);
}

/// Serve the home page with the recently visited pages.
///
/// The home route itself is never recorded; the recent list only holds
/// feature pages.
pub async fn home(data: web::Data<AppState>) -> impl Responder {
    let recent: Vec<_> = {
        let recent = data.recent.read().await;
        recent
            .routes()
            .iter()
            .map(|route| {
                let name = data
                    .catalog
                    .find(route)
                    .map(|f| f.name.to_string())
                    .unwrap_or_else(|| route.clone());
                json!({ "route": route, "name": name })
            })
            .collect()
    };

    let mut context = page_context(&data, "Browser Lab", "/");
    context["recent"] = json!(recent);
    context["descriptions"] = json!(data
        .catalog
        .all()
        .iter()
        .map(|f| json!({
            "name": f.name,
            "route": f.route,
            "description": f.description,
        }))
        .collect::<Vec<_>>());

    render("index", &context)
}

/// Serve the client-side download triggers page
pub async fn download(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/download").await;
    let context = page_context(&data, "Download | Browser Lab", "/download");
    render("download", &context)
}

/// Serve the download headers test page
pub async fn download_headers(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/download-headers").await;
    let mut context = page_context(&data, "Download Headers | Browser Lab", "/download-headers");
    context["file_types"] = json!([
        { "id": "docx", "label": "Word document (.docx)" },
        { "id": "pdf", "label": "PDF (.pdf)" },
        { "id": "txt", "label": "Plain text (.txt)" },
        { "id": "zip", "label": "ZIP archive (.zip)" },
    ]);
    render("download_headers", &context)
}

/// Serve the one-click header comparison page
pub async fn download_simple(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/download-simple").await;
    let context = page_context(&data, "Download Headers (Simple) | Browser Lab", "/download-simple");
    render("download_simple", &context)
}

/// Serve the download bubble popup test page
pub async fn download_bubble(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/download-bubble").await;
    let context = page_context(&data, "Download Bubble Test | Browser Lab", "/download-bubble");
    render("download_bubble", &context)
}

/// Serve the upload page
pub async fn upload(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/upload").await;
    let uploads_received = data.uploads.read().await.len();
    let mut context = page_context(&data, "Upload | Browser Lab", "/upload");
    context["uploads_received"] = json!(uploads_received);
    render("upload", &context)
}

/// Serve the third-party upload widget page
pub async fn plupload(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/plupload").await;
    let context = page_context(&data, "Plupload Demo | Browser Lab", "/plupload");
    render("plupload", &context)
}

/// Serve the Fine Uploader widget page
pub async fn fine_uploader(data: web::Data<AppState>) -> impl Responder {
    track_visit(&data, "/fine-uploader").await;
    let context = page_context(&data, "Fine Uploader Demo | Browser Lab", "/fine-uploader");
    render("fine_uploader", &context)
}

/// 404 Not Found handler
pub async fn not_found(data: web::Data<AppState>) -> impl Responder {
    let context = page_context(&data, "Page Not Found | Browser Lab", "");
    match HBS.render("404", &context) {
        Ok(body) => HttpResponse::NotFound().content_type("text/html").body(body),
        Err(e) => {
            error!("Template rendering error: {}", e);
            HttpResponse::InternalServerError().body(format!("Template error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::lab::catalog::FeatureCatalog;
    use crate::lab::recent::RecentPages;
    use crate::lab::uploads::UploadLog;

    fn test_state() -> web::Data<AppState> {
        let recent_path = std::env::temp_dir()
            .join(format!("browser-lab-pages-test-{}.json", uuid::Uuid::new_v4()));
        web::Data::new(AppState {
            catalog: FeatureCatalog::new(),
            recent: Arc::new(RwLock::new(RecentPages::load(recent_path))),
            uploads: Arc::new(RwLock::new(UploadLog::new())),
            started_at: Utc::now(),
        })
    }

    #[actix_web::test]
    async fn test_home_route_is_never_recorded() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/", web::get().to(home))
                .route("/download", web::get().to(download)),
        )
        .await;

        // Visit home twice around a feature page
        for uri in ["/", "/download", "/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let recent = state.recent.read().await;
        assert!(!recent.routes().contains(&"/".to_string()));
        assert_eq!(recent.routes(), ["/download"]);
    }

    #[actix_web::test]
    async fn test_feature_pages_are_recorded_most_recent_first() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/download-bubble", web::get().to(download_bubble))
                .route("/fine-uploader", web::get().to(fine_uploader)),
        )
        .await;

        for uri in ["/download-bubble", "/fine-uploader"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let recent = state.recent.read().await;
        assert_eq!(recent.routes(), ["/fine-uploader", "/download-bubble"]);
    }
}
