use std::sync::Arc;
use tokio::sync::RwLock;
use actix_web::{web, App, HttpServer, middleware};
use actix_files as fs;
use chrono::{DateTime, Utc};
use log::info;

use crate::lab::catalog::FeatureCatalog;
use crate::lab::recent::RecentPages;
use crate::lab::uploads::UploadLog;
use crate::web::handlers;

/// Start the web server for the browser lab UI
pub async fn start_web_server(
    bind_addr: String,
    recent: Arc<RwLock<RecentPages>>,
    uploads: Arc<RwLock<UploadLog>>,
) -> std::io::Result<()> {
    info!("Starting web server on http://{}", bind_addr);

    // Create shared application state
    let app_state = web::Data::new(AppState {
        catalog: FeatureCatalog::new(),
        recent: recent.clone(),
        uploads: uploads.clone(),
        started_at: Utc::now(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            // Static files (client-side page scripts and styles)
            .service(fs::Files::new("/static", "./src/web/static"))
            // API routes
            .service(
                web::scope("/api")
                    // System APIs
                    .route("/health", web::get().to(handlers::system::health))
                    .route("/status", web::get().to(handlers::system::status))
                    .route("/recent", web::get().to(handlers::system::get_recent))
                    .route("/recent", web::delete().to(handlers::system::clear_recent))

                    // Download APIs
                    .route("/features", web::get().to(handlers::download::get_features))
                    .route("/download-test", web::get().to(handlers::download::download_test))

                    // Upload APIs
                    .route("/upload", web::post().to(handlers::upload::receive_upload))
                    .route("/uploads", web::get().to(handlers::upload::list_uploads)),
            )
            // Page routes
            .route("/", web::get().to(handlers::pages::home))
            .route("/download", web::get().to(handlers::pages::download))
            .route("/download-headers", web::get().to(handlers::pages::download_headers))
            .route("/download-simple", web::get().to(handlers::pages::download_simple))
            .route("/download-bubble", web::get().to(handlers::pages::download_bubble))
            .route("/upload", web::get().to(handlers::pages::upload))
            .route("/plupload", web::get().to(handlers::pages::plupload))
            .route("/fine-uploader", web::get().to(handlers::pages::fine_uploader))
            // Default route for 404
            .default_service(web::get().to(handlers::pages::not_found))
    })
    .bind(bind_addr)?
    .run();
    server.await
}

/// Shared application state for web handlers
pub struct AppState {
    pub catalog: FeatureCatalog,
    pub recent: Arc<RwLock<RecentPages>>,
    pub uploads: Arc<RwLock<UploadLog>>,
    pub started_at: DateTime<Utc>,
}
