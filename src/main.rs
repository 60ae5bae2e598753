use log::{info, error};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

mod lab;
mod web;

use crate::lab::recent::{self, RecentPages};
use crate::lab::uploads::UploadLog;
use crate::web::server::start_web_server;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    info!("Starting Browser Lab...");

    let bind_addr =
        std::env::var("BROWSER_LAB_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let data_dir = std::env::var("BROWSER_LAB_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    // Load the recent-pages list and set up the ephemeral upload log
    let recent_path = recent::recent_pages_path(&data_dir);
    recent::log_storage_location(&recent_path);
    let recent = Arc::new(RwLock::new(RecentPages::load(recent_path)));
    let uploads = Arc::new(RwLock::new(UploadLog::new()));

    // Start the web interface
    info!("Starting web interface on http://{}", bind_addr);
    let web_server_handle = tokio::spawn(start_web_server(
        bind_addr,
        recent.clone(),
        uploads.clone(),
    ));

    // Run until interrupted
    info!("Browser Lab is now running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");

    info!("Shutting down Browser Lab...");

    // Wait for web server to finish
    if let Err(e) = web_server_handle.await {
        error!("Error during web server shutdown: {:?}", e);
    }

    info!("Browser Lab shutdown complete");
}
