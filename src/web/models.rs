use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lab::uploads::UploadRecord;

/// Query parameters for the download-test endpoint
#[derive(Deserialize)]
pub struct DownloadQuery {
    pub file: Option<String>,
    /// X-Download-Options value, or "none" to omit the header
    pub headers: Option<String>,
    pub disposition: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub test: Option<String>,
}

/// Query parameters for the feature catalog endpoint
#[derive(Deserialize)]
pub struct FeatureQuery {
    pub q: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Server status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
    pub uploads_received: usize,
    pub upload_bytes: usize,
    pub recent_routes: usize,
}

/// Recent pages response
#[derive(Serialize)]
pub struct RecentResponse {
    pub routes: Vec<String>,
}

/// Upload echo response
#[derive(Serialize)]
pub struct UploadResponse {
    /// Fine Uploader-style success flag
    pub success: bool,
    pub message: String,
    pub files: Vec<UploadRecord>,
}

/// Generic error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
