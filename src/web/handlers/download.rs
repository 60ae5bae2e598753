use actix_web::{web, HttpRequest, HttpResponse, Responder};
use actix_web::http::header;
use log::info;

use crate::lab::files::DownloadPolicy;
use crate::web::models::{DownloadQuery, ErrorResponse, FeatureQuery};
use crate::web::server::AppState;

/// List the feature catalog, optionally filtered by a search query
pub async fn get_features(
    data: web::Data<AppState>,
    query: web::Query<FeatureQuery>,
) -> impl Responder {
    let features = match &query.q {
        Some(q) => data.catalog.search(q),
        None => data.catalog.all().iter().collect(),
    };
    HttpResponse::Ok().json(features)
}

/// Emit a generated test file with the requested header combination.
///
/// The query drives the response headers directly: `file` picks the body,
/// `headers` sets (or omits, with "none") X-Download-Options, `disposition`
/// picks the Content-Disposition mode and `mimeType` overrides the native
/// Content-Type. This is the endpoint the header test pages point real
/// browser downloads at.
pub async fn download_test(
    req: HttpRequest,
    query: web::Query<DownloadQuery>,
) -> impl Responder {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    info!(
        "Download request: file={:?} headers={:?} disposition={:?} mimeType={:?} test={:?} user-agent={}",
        query.file, query.headers, query.disposition, query.mime_type, query.test, user_agent
    );

    let policy = match DownloadPolicy::resolve(
        query.file.as_deref(),
        query.headers.as_deref(),
        query.disposition.as_deref(),
        query.mime_type.as_deref(),
        query.test.as_deref(),
    ) {
        Some(policy) => policy,
        None => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "File not found".to_string(),
            });
        }
    };

    let headers = policy.response_headers();
    info!(
        "Sending {} with headers: {}",
        policy.filename(),
        headers
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut builder = HttpResponse::Ok();
    for (name, value) in headers {
        builder.insert_header((name, value));
    }
    builder.body(policy.kind.body())
}
