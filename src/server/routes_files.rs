//! Static retrieval of stored images under `/files`.
//!
//! Content-type inference, range requests, conditional requests and path
//! sanitising all come from `tower_http`'s `ServeDir`.

use std::path::Path;

use axum::{handler::HandlerWithoutStateExt, http::Uri, Router};
use tower_http::services::ServeDir;

use super::AppContext;
use crate::error::Error;

/// Create file-serving routes rooted at the storage directory.
pub fn file_routes(root: &Path) -> Router<AppContext> {
    let files = ServeDir::new(root).not_found_service(missing_file.into_service());
    Router::new().nest_service("/files", files)
}

async fn missing_file(uri: Uri) -> Error {
    Error::NotFound(uri.path().trim_start_matches('/').to_string())
}
