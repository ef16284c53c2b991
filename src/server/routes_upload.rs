//! Upload endpoint.
//!
//! `POST /upload` takes a multipart form with an `image` field holding a
//! netpbm bitmap, converts it, stores it under its content hash and answers
//! with the public URL of the stored file as plain text.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::header,
    response::IntoResponse,
    routing::post,
    Router,
};

use super::AppContext;
use crate::error::{Error, Result};

/// Name of the form field carrying the bitmap.
pub const IMAGE_FIELD: &str = "image";

/// Create upload routes.
pub fn upload_routes() -> Router<AppContext> {
    Router::new().route(
        "/upload",
        post(upload)
            .fallback(method_not_allowed)
            // Uploads are read whole with no cap.
            .layer(DefaultBodyLimit::disable()),
    )
}

async fn upload(
    State(ctx): State<AppContext>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart.map_err(|e| Error::BadInput(e.body_text()))?;
    let data = read_image_field(&mut multipart).await?;

    let converter = ctx.converter.clone();
    let encoded = tokio::task::spawn_blocking(move || converter.convert(&data))
        .await
        .map_err(|e| Error::Internal(format!("conversion task failed: {e}")))??;

    let stored = ctx.store.put(&encoded, ctx.converter.extension()).await?;
    tracing::info!(hash = %stored.hash, bytes = stored.size, "Stored image");

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        file_url(&ctx.config.server.base_url, &stored.file_name),
    ))
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// Find the `image` file part and read it fully into memory.
///
/// Only parts carrying a filename count; a plain form value named `image`
/// is skipped. Problems before the part is located are the client's fault
/// (400); a failure while reading the located part is ours (500).
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadInput(e.body_text()))?
    {
        if field.name() == Some(IMAGE_FIELD) && field.file_name().is_some() {
            return field.bytes().await.map_err(|e| Error::Read(e.body_text()));
        }
    }

    Err(Error::BadInput(format!("missing `{IMAGE_FIELD}` field")))
}

/// `{base_url}/files/{file_name}` plus a trailing newline.
fn file_url(base_url: &str, file_name: &str) -> String {
    format!("{base_url}/files/{file_name}\n")
}
