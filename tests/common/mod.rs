//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which points a default config at a temporary
//! storage directory and builds the full [`AppContext`]. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{header, Request};
use http_body_util::BodyExt;
use tempfile::TempDir;

use imgdrop::config::Config;
use imgdrop::server::{create_router, AppContext};

/// Boundary used by [`multipart_request`].
pub const BOUNDARY: &str = "imgdrop-test-boundary";

/// 2x2 plain pixmap: red, green / blue, white.
pub const PLAIN_PPM_2X2: &[u8] = b"P3\n2 2\n255\n255 0 0  0 255 0\n0 0 255  255 255 255\n";

/// 2x2 plain pixmap with different pixels from [`PLAIN_PPM_2X2`].
pub const PLAIN_PPM_2X2_ALT: &[u8] = b"P3\n2 2\n255\n0 0 0  0 0 0\n0 0 0  10 10 10\n";

/// Test harness wrapping an [`AppContext`] backed by a temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Harness with default configuration and an existing storage directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.storage.dir = dir.path().join("storage");
        std::fs::create_dir_all(&config.storage.dir).expect("failed to create storage dir");

        Self {
            ctx: AppContext::new(config),
            dir,
        }
    }

    /// Harness whose storage directory was never created, so every write fails.
    pub fn without_storage_dir() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.storage.dir = dir.path().join("missing");

        Self {
            ctx: AppContext::new(config),
            dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn storage_dir(&self) -> &Path {
        &self.ctx.config.storage.dir
    }

    /// Paths of the files currently in the storage directory.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.storage_dir()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Build a `multipart/form-data` POST with one file part.
pub fn multipart_request(uri: &str, field: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.ppm\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/x-portable-pixmap\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Helper to get response body as bytes
pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).unwrap()
}

/// Pull `<hash>.jpg` out of a `<base>/files/<hash>.jpg\n` response.
pub fn file_name_from_url(url: &str) -> String {
    url.trim_end()
        .rsplit('/')
        .next()
        .expect("url has no path")
        .to_string()
}

/// `true` for a 64-char lowercase hex string.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}
