//! Error type shared by the conversion, storage and HTTP layers.
//!
//! Every per-request failure ends up as an [`Error`], which knows its HTTP
//! status via [`Error::http_status`] and renders itself as a plain-text
//! response through its `IntoResponse` impl.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Failure modes of the upload/store/serve cycle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The upload did not carry a readable `image` field.
    #[error("Error reading file: {0}")]
    BadInput(String),

    /// `/upload` was called with something other than POST.
    #[error("Invalid request method")]
    MethodNotAllowed,

    /// The `image` field was found but its body could not be read.
    #[error("Error reading file: {0}")]
    Read(String),

    /// The payload is not a bitmap the decoder understands.
    #[error("Error converting to JPEG: failed to decode bitmap: {0}")]
    Decode(String),

    /// The encoder rejected the decoded pixels.
    #[error("Error converting to JPEG: failed to encode image: {0}")]
    Encode(String),

    /// Writing the encoded file failed.
    #[error("Error storing the JPEG: {source}")]
    Store {
        #[source]
        source: std::io::Error,
    },

    /// No stored file by that name.
    #[error("{0} not found")]
    NotFound(String),

    /// A background task died before producing a result.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Fatal failure while preparing the process to serve.
    #[error("{context}: {source}")]
    Startup {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Map this error to the status code returned to the client.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::BadInput(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Read(_)
            | Error::Decode(_)
            | Error::Encode(_)
            | Error::Store { .. }
            | Error::Internal(_)
            | Error::Startup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convenience constructor for [`Error::Store`].
    pub fn store(source: std::io::Error) -> Self {
        Error::Store { source }
    }

    /// Convenience constructor for [`Error::Startup`].
    pub fn startup(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Startup {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{self}\n"),
        )
            .into_response()
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
