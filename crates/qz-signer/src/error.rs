use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::keystore::KeyStoreError;
use crate::payload::PayloadError;

#[derive(Debug, thiserror::Error)]
pub enum SignerServerError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
    /// The caller sent something that cannot be signed.
    #[error(transparent)]
    BadRequest(#[from] PayloadError),
    /// Operator-managed key material is missing or unusable.
    #[error(transparent)]
    Configuration(#[from] KeyStoreError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Trait implementation to convert this error into an axum http response
impl IntoResponse for SignerServerError {
    fn into_response(self) -> Response {
        match self {
            SignerServerError::BadRequest(error) => {
                tracing::debug!(%error, "rejecting sign request");
                (StatusCode::BAD_REQUEST, error.to_string()).into_response()
            }
            SignerServerError::NotFound(path) => {
                (StatusCode::NOT_FOUND, format!("Not found: {path}")).into_response()
            }
            SignerServerError::Configuration(error) => {
                tracing::error!(?error, "signing material unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response()
            }
            SignerServerError::Unexpected(error) => {
                tracing::error!(error = %format!("{error:#}"), "unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something wrong happened.",
                )
                    .into_response()
            }
        }
    }
}
