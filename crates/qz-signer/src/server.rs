use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tower_http::trace::TraceLayer;

use crate::config::SignerConfig;
use crate::error::SignerServerError;
use crate::keystore::KeyStore;
use crate::payload;
use crate::signing::{RsaSigner, SigningAlgorithm};

const INDEX_FILE: &str = "index2.html";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub keystore: Arc<KeyStore>,
    pub algorithm: SigningAlgorithm,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        keystore: KeyStore,
        algorithm: SigningAlgorithm,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            keystore: Arc::new(keystore),
            algorithm,
            static_dir: Arc::new(static_dir.into()),
        }
    }

    pub fn from_config(config: &SignerConfig) -> Self {
        Self::new(config.keystore(), config.algorithm(), &config.static_dir)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index2.html", get(index_handler))
        .route("/healthcheck", get(|| async move { (StatusCode::OK, "Ok").into_response() }))
        .route("/qz/cert", get(cert_handler))
        .route("/qz/sign", post(sign_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: SignerConfig) -> Result<()> {
    config.log_diagnostics();
    let state = AppState::from_config(&config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        algorithm = %state.algorithm,
        cert_path = %state.keystore.cert_path().display(),
        key_path = %state.keystore.key_path().display(),
        "qz-signer listening"
    );

    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<Vec<u8>>, SignerServerError> {
    let path = state.static_dir.join(INDEX_FILE);
    match tokio::fs::read(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SignerServerError::NotFound(INDEX_FILE.to_string()))
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("reading {}", path.display()))
            .into()),
    }
}

async fn cert_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SignerServerError> {
    let keystore = state.keystore.clone();
    let cert = tokio::task::spawn_blocking(move || keystore.load_certificate())
        .await
        .context("certificate read task failed")??;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], cert))
}

/// Signs the request body with the configured key and digest.
///
/// Client mistakes (nothing to sign) are rejected before the key is
/// touched; key problems surface as server errors.
async fn sign_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, SignerServerError> {
    // Non-ASCII header bytes must not hide an `application/json` media type.
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .unwrap_or_default();
    let message = payload::extract(&body, &content_type)?;
    let message_len = message.len();

    let keystore = state.keystore.clone();
    let algorithm = state.algorithm;
    let signature = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, SignerServerError> {
        let private_key = keystore.load_private_key()?;
        let signer = RsaSigner::new(private_key, algorithm);
        Ok(signer.sign(message.as_bytes())?)
    })
    .await
    .context("signing task failed")??;

    tracing::debug!(%algorithm, message_len, "signed request");

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        BASE64.encode(signature),
    ))
}
