#![allow(dead_code)]

use std::path::Path;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use qz_signer::{AppState, KeyStore, SigningAlgorithm, router};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::LineEnding;
use tempfile::TempDir;
use tower::ServiceExt;

pub const CERT_TEXT: &str = "-----BEGIN CERTIFICATE-----\nMIIDdzCCAl+gAwIBAgIUTest\n-----END CERTIFICATE-----\n";
pub const INDEX_HTML: &str = "<!doctype html><title>QZ demo</title>";

pub fn test_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        RsaPrivateKey::new(&mut rng, 1024).unwrap()
    })
}

/// A directory laid out the way an operator would set it up.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write_cert(CERT_TEXT.as_bytes());
        fixture.write_key(test_key().to_pkcs1_pem(LineEnding::LF).unwrap().as_bytes());
        std::fs::write(fixture.dir.path().join("index2.html"), INDEX_HTML).unwrap();
        fixture
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_cert(&self, contents: &[u8]) {
        std::fs::write(self.path().join("cert.txt"), contents).unwrap();
    }

    pub fn write_key(&self, contents: &[u8]) {
        std::fs::write(self.path().join("key.pem"), contents).unwrap();
    }

    pub fn state(&self, algorithm: SigningAlgorithm) -> AppState {
        let keystore = KeyStore::new(self.path().join("cert.txt"), self.path().join("key.pem"));
        AppState::new(keystore, algorithm, self.path())
    }
}

pub async fn send(state: AppState, request: Request<Body>) -> Response<Body> {
    router(state).oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn sign_request(content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/qz/sign");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body.into()).unwrap()
}
