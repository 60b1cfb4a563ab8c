use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;

/// Failures reading operator-managed key material.
///
/// None of these can be fixed by the caller retrying, so they are all
/// surfaced as server errors.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("QZ cert not found")]
    CertificateNotFound(PathBuf),
    #[error("QZ private key not found")]
    PrivateKeyNotFound(PathBuf),
    #[error("QZ private key could not be parsed: {0}")]
    KeyParse(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the certificate and private key from fixed paths.
///
/// Nothing is cached: both files are read again on every call so an
/// operator can replace them without restarting the process.
#[derive(Debug, Clone)]
pub struct KeyStore {
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl KeyStore {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Certificate text exactly as stored on disk.
    pub fn load_certificate(&self) -> Result<String, KeyStoreError> {
        std::fs::read_to_string(&self.cert_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => KeyStoreError::CertificateNotFound(self.cert_path.clone()),
            _ => KeyStoreError::Io {
                path: self.cert_path.clone(),
                source,
            },
        })
    }

    /// Parses an unencrypted RSA private key in either PKCS#8
    /// (`BEGIN PRIVATE KEY`) or PKCS#1 (`BEGIN RSA PRIVATE KEY`) PEM form.
    pub fn load_private_key(&self) -> Result<RsaPrivateKey, KeyStoreError> {
        let key_bytes = std::fs::read(&self.key_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => KeyStoreError::PrivateKeyNotFound(self.key_path.clone()),
            _ => KeyStoreError::Io {
                path: self.key_path.clone(),
                source,
            },
        })?;
        parse_private_key_pem(&key_bytes)
    }
}

fn parse_private_key_pem(key_bytes: &[u8]) -> Result<RsaPrivateKey, KeyStoreError> {
    let pem = std::str::from_utf8(key_bytes)
        .map_err(|e| KeyStoreError::KeyParse(format!("key file is not text: {e}")))?;

    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(pkcs8_error) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1_error| {
            KeyStoreError::KeyParse(format!("pkcs8: {pkcs8_error}; pkcs1: {pkcs1_error}"))
        }),
    }
}
