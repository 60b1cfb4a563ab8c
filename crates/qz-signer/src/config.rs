use std::path::{Path, PathBuf};

use crate::keystore::KeyStore;
use crate::signing::SigningAlgorithm;

const DEFAULT_CERT_DIR: &str = "QZ Tray Demo Cert";
const DEFAULT_CERT_FILE: &str = "digital-certificate.txt";
const DEFAULT_KEY_FILE: &str = "private-key.pem";

/// Settings resolved once at startup and never changed afterwards.
#[derive(Debug, Clone)]
pub struct SignerConfig {
    pub host: String,
    pub port: u16,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    /// Algorithm name as configured, before fallback resolution.
    pub sign_alg: String,
    /// Directory holding `index2.html`.
    pub static_dir: PathBuf,
}

impl SignerConfig {
    pub fn keystore(&self) -> KeyStore {
        KeyStore::new(&self.cert_path, &self.key_path)
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        SigningAlgorithm::select(&self.sign_alg)
    }

    /// Logs configuration problems the operator should know about.
    ///
    /// Missing files are only reported here; requests fail individually
    /// until the files appear.
    pub fn log_diagnostics(&self) {
        if !SigningAlgorithm::is_recognized(&self.sign_alg) {
            tracing::warn!(
                configured = %self.sign_alg,
                using = %self.algorithm(),
                "unrecognized signing algorithm, falling back to default"
            );
        }
        warn_if_missing("certificate", &self.cert_path);
        warn_if_missing("private key", &self.key_path);
        warn_if_missing("index page", &self.static_dir.join("index2.html"));
    }
}

fn warn_if_missing(what: &str, path: &Path) {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "{what} file not found");
    }
}

/// `%USERPROFILE%` on Windows hosts, `$HOME` elsewhere, falling back to
/// the working directory when neither is set.
fn home_dir() -> PathBuf {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_cert_dir() -> PathBuf {
    home_dir().join("Desktop").join(DEFAULT_CERT_DIR)
}

pub fn default_cert_path() -> PathBuf {
    default_cert_dir().join(DEFAULT_CERT_FILE)
}

pub fn default_key_path() -> PathBuf {
    default_cert_dir().join(DEFAULT_KEY_FILE)
}
