pub mod config;
pub mod error;
pub mod keystore;
pub mod payload;
pub mod server;
pub mod signing;

pub use config::SignerConfig;
pub use keystore::{KeyStore, KeyStoreError};
pub use payload::{PayloadError, extract};
pub use server::{AppState, router, run};
pub use signing::{RsaSigner, SigningAlgorithm};
