use anyhow::{Context, Result};
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::algorithm::SigningAlgorithm;

/// RSA PKCS#1 v1.5 signer over one of the supported digests.
///
/// The digest is fixed when the signer is built; nothing in a request
/// can change it.
pub enum RsaSigner {
    Sha1(SigningKey<Sha1>),
    Sha256(SigningKey<Sha256>),
    Sha512(SigningKey<Sha512>),
}

impl RsaSigner {
    pub fn new(private_key: RsaPrivateKey, algorithm: SigningAlgorithm) -> Self {
        match algorithm {
            SigningAlgorithm::Sha1 => Self::Sha1(SigningKey::new(private_key)),
            SigningAlgorithm::Sha256 => Self::Sha256(SigningKey::new(private_key)),
            SigningAlgorithm::Sha512 => Self::Sha512(SigningKey::new(private_key)),
        }
    }

    /// Sign `data`. Returns raw signature bytes.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature = match self {
            Self::Sha1(key) => key.try_sign(data).map(|s| s.to_vec()),
            Self::Sha256(key) => key.try_sign(data).map(|s| s.to_vec()),
            Self::Sha512(key) => key.try_sign(data).map(|s| s.to_vec()),
        };
        signature.with_context(|| format!("signing with RSA PKCS#1 v1.5 / {}", self.algorithm()))
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        match self {
            Self::Sha1(_) => SigningAlgorithm::Sha1,
            Self::Sha256(_) => SigningAlgorithm::Sha256,
            Self::Sha512(_) => SigningAlgorithm::Sha512,
        }
    }
}
