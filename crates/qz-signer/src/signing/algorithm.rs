use std::fmt;

/// Digest paired with PKCS#1 v1.5 padding when signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl SigningAlgorithm {
    /// Resolves a configured algorithm name.
    ///
    /// Never fails: anything other than `SHA1` or `SHA512` (compared after
    /// uppercasing) selects SHA-256.
    pub fn select(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "SHA1" => Self::Sha1,
            "SHA512" => Self::Sha512,
            _ => Self::Sha256,
        }
    }

    /// Whether `name` resolves to an algorithm by itself rather than by
    /// falling back to the default.
    pub fn is_recognized(name: &str) -> bool {
        matches!(name.to_uppercase().as_str(), "SHA1" | "SHA256" | "SHA512")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
