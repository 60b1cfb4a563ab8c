mod algorithm;
mod rsa;

pub use algorithm::SigningAlgorithm;
pub use self::rsa::RsaSigner;
