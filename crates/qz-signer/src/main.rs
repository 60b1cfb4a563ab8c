use std::path::PathBuf;

use clap::Parser;
use qz_signer::{SignerConfig, config, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(about = "Local certificate and signing helper for QZ Tray clients")]
struct Args {
    #[clap(long, env = "QZ_HOST", default_value = "127.0.0.1")]
    host: String,
    #[clap(long, env = "QZ_PORT", default_value = "8000")]
    port: u16,
    /// Defaults to `~/Desktop/QZ Tray Demo Cert/digital-certificate.txt`.
    #[clap(long, env = "QZ_CERT_PATH")]
    cert_path: Option<PathBuf>,
    /// Defaults to `~/Desktop/QZ Tray Demo Cert/private-key.pem`.
    #[clap(long, env = "QZ_KEY_PATH")]
    key_path: Option<PathBuf>,
    /// SHA1, SHA256 or SHA512; anything else signs with SHA256.
    #[clap(long, env = "QZ_SIGN_ALG", default_value = "SHA512")]
    sign_alg: String,
    #[clap(long, env = "QZ_STATIC_DIR", default_value = ".")]
    static_dir: PathBuf,
}

impl From<Args> for SignerConfig {
    fn from(args: Args) -> Self {
        SignerConfig {
            host: args.host,
            port: args.port,
            cert_path: args.cert_path.unwrap_or_else(config::default_cert_path),
            key_path: args.key_path.unwrap_or_else(config::default_key_path),
            sign_alg: args.sign_alg,
            static_dir: args.static_dir,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(args.into()).await
}
