//! spc - Spaces CLI
//!
//! Upload, list and delete objects in DigitalOcean Spaces and other
//! S3-compatible buckets addressed by URL.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spaces_cli::commands::{self, Cli};

/// Filter used by `--debug`
const DEBUG_FILTER: &str = "spc=debug,spaces_cli=debug,spc_core=debug,spc_s3=debug";

#[tokio::main]
async fn main() {
    // Load .env before parsing so credential flags can fall back to it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.global.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
