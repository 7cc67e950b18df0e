//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Storage commands receive a [`StoreProvider`](spc_core::StoreProvider)
//! built once from the resolved configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spc_core::config::Defaults;
use spc_core::{ConfigManager, Credentials};
use spc_s3::S3Provider;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
pub mod delete;
pub mod list;
pub mod upload;

/// spc - Spaces CLI
///
/// Upload, list and delete objects in DigitalOcean Spaces and other
/// S3-compatible buckets. Buckets and objects are addressed by URL:
/// https://<bucket>.<region>.digitaloceanspaces.com/<key>
#[derive(Parser, Debug)]
#[command(name = "spc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Configuration file (defaults to ~/.config/spc/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Access key id
    #[arg(
        long,
        global = true,
        env = "SPACES_ACCESS_KEY_ID",
        hide_env_values = true
    )]
    pub access_key_id: Option<String>,

    /// Secret access key
    #[arg(
        long,
        global = true,
        env = "SPACES_SECRET_ACCESS_KEY",
        hide_env_values = true
    )]
    pub secret_access_key: Option<String>,
}

impl GlobalArgs {
    /// Output configuration from flags, with config file defaults filled in
    pub fn output_config(&self, defaults: &Defaults) -> OutputConfig {
        OutputConfig {
            json: self.json || defaults.output == "json",
            no_color: self.no_color || defaults.color == "never",
            no_progress: self.no_progress || !defaults.progress,
            quiet: self.quiet,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local file into a bucket
    Upload(upload::UploadArgs),

    /// List the objects in a bucket
    List(list::ListArgs),

    /// Delete objects by URL
    Delete(delete::DeleteArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Resolved configuration and store provider for one invocation
pub struct Session {
    pub provider: S3Provider,
    pub output: OutputConfig,
}

impl Session {
    /// Load the configuration file and resolve credentials
    ///
    /// Failures are reported through the formatter and turned into an exit code.
    pub fn open(global: &GlobalArgs) -> Result<Self, ExitCode> {
        let fallback = Formatter::new(global.output_config(&Defaults::default()));

        let manager = match &global.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => match ConfigManager::new() {
                Ok(manager) => manager,
                Err(e) => {
                    fallback.error(&e.to_string());
                    return Err(ExitCode::from_error(&e));
                }
            },
        };

        let config = match manager.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %manager.config_path().display(), error = %e, "failed to load config");
                fallback.error(&format!(
                    "Failed to load {}: {e}",
                    manager.config_path().display()
                ));
                return Err(ExitCode::UsageError);
            }
        };

        let output = global.output_config(&config.defaults);

        let credentials = match Credentials::resolve(
            global.access_key_id.clone(),
            global.secret_access_key.clone(),
            config.credentials.as_ref(),
        ) {
            Ok(credentials) => credentials,
            Err(e) => {
                Formatter::new(output).error(&e.to_string());
                return Err(ExitCode::from_error(&e));
            }
        };

        tracing::debug!(?credentials, domain = %config.provider.domain, "session ready");

        Ok(Self {
            provider: S3Provider::new(credentials, config.provider),
            output,
        })
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let Cli { global, command } = cli;

    match command {
        Commands::Completions(args) => completions::execute(args),
        Commands::Upload(args) => match Session::open(&global) {
            Ok(session) => upload::execute(args, &session.provider, session.output).await,
            Err(code) => code,
        },
        Commands::List(args) => match Session::open(&global) {
            Ok(session) => list::execute(args, &session.provider, session.output).await,
            Err(code) => code,
        },
        Commands::Delete(args) => match Session::open(&global) {
            Ok(session) => delete::execute(args, &session.provider, session.output).await,
            Err(code) => code,
        },
    }
}
