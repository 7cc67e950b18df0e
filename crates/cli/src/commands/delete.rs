//! delete command - Remove objects by URL
//!
//! Every URL is decomposed and deleted on its own, in input order. A failing
//! URL is reported and the remaining ones are still attempted.

use clap::Args;
use serde::Serialize;
use spc_core::{decompose, Error, Result, StorageLocator, StoreProvider};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove objects
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// JSON array of object URLs, e.g. '["https://media.nyc3.digitaloceanspaces.com/a.txt"]'
    #[arg(long)]
    pub urls: String,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    status: &'static str,
    deleted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<FailedDelete>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct FailedDelete {
    url: String,
    error: String,
}

impl DeleteOutput {
    fn new(deleted: Vec<String>, failed: Vec<FailedDelete>) -> Self {
        let status = match (deleted.is_empty(), failed.is_empty()) {
            (_, true) => "success",
            (true, false) => "failed",
            (false, false) => "partial",
        };
        Self {
            status,
            total: deleted.len() + failed.len(),
            deleted,
            failed,
        }
    }
}

/// Parse the `--urls` argument
pub fn parse_urls(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Usage(format!("--urls must be a JSON array of URL strings: {e}")))
}

/// Execute the delete command
pub async fn execute(
    args: DeleteArgs,
    provider: &dyn StoreProvider,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let urls = match parse_urls(&args.urls) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!(error = %e, "invalid --urls");
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    if urls.is_empty() {
        formatter.warning("No URLs given; nothing to delete");
    }

    let mut deleted = Vec::new();
    let mut failed = Vec::new();

    for url in urls {
        tracing::info!(url = %url, "deleting file from URL");

        match delete_one(&url, provider).await {
            Ok(locator) => {
                tracing::info!(key = %locator.key, bucket = %locator.bucket, "file deleted");
                if !formatter.is_json() {
                    formatter.println(&format!("Removed: {locator}"));
                }
                deleted.push(locator.to_string());
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to delete file");
                formatter.error(&format!("Failed to delete {url}: {e}"));
                failed.push(FailedDelete {
                    url,
                    error: e.to_string(),
                });
            }
        }
    }

    let output = DeleteOutput::new(deleted, failed);

    if formatter.is_json() {
        formatter.json(&output);
    } else if output.failed.is_empty() {
        if output.total > 0 {
            formatter.success(&format!("Removed {} object(s).", output.deleted.len()));
        }
    } else {
        formatter.error(&format!(
            "Failed to remove {} of {} object(s).",
            output.failed.len(),
            output.total
        ));
    }

    if output.failed.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

async fn delete_one(url: &str, provider: &dyn StoreProvider) -> Result<StorageLocator> {
    let locator = decompose(url)?;
    if locator.is_bucket() {
        return Err(Error::Usage(format!(
            "'{url}' names a bucket, not an object"
        )));
    }

    let store = provider.store_for(&locator).await?;
    store.delete_object(&locator).await?;
    Ok(locator)
}
