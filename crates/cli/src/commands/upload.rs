//! upload command - Upload a local file
//!
//! Uploads one file into the bucket named by a bucket URL. The object key is
//! the file's base name; any path on the bucket URL is ignored.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use spc_core::{decompose, StoreProvider};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Upload a local file
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Bucket URL (https://<bucket>.<region>.digitaloceanspaces.com)
    #[arg(long)]
    pub bucket_url: String,

    /// Local file to upload
    #[arg(long)]
    pub file_path: PathBuf,

    /// Content type for the object (guessed from the file extension by default)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    status: &'static str,
    file: String,
    bucket: String,
    key: String,
    size_bytes: Option<i64>,
    size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    provider: &dyn StoreProvider,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let locator = match decompose(&args.bucket_url) {
        Ok(locator) => locator,
        Err(e) => {
            tracing::error!(url = %args.bucket_url, error = %e, "invalid bucket URL");
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    if !locator.is_bucket() {
        tracing::debug!(path = %locator.key, "ignoring path component of bucket URL");
    }

    let file = args.file_path.display().to_string();

    let Some(object_name) = object_name(&args.file_path) else {
        formatter.error(&format!("Cannot derive an object name from '{file}'"));
        return ExitCode::UsageError;
    };

    let metadata = match tokio::fs::metadata(&args.file_path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            formatter.error(&format!("File not found: {file}"));
            return ExitCode::NotFound;
        }
        Err(e) => {
            formatter.error(&format!("Failed to read {file}: {e}"));
            return ExitCode::GeneralError;
        }
    };

    if metadata.is_dir() {
        formatter.error(&format!("{file} is a directory; only single files can be uploaded"));
        return ExitCode::UsageError;
    }

    let data = match tokio::fs::read(&args.file_path).await {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(file = %file, error = %e, "failed to read file");
            formatter.error(&format!("Failed to read {file}: {e}"));
            return ExitCode::GeneralError;
        }
    };

    let content_type = args.content_type.clone().or_else(|| {
        mime_guess::from_path(&args.file_path)
            .first()
            .map(|m| m.essence_str().to_string())
    });

    let target = locator.with_key(object_name);

    let store = match provider.store_for(&target).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(file = %file, bucket = %target.bucket, error = %e, "failed to create client");
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let spinner = ProgressBar::spinner(output_config, &format!("Uploading {file}"));
    let result = store.put_object(&target, data, content_type).await;
    spinner.finish_and_clear();

    match result {
        Ok(info) => {
            tracing::info!(file = %file, key = %target.key, bucket = %target.bucket, "file uploaded");

            if formatter.is_json() {
                formatter.json(&UploadOutput {
                    status: "success",
                    file,
                    bucket: target.bucket,
                    key: target.key,
                    size_bytes: info.size_bytes,
                    size_human: info.size_human,
                    etag: info.etag,
                });
            } else {
                formatter.success(&format!(
                    "File {file} uploaded successfully as {} to bucket {} ({})",
                    target.key,
                    target.bucket,
                    info.size_human.unwrap_or_default()
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            tracing::error!(file = %file, bucket = %target.bucket, error = %e, "upload failed");
            formatter.error(&format!("Failed to upload file {file}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

/// Object name for an uploaded file: its base name, directories stripped
pub fn object_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
