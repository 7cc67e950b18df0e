//! list command - List objects in a bucket
//!
//! Only the first page returned by the service is shown; a truncated
//! listing is reported as a warning.

use clap::Args;
use serde::Serialize;
use spc_core::{decompose, ListResult, ObjectInfo, StoreProvider};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List objects in a bucket
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Bucket URL (https://<bucket>.<region>.digitaloceanspaces.com)
    #[arg(long)]
    pub bucket_url: String,
}

/// Output structure for list command (JSON format)
#[derive(Debug, Serialize)]
struct ListOutput {
    bucket: String,
    items: Vec<ObjectInfo>,
    truncated: bool,
}

/// Execute the list command
pub async fn execute(
    args: ListArgs,
    provider: &dyn StoreProvider,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let locator = match decompose(&args.bucket_url) {
        Ok(locator) => locator,
        Err(e) => {
            tracing::error!(url = %args.bucket_url, error = %e, "invalid bucket URL");
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };
    let bucket = locator.bucket.clone();

    let store = match provider.store_for(&locator).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(bucket = %bucket, error = %e, "failed to create client");
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let result = match store.list_objects(&locator).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(bucket = %bucket, error = %e, "failed to list objects");
            formatter.error(&format!("Failed to list items in bucket {bucket}: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    tracing::info!(bucket = %bucket, count = result.items.len(), truncated = result.truncated, "listed objects");

    if !formatter.is_json() {
        for line in render_listing(&bucket, &result) {
            formatter.println(&line);
        }
    }

    if let Some(warning) = truncation_warning(&bucket, &result) {
        formatter.warning(&warning);
    }

    if formatter.is_json() {
        formatter.json(&ListOutput {
            bucket,
            items: result.items,
            truncated: result.truncated,
        });
    }

    ExitCode::Success
}

/// Human-readable report of one listing page
fn render_listing(bucket: &str, result: &ListResult) -> Vec<String> {
    if result.items.is_empty() {
        return vec![format!("No files found in bucket {bucket}")];
    }

    std::iter::once(format!("Files in {bucket}:"))
        .chain(result.items.iter().map(format_item))
        .collect()
}

fn truncation_warning(bucket: &str, result: &ListResult) -> Option<String> {
    result.truncated.then(|| {
        format!(
            "Only the first {} objects of bucket {bucket} are shown; the listing is truncated",
            result.items.len()
        )
    })
}

fn format_item(item: &ObjectInfo) -> String {
    let date = item
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(19));
    let size = item.size_human.as_deref().unwrap_or("0 B");
    format!("[{date}] {size:>10} {}", item.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{quiet, MockStore, StaticProvider};
    use spc_core::Error;

    fn args(bucket_url: &str) -> ListArgs {
        ListArgs {
            bucket_url: bucket_url.to_string(),
        }
    }

    #[test]
    fn test_format_item() {
        let mut item = ObjectInfo::file("photos/cat.png", 2048);
        item.last_modified = jiff::Timestamp::from_second(0).ok();

        let line = format_item(&item);
        assert!(line.starts_with("[1970-01-01 00:00:00]"));
        assert!(line.contains("2 KiB"));
        assert!(line.ends_with(" photos/cat.png"));
    }

    #[test]
    fn test_format_item_without_date() {
        let line = format_item(&ObjectInfo::file("a.txt", 1));
        assert!(line.starts_with(&format!("[{}]", " ".repeat(19))));
        assert!(line.ends_with(" a.txt"));
    }

    #[test]
    fn test_render_listing() {
        let result = ListResult {
            items: vec![ObjectInfo::file("a.txt", 1), ObjectInfo::file("dir/b.txt", 2)],
            truncated: false,
        };

        let lines = render_listing("media", &result);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Files in media:");
        assert!(lines[1].ends_with(" a.txt"));
        assert!(lines[2].ends_with(" dir/b.txt"));
        assert_eq!(truncation_warning("media", &result), None);
    }

    #[test]
    fn test_render_empty_listing() {
        let lines = render_listing("empty", &ListResult::default());
        assert_eq!(lines, vec!["No files found in bucket empty".to_string()]);
    }

    #[test]
    fn test_truncation_warning() {
        let result = ListResult {
            items: vec![ObjectInfo::file("a.txt", 1)],
            truncated: true,
        };

        let warning = truncation_warning("media", &result).unwrap();
        assert!(warning.contains("first 1 objects of bucket media"));
        assert!(warning.contains("truncated"));
    }

    #[test]
    fn test_list_output_json() {
        let mut item = ObjectInfo::file("a.txt", 1024);
        item.last_modified = jiff::Timestamp::from_second(0).ok();
        let output = ListOutput {
            bucket: "media".to_string(),
            items: vec![item],
            truncated: true,
        };

        insta::assert_json_snapshot!(output, @r#"
        {
          "bucket": "media",
          "items": [
            {
              "key": "a.txt",
              "size_bytes": 1024,
              "size_human": "1 KiB",
              "last_modified": "1970-01-01T00:00:00Z"
            }
          ],
          "truncated": true
        }
        "#);
    }

    #[tokio::test]
    async fn test_list_objects() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .withf(|locator| locator.bucket == "media" && locator.region == "ams3")
            .times(1)
            .returning(|_| {
                Ok(ListResult {
                    items: vec![ObjectInfo::file("a.txt", 1), ObjectInfo::file("b.txt", 2)],
                    truncated: false,
                })
            });
        let provider = StaticProvider::new(store);

        let code = execute(
            args("https://media.ams3.digitaloceanspaces.com"),
            &provider,
            quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_list_empty_bucket() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .times(1)
            .returning(|_| Ok(ListResult::default()));
        let provider = StaticProvider::new(store);

        let code = execute(
            args("https://empty.ams3.digitaloceanspaces.com/"),
            &provider,
            quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_list_missing_bucket() {
        let mut store = MockStore::new();
        store
            .expect_list_objects()
            .times(1)
            .returning(|_| Err(Error::NotFound("gone".into())));
        let provider = StaticProvider::new(store);

        let code = execute(
            args("https://gone.ams3.digitaloceanspaces.com/"),
            &provider,
            quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_malformed_url() {
        let provider = StaticProvider::new(MockStore::new());

        let code = execute(args("https://onlyhost/"), &provider, quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
        assert_eq!(provider.requests(), 0);
    }
}
