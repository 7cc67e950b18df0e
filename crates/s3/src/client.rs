//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from spc-core.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;

use spc_core::{
    Credentials, Error, ListResult, ObjectInfo, ObjectStore, ProviderConfig, Result,
    StorageLocator,
};

/// S3 client wrapper bound to one service endpoint
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client for `endpoint` in `region`
    pub async fn new(
        endpoint: &str,
        region: &str,
        credentials: &Credentials,
        provider: &ProviderConfig,
    ) -> Result<Self> {
        let static_credentials = aws_credential_types::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None, // session token
            None, // expiry
            "spc-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(static_credentials)
            .region(aws_config::Region::new(region.to_string()))
            .endpoint_url(endpoint);

        if let Some(timeout) = &provider.timeout {
            loader = loader.timeout_config(
                aws_smithy_types::timeout::TimeoutConfig::builder()
                    .connect_timeout(Duration::from_millis(timeout.connect_ms))
                    .read_timeout(Duration::from_millis(timeout.read_ms))
                    .build(),
            );
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(provider.force_path_style)
            .build();

        tracing::debug!(endpoint, region, "created S3 client");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(
        &self,
        target: &StorageLocator,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let response = self
            .inner
            .put_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .body(body)
            .set_content_type(content_type.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &target.to_string()))?;

        let mut info = ObjectInfo::file(&target.key, size);
        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }
        info.content_type = content_type;
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }

    async fn list_objects(&self, bucket: &StorageLocator) -> Result<ListResult> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(&bucket.bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &bucket.bucket))?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let key = object.key().unwrap_or_default();
                let mut info = ObjectInfo::file(key, object.size().unwrap_or(0));

                if let Some(modified) = object.last_modified() {
                    info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
                }

                if let Some(etag) = object.e_tag() {
                    info.etag = Some(etag.trim_matches('"').to_string());
                }

                if let Some(sc) = object.storage_class() {
                    info.storage_class = Some(sc.as_str().to_string());
                }

                info
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn delete_object(&self, target: &StorageLocator) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &target.to_string()))?;

        Ok(())
    }
}

/// Convert an SDK failure into the spc-core error taxonomy
fn map_sdk_error<E, R>(err: SdkError<E, R>, resource: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let service_error = err.as_service_error();
    let code = service_error.and_then(|e| e.code()).map(str::to_string);
    let detail = match service_error.and_then(|e| e.message()) {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    classify_error(code.as_deref(), resource, detail)
}

fn classify_error(code: Option<&str>, resource: &str, detail: String) -> Error {
    match code {
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => Error::NotFound(resource.to_string()),
        Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "Forbidden") => {
            Error::Auth(format!("{resource}: {detail}"))
        }
        _ => Error::Transport(format!("{resource}: {detail}")),
    }
}
