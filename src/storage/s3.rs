//! S3 adapter: thin wrapper over aws-sdk-s3 scoped to a single bucket.

use aws_config::Region;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use crate::config::Config;
use crate::storage::{ObjectStore, StoreError};

pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(config: &Config) -> Self {
        let mut loader = aws_config::ConfigLoader::default()
            .credentials_provider(
                aws_config::environment::EnvironmentVariableCredentialsProvider::new(),
            )
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let conf = loader.load().await;

        S3Store {
            client: Client::new(&conf),
            bucket: config.bucket.clone(),
        }
    }
}

/// Collapse an SDK failure into the closed [`StoreError`] variant set. The
/// provider code `NoSuchKey` is the only one treated as "absent"; everything
/// else keeps its code, message and source chain for the translator.
fn from_sdk<E>(err: SdkError<E>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(context) => {
            let svc = context.into_err();
            let code = svc.code().unwrap_or("UnknownError").to_string();
            let message = match svc.message() {
                Some(m) => m.to_string(),
                None => svc.to_string(),
            };
            if code == "NoSuchKey" {
                StoreError::NotFound { message }
            } else {
                let cause = std::error::Error::source(&svc).map(|c| c.to_string());
                StoreError::Provider {
                    code,
                    message,
                    cause,
                }
            }
        }
        // Construction, dispatch, timeout and malformed-response failures
        // never carry a provider code.
        other => StoreError::Provider {
            code: "RequestError".to_string(),
            message: other.to_string(),
            cause: std::error::Error::source(&other).map(|c| c.to_string()),
        },
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(from_sdk)?;

        let data = resp.body.collect().await.map_err(|e| {
            StoreError::provider("ByteStreamError", e.to_string())
        })?;
        Ok(data.into_bytes())
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(from_sdk)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(from_sdk)?;
        Ok(())
    }
}
