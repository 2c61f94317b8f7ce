//! Object-storage fetch for externally stored email content.
//!
//! The inbound-mail service writes large messages to a bucket and puts
//! a reference in the event instead of the content. This client reads
//! them back with a path-style GET (`{endpoint}/{bucket}/{key}`).

use async_trait::async_trait;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::pipeline::types::ContentStore;

/// Path-style HTTP object store client.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ContentStore for HttpObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        let url = format!("{}/{bucket}/{key}", self.endpoint);
        debug!(%url, "Fetching stored object");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::BadStatus {
                status: status.as_u16(),
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        response.text().await.map_err(|e| StorageError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
