//! Resolves raw email content referenced by an inbound event.

use std::sync::Arc;

use tracing::info;

use crate::error::PipelineError;
use crate::pipeline::types::{ContentStore, EmailEvent};

/// Resolves the raw message text for an event: stored object first,
/// inline payload second. Events carrying neither are unprocessable.
pub struct ContentLocator {
    store: Arc<dyn ContentStore>,
}

impl ContentLocator {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, event: &EmailEvent) -> Result<String, PipelineError> {
        if let Some(receipt) = &event.receipt {
            info!(
                bucket = %receipt.bucket_name,
                key = %receipt.object_key,
                "Fetching email content from storage"
            );
            let content = self
                .store
                .fetch(&receipt.bucket_name, &receipt.object_key)
                .await?;
            return Ok(content);
        }

        if let Some(content) = &event.content
            && !content.is_empty()
        {
            return Ok(content.clone());
        }

        Err(PipelineError::ContentUnavailable)
    }
}
