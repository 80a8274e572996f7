mod client;
pub mod schema;

pub use client::HttpClassifier;
pub use schema::SchemaError;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::domain::{BatchRequest, ClassificationResult};

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected response shape: {0}")]
    Schema(#[from] SchemaError),
}

#[async_trait]
pub trait BatchClassifier: Send + Sync {
    async fn classify_batch(
        &self,
        endpoint: &Url,
        request: &BatchRequest,
    ) -> Result<Vec<ClassificationResult>, ClassifyError>;
}
