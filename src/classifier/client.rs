use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::{BatchRequest, ClassificationResult};

use super::{schema::decode_results, BatchClassifier, ClassifyError};

#[derive(Clone)]
pub struct HttpClassifier {
    http: Client,
}

impl HttpClassifier {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, ClassifyError> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self::new(http))
    }
}

#[async_trait]
impl BatchClassifier for HttpClassifier {
    async fn classify_batch(
        &self,
        endpoint: &Url,
        request: &BatchRequest,
    ) -> Result<Vec<ClassificationResult>, ClassifyError> {
        let response = self.http.post(endpoint.clone()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status { status, body });
        }

        let body = response.bytes().await?;
        let results = decode_results(&body)?;
        tracing::debug!(
            target: "classifier",
            endpoint = %endpoint,
            results = results.len(),
            "batch classified"
        );
        Ok(results)
    }
}
