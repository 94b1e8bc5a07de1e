use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const PROVIDER_URL_ENV: &str = "IMAGEGEN_PROVIDER_URL";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Image provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Image provider responded with status {0}")]
    Status(StatusCode),
    #[error("Image provider returned no image")]
    EmptyResponse,
}

/// Remote generation capability with a single operation. Object-safe so
/// tests can substitute deterministic doubles for the network client.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Requests one image for `prompt` at the given dimensions and returns
    /// a reference to it. A single attempt; failures are not retried.
    async fn generate(&self, prompt: &str, width: i64, height: i64)
    -> Result<String, ProviderError>;
}

/// Response body of the generation endpoint: a list of image references,
/// of which the first is the produced image.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    data: Vec<String>,
}

pub struct StableDiffusionClient {
    client: reqwest::Client,
    base_url: String,
}

impl StableDiffusionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var(PROVIDER_URL_ENV)
            .map_err(|_| anyhow::anyhow!("{PROVIDER_URL_ENV} is not set"))?;
        Ok(Self::new(base_url))
    }
}

#[async_trait]
impl ImageProvider for StableDiffusionClient {
    async fn generate(
        &self,
        prompt: &str,
        width: i64,
        height: i64,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("prompt", prompt),
                ("width", &width.to_string()),
                ("height", &height.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "Image provider returned a non-success status");
            return Err(ProviderError::Status(status));
        }

        let body = response.json::<GenerateResponse>().await?;
        body.data
            .into_iter()
            .find(|url| !url.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
