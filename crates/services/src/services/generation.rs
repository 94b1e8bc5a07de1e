use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::{
    DatabaseConnection,
    models::generated_image::{ANONYMOUS_USER_ID, CreateGeneratedImage, GeneratedImage},
};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use super::provider::{ImageProvider, ProviderError};

/// Dimensions used when the orchestrator performs generation itself.
pub const DEFAULT_WIDTH: i64 = 1024;
pub const DEFAULT_HEIGHT: i64 = 1024;

const NOT_SAVED_WARNING: &str = "Image generated but not saved to history";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Prompt is required and must be a string")]
    MissingPrompt,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Outcome of one orchestrated generation. `id` is present exactly when the
/// record reached history; otherwise `warning` explains the degraded result.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub image_url: String,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Clone)]
pub struct GenerationService {
    provider: Arc<dyn ImageProvider>,
}

impl GenerationService {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Turns a raw prompt into a persisted, returnable generation.
    ///
    /// The provider call is fatal for the request; the history insert is
    /// best-effort. When the insert fails the caller still receives the
    /// generated image, with a locally assigned timestamp and a warning in
    /// place of the record id.
    pub async fn handle_generate(
        &self,
        db: &DatabaseConnection,
        prompt: Option<&str>,
    ) -> Result<GenerationOutcome> {
        let prompt = match prompt {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Err(GenerationError::MissingPrompt),
        };

        let image_url = self
            .provider
            .generate(prompt, DEFAULT_WIDTH, DEFAULT_HEIGHT)
            .await?;

        let create = CreateGeneratedImage {
            prompt: prompt.to_string(),
            image_url: image_url.clone(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            user_id: ANONYMOUS_USER_ID.to_string(),
        };
        match GeneratedImage::create(db, &create).await {
            Ok(saved) => Ok(GenerationOutcome {
                image_url,
                prompt: prompt.to_string(),
                timestamp: saved.created_at,
                id: Some(saved.id),
                warning: None,
            }),
            Err(err) => {
                tracing::error!(error = %err, "Failed to save generated image to history");
                Ok(GenerationOutcome {
                    image_url,
                    prompt: prompt.to_string(),
                    timestamp: Utc::now(),
                    id: None,
                    warning: Some(NOT_SAVED_WARNING.to_string()),
                })
            }
        }
    }
}
