use db::{
    DatabaseConnection, DbErr,
    models::generated_image::{
        ANONYMOUS_USER_ID, CreateGeneratedImage, DEFAULT_LIST_LIMIT, GeneratedImage,
    },
};
use serde::Deserialize;
use thiserror::Error;
use ts_rs::TS;

use super::generation::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Prompt and image_url are required")]
    MissingFields,
    #[error("Width and height must be positive")]
    InvalidDimensions,
    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Direct registration of a pre-existing prompt/image pair, bypassing the
/// generation provider.
#[derive(Debug, Clone, Deserialize, TS)]
pub struct SaveImageParams {
    pub prompt: Option<String>,
    pub image_url: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub user_id: Option<String>,
}

#[derive(Clone, Default)]
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Newest-first history for one identity. Pure read path.
    pub async fn list(
        &self,
        db: &DatabaseConnection,
        user_id: Option<&str>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<GeneratedImage>> {
        let user_id = user_id.unwrap_or(ANONYMOUS_USER_ID);
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let offset = offset.unwrap_or(0);
        Ok(GeneratedImage::list_for_user(db, user_id, limit, offset).await?)
    }

    /// Saves a record the caller already holds. Unlike orchestrated
    /// generation there is no artifact to fall back to, so a store failure
    /// here is fatal.
    pub async fn save_direct(
        &self,
        db: &DatabaseConnection,
        params: SaveImageParams,
    ) -> Result<GeneratedImage> {
        let prompt = params.prompt.as_deref().unwrap_or_default();
        let image_url = params.image_url.as_deref().unwrap_or_default();
        if prompt.trim().is_empty() || image_url.trim().is_empty() {
            return Err(HistoryError::MissingFields);
        }

        let width = params.width.unwrap_or(DEFAULT_WIDTH);
        let height = params.height.unwrap_or(DEFAULT_HEIGHT);
        if width <= 0 || height <= 0 {
            return Err(HistoryError::InvalidDimensions);
        }

        let create = CreateGeneratedImage {
            prompt: prompt.to_string(),
            image_url: image_url.to_string(),
            width,
            height,
            user_id: params
                .user_id
                .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string()),
        };
        Ok(GeneratedImage::create(db, &create).await?)
    }
}
