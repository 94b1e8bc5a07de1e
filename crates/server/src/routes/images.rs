use axum::{
    Json, Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::generated_image::GeneratedImage;
use serde::{Deserialize, Serialize};
use services::services::history::{HistoryError, SaveImageParams};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// Pagination params arrive as raw strings; non-numeric values are treated
/// as absent and fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, TS)]
pub struct HistoryResponse {
    pub images: Vec<GeneratedImage>,
}

#[derive(Debug, Serialize, TS)]
pub struct SavedImageResponse {
    pub image: GeneratedImage,
}

fn parse_pagination(value: Option<&str>) -> Option<u64> {
    value.and_then(|raw| raw.trim().parse().ok())
}

fn map_list_error(err: HistoryError) -> ApiError {
    match err {
        HistoryError::Database(db_err) => {
            tracing::error!(error = %db_err, "Failed to fetch image history");
            ApiError::Internal("Failed to fetch images".to_string())
        }
        other => other.into(),
    }
}

pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<ResponseJson<ApiResponse<HistoryResponse>>, ApiError> {
    let images = state
        .history()
        .list(
            &state.db().conn,
            query.user_id.as_deref(),
            parse_pagination(query.limit.as_deref()),
            parse_pagination(query.offset.as_deref()),
        )
        .await
        .map_err(map_list_error)?;
    Ok(ResponseJson(ApiResponse::success(HistoryResponse { images })))
}

pub async fn save_image(
    State(state): State<AppState>,
    Json(params): Json<SaveImageParams>,
) -> Result<ResponseJson<ApiResponse<SavedImageResponse>>, ApiError> {
    let image = state.history().save_direct(&state.db().conn, params).await?;
    Ok(ResponseJson(ApiResponse::success(SavedImageResponse { image })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/images", get(list_images).post(save_image))
}
