use axum::{Json, Router, extract::State, response::Json as ResponseJson, routing::post};
use serde::Deserialize;
use services::services::generation::GenerationOutcome;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// `prompt` is accepted as any JSON value so a non-string prompt takes the
/// validation failure path instead of a deserialization rejection.
#[derive(Debug, Deserialize, TS)]
pub struct GenerateImageRequest {
    pub prompt: Option<serde_json::Value>,
}

pub async fn generate_image(
    State(state): State<AppState>,
    Json(payload): Json<GenerateImageRequest>,
) -> Result<ResponseJson<ApiResponse<GenerationOutcome>>, ApiError> {
    let prompt = payload.prompt.as_ref().and_then(|value| value.as_str());
    let outcome = state
        .generation()
        .handle_generate(&state.db().conn, prompt)
        .await?;
    Ok(ResponseJson(ApiResponse::success(outcome)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-image", post(generate_image))
}
