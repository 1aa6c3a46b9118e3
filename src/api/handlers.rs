use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::ApiState;
use super::error::ApiError;
use crate::common::{CreateMessageRequest, Message};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// OPTIONS /api/messages
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state
        .with_store(|store| store.list_messages())
        .await
        .map_err(ApiError::List)?;
    Ok(Json(messages))
}

/// POST /api/messages
///
/// The body is decoded regardless of `Content-Type`; anything that is not a
/// JSON object with non-empty `content` and `sender` strings is rejected.
pub async fn create_message(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    let request = match serde_json::from_slice::<CreateMessageRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            log::debug!("Undecodable create payload: {err}");
            return Err(ApiError::MissingFields);
        }
    };
    let new_message = request.validate().ok_or(ApiError::MissingFields)?;

    let message = state
        .with_store(move |store| store.create_message(&new_message))
        .await
        .map_err(ApiError::Create)?;

    log::info!("Stored message {} from {}", message.id, message.sender);
    Ok(Json(message))
}
