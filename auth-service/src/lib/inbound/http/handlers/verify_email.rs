use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

/// `GET /api/auth/verify/:token`
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state.account_service.verify_email(&token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Email verified successfully"),
    ))
}
