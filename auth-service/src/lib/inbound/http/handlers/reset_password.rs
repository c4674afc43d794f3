use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/reset-password/:token`
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let password = body
        .password
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::UnprocessableEntity("Password is required.".to_string()))?;

    state
        .account_service
        .reset_password(&token, password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Password has been reset"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordBody {
    password: Option<String>,
}
