use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/password-reset-request`
///
/// The response is identical whether or not the email belongs to an account,
/// including when the field is absent entirely.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    if let Some(email) = body.email.as_deref() {
        state.account_service.request_password_reset(email).await?;
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("If the email is registered, a reset link has been sent"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestPasswordResetBody {
    email: Option<String>,
}
