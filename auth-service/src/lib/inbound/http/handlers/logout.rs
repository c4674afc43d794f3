use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/logout`
///
/// Revokes the presented session so the guard rejects it from now on.
/// Succeeds even without a valid token; there is nothing useful to tell a
/// client whose session was already gone.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        if let Ok(claims) = state.authenticator.validate_token(token) {
            let expires_at =
                DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
            state.account_service.logout(&claims.jti, expires_at).await?;
        }
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Logged out"),
    ))
}
