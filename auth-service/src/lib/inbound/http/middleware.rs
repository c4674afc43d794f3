use std::str::FromStr;

use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::models::Principal;
use crate::account::models::Role;
use crate::account::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Authentication guard.
///
/// Validates the bearer session token, rejects revoked sessions, and attaches
/// the resolved [`Principal`] to request extensions for downstream handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        ApiError::Unauthorized("Missing or malformed Authorization header".to_string())
            .into_response()
    })?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("Session token validation failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let revoked = state
        .account_service
        .is_session_revoked(&claims.jti)
        .await
        .map_err(|e| {
            tracing::error!("Revocation check failed: {}", e);
            ApiError::InternalServerError("Revocation check failed".to_string()).into_response()
        })?;

    if revoked {
        return Err(
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response(),
        );
    }

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Malformed subject in session token: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let role = Role::from_str(&claims.role).map_err(|e| {
        tracing::error!("Malformed role in session token: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(Principal {
        user_id,
        name: claims.name,
        role,
    });

    Ok(next.run(req).await)
}

/// Authorization guard with any-of semantics.
///
/// Layered inside [`authenticate`]; expects the Principal extension to be
/// present already.
pub async fn require_role(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = req.extensions().get::<Principal>().ok_or_else(|| {
        ApiError::Unauthorized("Missing or malformed Authorization header".to_string())
            .into_response()
    })?;

    if !allowed.contains(&principal.role) {
        return Err(ApiError::Forbidden(
            "You do not have permission to access this resource".to_string(),
        )
        .into_response());
    }

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
