use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Credentials;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::LOGIN_SCHEMA;

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let trimmed = LOGIN_SCHEMA.validate(&body).map_err(ApiError::Validation)?;

    let body: LoginRequestBody = serde_json::from_value(Value::Object(trimmed))
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let outcome = state
        .account_service
        .login(Credentials {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            message: format!("Welcome {}", outcome.user.name),
            token: outcome.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
}
