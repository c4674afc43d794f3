use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::RoleError;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::models::User;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::CREATE_USER_SCHEMA;

/// `POST /api/auth/register`, also mounted at `POST /api/auth` for
/// compatibility with clients of the old route.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let trimmed = CREATE_USER_SCHEMA
        .validate(&body)
        .map_err(ApiError::Validation)?;

    let body: RegisterRequestBody = serde_json::from_value(Value::Object(trimmed))
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration, after schema validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    name: String,
    lastname: String,
    email: String,
    password: String,
    #[serde(rename = "confirmPassword")]
    confirm_password: String,
    role: Option<String>,
    avatar: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let role = match self.role {
            Some(raw) => Role::from_str(&raw)?,
            None => Role::default(),
        };

        Ok(RegisterCommand {
            name: self.name,
            lastname: self.lastname,
            email,
            password: self.password,
            confirm_password: self.confirm_password,
            role,
            avatar: self.avatar,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            lastname: user.lastname.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.to_string(),
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}
