use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::inbound::http::validation::FieldViolation;

pub mod login;
pub mod logout;
pub mod protected;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod verify_email;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    Validation(Vec<FieldViolation>),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    Gone(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::Validation(violations) => {
                let errors: BTreeMap<String, String> = violations
                    .into_iter()
                    .map(|v| (v.field, v.message))
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation failed".to_string(),
                    Some(errors),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::Gone(msg) => (StatusCode::GONE, msg, None),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::PasswordMismatch
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidRole(_)
            | AccountError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::AccountUnverified => ApiError::Forbidden(err.to_string()),
            AccountError::InvalidOrExpiredToken => ApiError::Gone(err.to_string()),
            AccountError::Password(_)
            | AccountError::SessionToken(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(
        status_code: StatusCode,
        message: String,
        errors: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,

    /// Per-field messages, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Plain message payload for handlers whose whole response is a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
