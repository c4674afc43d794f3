use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::MessageData;
use crate::account::models::Principal;

/// `GET /api/auth/user-profile` - any authenticated user
pub async fn user_profile(Extension(principal): Extension<Principal>) -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(format!("Welcome {}", principal.name)),
    )
}

/// `GET /api/auth/admin-panel` - role admin only
pub async fn admin_panel(Extension(principal): Extension<Principal>) -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(format!("Welcome to the admin panel, {}", principal.name)),
    )
}

/// `GET /api/auth/moderator-section` - role moderator or admin
pub async fn moderator_section(
    Extension(principal): Extension<Principal>,
) -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(format!(
            "Welcome to the moderator section, {}",
            principal.name
        )),
    )
}
