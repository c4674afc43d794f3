use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::protected::admin_panel;
use super::handlers::protected::moderator_section;
use super::handlers::protected::user_profile;
use super::handlers::register::register;
use super::handlers::request_password_reset::request_password_reset;
use super::handlers::reset_password::reset_password;
use super::handlers::verify_email::verify_email;
use super::middleware::authenticate as auth_guard;
use super::middleware::require_role;
use crate::account::models::Role;
use crate::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        // Compatibility alias for clients still posting to the bare prefix
        .route("/api/auth", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify/:token", get(verify_email))
        .route("/api/auth/password-reset-request", post(request_password_reset))
        .route("/api/auth/reset-password/:token", post(reset_password))
        .route("/api/auth/logout", post(logout));

    let admin_routes = Router::new()
        .route("/api/auth/admin-panel", get(admin_panel))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(&[Role::Admin], req, next)
        }));

    let moderator_routes = Router::new()
        .route("/api/auth/moderator-section", get(moderator_section))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(&[Role::Moderator, Role::Admin], req, next)
        }));

    let protected_routes = Router::new()
        .route("/api/auth/user-profile", get(user_profile))
        .merge(admin_routes)
        .merge(moderator_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
