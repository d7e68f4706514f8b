use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Role;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_profile::delete_profile;
use super::handlers::get_profile::get_profile;
use super::handlers::health::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate as auth_middleware;
use super::middleware::authorize;
use crate::domain::user::ports::UserServicePort;

/// Roles admitted to the self-service profile routes. Membership is exact,
/// so admins are listed explicitly.
const PROFILE_ROLES: &[Role] = &[Role::User, Role::Admin];

/// Roles admitted to the account administration routes.
const ADMIN_ROLES: &[Role] = &[Role::Admin];

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    // route_layer runs outermost-last: authentication always precedes the
    // role check, which always precedes the handler.
    let profile_routes = Router::new()
        .route(
            "/api/user/me",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route_layer(middleware::from_fn(|req: Request, next| {
            authorize(PROFILE_ROLES, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/api/user", get(list_users))
        .route_layer(middleware::from_fn(|req: Request, next| {
            authorize(ADMIN_ROLES, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .merge(profile_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
