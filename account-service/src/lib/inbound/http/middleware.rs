use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified identity attached to a request by the authentication middleware.
///
/// Present in request extensions if and only if token verification
/// succeeded; the fields are exactly the token's claims and are never
/// re-fetched from the store within the same request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

/// Middleware that verifies the bearer token and attaches the resolved
/// identity to the request.
///
/// The raw token value is never logged or persisted.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "token verification failed");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    // The subject claim must be a user id; anything else is an incomplete
    // payload even though the signature checked out.
    let id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "token subject is not a user id");
        ApiError::Unauthorized("invalid token payload".to_string()).into_response()
    })?;

    req.extensions_mut().insert(CurrentUser {
        id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Role check running after `authenticate`.
///
/// Membership is exact: a role passes only if it is listed in `allowed`.
pub async fn authorize(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Identity is attached by `authenticate` before this runs; a missing one
    // means the gate was bypassed, which must never pass.
    let current = req.extensions().get::<CurrentUser>().ok_or_else(|| {
        ApiError::Unauthorized("token not provided".to_string()).into_response()
    })?;

    if !allowed.contains(&current.role) {
        return Err(ApiError::Forbidden("insufficient permissions".to_string()).into_response());
    }

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("token not provided".to_string()).into_response())?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("token format invalid".to_string()).into_response())?;

    // Exactly `Bearer <token>`, with a non-empty token portion
    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::Unauthorized("token format invalid".to_string()).into_response()),
    }
}
