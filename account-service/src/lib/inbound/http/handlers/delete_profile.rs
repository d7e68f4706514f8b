use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .user_service
        .delete_user(&current.id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
