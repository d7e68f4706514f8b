use axum::extract::State;
use axum::http::StatusCode;

use super::get_profile::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(StatusCode::OK, users.iter().map(Into::into).collect())
        })
}
