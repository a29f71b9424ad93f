use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::get_post::parse_post_id;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<DeletePostResponseData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .delete_post(post_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeletePostResponseData {
                    id: post_id.0,
                    deleted: true,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePostResponseData {
    pub id: i64,
    pub deleted: bool,
}
