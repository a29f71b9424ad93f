use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_post::PostRequestBody;
use super::get_post::parse_post_id;
use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<PostRequestBody>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .update_post(post_id, body.try_into_draft()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
