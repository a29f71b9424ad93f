use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state
        .post_service
        .get_post(post_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

pub(super) fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    raw.parse::<i64>()
        .map(PostId)
        .map_err(|_| ApiError::BadRequest(format!("Invalid post id: {}", raw)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            title: post.title.as_str().to_string(),
            content: post.content.as_str().to_string(),
            author: post.author.clone(),
            created_at: post.created_at,
        }
    }
}
