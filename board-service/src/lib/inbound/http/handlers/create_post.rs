use auth::Identity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostDraft;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostFieldError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<PostRequestBody>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand::new(identity.user_id(), body.try_into_draft()?);

    state
        .post_service
        .create_post(command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for creating or replacing a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRequestBody {
    title: String,
    content: String,
}

impl PostRequestBody {
    pub(super) fn try_into_draft(self) -> Result<PostDraft, PostFieldError> {
        let title = PostTitle::new(self.title)?;
        let content = PostContent::new(self.content)?;
        Ok(PostDraft::new(title, content))
    }
}

impl From<PostFieldError> for ApiError {
    fn from(err: PostFieldError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
