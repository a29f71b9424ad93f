use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::get_post::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostPage;
use crate::domain::post::models::PostQuery;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<ApiSuccess<ListPostsResponseData>, ApiError> {
    state
        .post_service
        .list_posts(params.into_query())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Raw query string values; bad numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListPostsParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
}

impl ListPostsParams {
    fn into_query(self) -> PostQuery {
        PostQuery::parse(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.search.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPostsResponseData {
    pub posts: Vec<PostData>,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl From<&PostPage> for ListPostsResponseData {
    fn from(page: &PostPage) -> Self {
        Self {
            posts: page.posts.iter().map(PostData::from).collect(),
            total_pages: page.total_pages,
        }
    }
}
