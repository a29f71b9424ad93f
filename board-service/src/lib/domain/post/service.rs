use std::sync::Arc;

use async_trait::async_trait;

use super::models::CreatePostCommand;
use super::models::Post;
use super::models::PostDraft;
use super::models::PostId;
use super::models::PostPage;
use super::models::PostQuery;
use crate::post::errors::PostError;
use crate::post::ports::PostRepository;
use crate::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn list_posts(&self, query: PostQuery) -> Result<PostPage, PostError> {
        let posts = self.repository.list(&query).await?;
        let total = self.repository.count(&query).await?;

        Ok(PostPage {
            posts,
            total_pages: query.total_pages(total),
        })
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let post = self
            .repository
            .create(&command.author, command.draft)
            .await?;

        tracing::info!(post_id = %post.id, author = %post.author, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError> {
        let post = self.repository.update(id, draft).await?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), PostError> {
        self.repository.delete(id).await?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
