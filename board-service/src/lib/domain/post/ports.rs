use async_trait::async_trait;

use super::models::CreatePostCommand;
use super::models::Post;
use super::models::PostDraft;
use super::models::PostId;
use super::models::PostPage;
use super::models::PostQuery;
use crate::post::errors::PostError;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// List one page of posts, newest first.
    ///
    /// # Arguments
    /// * `query` - Normalised page, limit and search term
    ///
    /// # Returns
    /// Page of posts plus the total page count for the same filter
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, query: PostQuery) -> Result<PostPage, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// Replace title and content of an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: PostId) -> Result<(), PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Retrieve the page of posts matching `query`, ordered by creation time
    /// then id, both descending.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, PostError>;

    /// Count every post matching the search filter of `query`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self, query: &PostQuery) -> Result<u64, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Persist a new post; storage assigns the id and creation time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, author: &str, draft: PostDraft) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: PostId) -> Result<(), PostError>;
}
