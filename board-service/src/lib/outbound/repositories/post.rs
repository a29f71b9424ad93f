use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostDraft;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostQuery;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::post::errors::PostError;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            title: PostTitle::new(row.title)?,
            content: PostContent::new(row.content)?,
            author: row.author,
            created_at: row.created_at,
        })
    }
}

/// `ILIKE` pattern for a search term, with wildcards in the term escaped.
fn search_pattern(query: &PostQuery) -> Option<String> {
    query.search().map(|term| {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM posts
            WHERE $1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern(query))
        .bind(i64::from(query.limit()))
        .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, PostError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE $1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1
            "#,
        )
        .bind(search_pattern(query))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn create(&self, author: &str, draft: PostDraft) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(draft.title.as_str())
        .bind(draft.content.as_str())
        .bind(author)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Post::try_from(row)
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(id.0)
        .bind(draft.title.as_str())
        .bind(draft.content.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Post::try_from)
            .transpose()?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let query = PostQuery::parse(None, None, Some("50%_off"));
        assert_eq!(search_pattern(&query).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(search_pattern(&PostQuery::default()), None);
    }
}
