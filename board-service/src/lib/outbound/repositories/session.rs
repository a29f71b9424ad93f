use async_trait::async_trait;
use auth::Session;
use auth::SessionError;
use auth::SessionId;
use auth::SessionStore;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

fn storage_error(e: sqlx::Error) -> SessionError {
    SessionError::Storage(e.to_string())
}

/// Session storage shared by every instance pointing at the same database.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn put(&self, session: Session) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id)
            DO UPDATE SET user_id = EXCLUDED.user_id, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(session.id.as_str())
        .bind(&session.user_id)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, created_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        // A stored id that no longer parses is treated as absent.
        Ok(row.and_then(|r| {
            SessionId::parse(&r.session_id).map(|id| Session {
                id,
                user_id: r.user_id,
                created_at: r.created_at,
            })
        }))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}
