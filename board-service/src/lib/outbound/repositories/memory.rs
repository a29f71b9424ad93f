use std::collections::hash_map::Entry;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostDraft;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostQuery;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::post::errors::PostError;
use crate::user::errors::UserError;

/// Process-local credential store.
///
/// Used for tests and for `database.backend = "memory"`; contents are lost on
/// restart.
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        match users.entry(user.id.as_str().to_string()) {
            Entry::Occupied(_) => Err(UserError::DuplicateUser(user.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }
}

#[derive(Default)]
struct PostTable {
    next_id: i64,
    rows: BTreeMap<i64, Post>,
}

impl PostTable {
    fn matching<'a>(&'a self, query: &'a PostQuery) -> impl Iterator<Item = &'a Post> + 'a {
        self.rows.values().filter(move |post| query.matches(post))
    }
}

/// Process-local post storage with sequential ids.
#[derive(Default, Clone)]
pub struct InMemoryPostRepository {
    table: Arc<RwLock<PostTable>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, PostError> {
        let table = self.table.read().await;

        let mut posts: Vec<Post> = table.matching(query).cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(query.limit() as usize)
            .collect())
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, PostError> {
        let table = self.table.read().await;
        Ok(table.matching(query).count() as u64)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }

    async fn create(&self, author: &str, draft: PostDraft) -> Result<Post, PostError> {
        let mut table = self.table.write().await;

        table.next_id += 1;
        let post = Post {
            id: PostId(table.next_id),
            title: draft.title,
            content: draft.content,
            author: author.to_string(),
            created_at: Utc::now(),
        };
        table.rows.insert(post.id.0, post.clone());

        Ok(post)
    }

    async fn update(&self, id: PostId, draft: PostDraft) -> Result<Post, PostError> {
        let mut table = self.table.write().await;

        let post = table
            .rows
            .get_mut(&id.0)
            .ok_or(PostError::NotFound(id.to_string()))?;
        post.title = draft.title;
        post.content = draft.content;

        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let mut table = self.table.write().await;

        table
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PostError::NotFound(id.to_string()))
    }
}
