use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::post::errors::PostFieldError;

/// Post entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Storage assigned post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty post title of at most 200 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, PostFieldError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(PostFieldError::Empty("title"))
        } else if length > Self::MAX_LENGTH {
            Err(PostFieldError::TooLong {
                field: "title",
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-empty post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    const MAX_LENGTH: usize = 20_000;

    pub fn new(content: String) -> Result<Self, PostFieldError> {
        let length = content.chars().count();
        if content.trim().is_empty() {
            Err(PostFieldError::Empty("content"))
        } else if length > Self::MAX_LENGTH {
            Err(PostFieldError::TooLong {
                field: "content",
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(content))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated title and content pair used for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: PostTitle,
    pub content: PostContent,
}

impl PostDraft {
    pub fn new(title: PostTitle, content: PostContent) -> Self {
        Self { title, content }
    }
}

/// Domain command for creating a post
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author: String,
    pub draft: PostDraft,
}

impl CreatePostCommand {
    pub fn new(author: impl Into<String>, draft: PostDraft) -> Self {
        Self {
            author: author.into(),
            draft,
        }
    }
}

/// Listing query: one page, optionally filtered by a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    page: u32,
    limit: u32,
    search: Option<String>,
}

impl PostQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a query from raw query string values.
    ///
    /// Missing, non-numeric or non-positive values fall back to the defaults;
    /// an oversized limit is capped; a blank search term means no filter.
    pub fn parse(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(Self::DEFAULT_PAGE);
        let limit = parse_positive(limit)
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT);
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            page,
            limit,
            search,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether a post satisfies the search filter (case-insensitive
    /// substring of title or content).
    pub fn matches(&self, post: &Post) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                post.title.as_str().to_lowercase().contains(&term)
                    || post.content.as_str().to_lowercase().contains(&term)
            }
        }
    }

    /// Number of pages needed for `total` matching posts.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self::parse(None, None, None)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_pages: u64,
}
