use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are split rather than folded into one `save` so
/// the slug conflict-retry can tell a fresh write from a rewrite.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Ordering applied to post listings.
///
/// Always passed explicitly; repositories apply no default ordering of
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrdering {
    /// Newest publication first - the public listing order.
    #[default]
    PublishedDesc,
    /// Newest creation first - the manage listing order.
    CreatedDesc,
    /// Oldest creation first.
    CreatedAsc,
}

/// Parameters for the public post listing.
#[derive(Debug, Clone)]
pub struct PostQuery {
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
    /// Free-text term matched against title, content, and excerpt.
    pub search: Option<String>,
    /// Visibility cutoff: only posts published at or before this instant.
    pub as_of: DateTime<Utc>,
    pub ordering: PostOrdering,
}

impl PostQuery {
    pub fn latest(page: u64, per_page: u64) -> Self {
        Self {
            page,
            per_page,
            search: None,
            as_of: Utc::now(),
            ordering: PostOrdering::PublishedDesc,
        }
    }
}

/// One page of results plus totals for pagination controls.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// True when a post other than `exclude` already holds `slug`.
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;

    /// Find a post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Publicly visible posts matching `query`, paginated.
    async fn list_visible(&self, query: &PostQuery) -> Result<Page<Post>, RepoError>;

    /// Every post belonging to `owner_id`, regardless of status.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        ordering: PostOrdering,
    ) -> Result<Vec<Post>, RepoError>;
}
