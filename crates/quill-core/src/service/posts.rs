//! Post service - creation, slug assignment, and publication transitions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::{DomainError, RepoError};
use crate::ports::{Page, PostOrdering, PostQuery, PostRepository};
use crate::slug::slugify;

/// Writes attempted before a slug race surfaces as a conflict.
const SLUG_WRITE_ATTEMPTS: u32 = 3;

/// Hard cap on listing page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Fields accepted when creating a post.
///
/// The owner always comes from the authenticated caller, never from here.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Fields accepted when updating a post. Absent fields stay untouched.
/// There is deliberately no owner field - ownership never changes.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Owns the post lifecycle: slug uniqueness and publication-state
/// invariants are enforced here, nowhere else.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Derive a slug from `candidate` that no other post currently holds.
    ///
    /// On collision an incrementing `-2`, `-3`, ... suffix is appended to
    /// the normalized base until a free slug is found. The check and the
    /// eventual write are separate steps; the write path retries on a
    /// unique-constraint violation to close that window.
    pub async fn assign_slug(
        &self,
        candidate: &str,
        exclude: Option<Uuid>,
    ) -> Result<String, DomainError> {
        let base = slugify(candidate);
        if base.is_empty() {
            return Err(DomainError::validation(
                "slug would be empty after normalization",
            ));
        }

        let mut slug = base.clone();
        let mut suffix = 2u64;
        while self
            .posts
            .slug_exists(&slug, exclude)
            .await
            .map_err(Self::store_error)?
        {
            slug = format!("{base}-{suffix}");
            suffix += 1;
        }
        Ok(slug)
    }

    /// Create a post for `owner_id`.
    ///
    /// The slug is derived from the title unless an explicit slug was
    /// supplied. Creating directly as published honors a supplied
    /// `published_at` (scheduled publish) and stamps now otherwise.
    pub async fn create(&self, owner_id: Uuid, input: CreatePost) -> Result<Post, DomainError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if input.content.trim().is_empty() {
            return Err(DomainError::validation("content must not be empty"));
        }

        let candidate = input.slug.clone().unwrap_or_else(|| title.clone());

        let mut post = Post::new(owner_id, title, String::new(), input.content);
        post.excerpt = input.excerpt;
        post.featured_image = input.featured_image;
        post.meta_title = input.meta_title;
        post.meta_description = input.meta_description;

        match input.status.unwrap_or(PostStatus::Draft) {
            PostStatus::Draft => {}
            PostStatus::Published => {
                post.status = PostStatus::Published;
                post.published_at = Some(input.published_at.unwrap_or_else(Utc::now));
            }
            PostStatus::Archived => {
                post.status = PostStatus::Archived;
                post.published_at = input.published_at;
            }
        }

        let post = self.write_with_slug(post, &candidate, None, true).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "post created");
        Ok(post)
    }

    /// Update a post's fields.
    ///
    /// Title edits never touch the slug - URLs stay stable. An explicit
    /// slug edit re-runs assignment with the post excluded from its own
    /// collision check, so resubmitting the current slug is a no-op.
    pub async fn update(
        &self,
        post_id: Uuid,
        caller: Uuid,
        input: UpdatePost,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned(post_id, caller).await?;

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::validation("title must not be empty"));
            }
            post.title = title;
        }
        if let Some(content) = input.content {
            if content.trim().is_empty() {
                return Err(DomainError::validation("content must not be empty"));
            }
            post.content = content;
        }
        if let Some(excerpt) = input.excerpt {
            post.excerpt = Some(excerpt);
        }
        if let Some(image) = input.featured_image {
            post.featured_image = Some(image);
        }
        if let Some(meta_title) = input.meta_title {
            post.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = input.meta_description {
            post.meta_description = Some(meta_description);
        }

        if let Some(status) = input.status {
            match status {
                PostStatus::Published => {
                    post.status = PostStatus::Published;
                    post.published_at = Some(input.published_at.unwrap_or_else(Utc::now));
                }
                PostStatus::Draft => {
                    post.status = PostStatus::Draft;
                    post.published_at = None;
                }
                PostStatus::Archived => {
                    post.status = PostStatus::Archived;
                }
            }
        } else if let Some(at) = input.published_at {
            if post.status == PostStatus::Draft {
                return Err(DomainError::validation(
                    "draft posts cannot carry a publication timestamp",
                ));
            }
            post.published_at = Some(at);
        }

        post.touch();

        match input.slug {
            Some(candidate) => {
                self.write_with_slug(post, &candidate, Some(post_id), false)
                    .await
            }
            None => self.posts.update(post).await.map_err(Self::store_error),
        }
    }

    /// Publish a post: status becomes `Published` and `published_at` is
    /// stamped unconditionally - re-publishing refreshes the timestamp.
    pub async fn publish(&self, post_id: Uuid, caller: Uuid) -> Result<Post, DomainError> {
        let mut post = self.owned(post_id, caller).await?;
        post.publish();
        let post = self.posts.update(post).await.map_err(Self::store_error)?;
        tracing::info!(post_id = %post.id, "post published");
        Ok(post)
    }

    /// Return a post to draft; its publication timestamp is cleared.
    pub async fn unpublish(&self, post_id: Uuid, caller: Uuid) -> Result<Post, DomainError> {
        let mut post = self.owned(post_id, caller).await?;
        post.unpublish();
        self.posts.update(post).await.map_err(Self::store_error)
    }

    /// Archive a post; `published_at` is left exactly as it was.
    pub async fn archive(&self, post_id: Uuid, caller: Uuid) -> Result<Post, DomainError> {
        let mut post = self.owned(post_id, caller).await?;
        post.archive();
        self.posts.update(post).await.map_err(Self::store_error)
    }

    /// Delete a post outright. The schema owns any cascades.
    pub async fn delete(&self, post_id: Uuid, caller: Uuid) -> Result<(), DomainError> {
        let post = self.owned(post_id, caller).await?;
        match self.posts.delete(post.id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::not_found("post", post_id)),
            Err(other) => Err(Self::store_error(other)),
        }
    }

    /// Resolve a public path segment: a UUID resolves by id, anything
    /// else by slug. Only visible posts resolve.
    pub async fn resolve_visible(
        &self,
        segment: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        let found = match Uuid::parse_str(segment) {
            Ok(id) => self.posts.find_by_id(id).await,
            Err(_) => self.posts.find_by_slug(segment).await,
        }
        .map_err(Self::store_error)?;

        found
            .filter(|post| post.is_visible(as_of))
            .ok_or_else(|| DomainError::not_found("post", segment))
    }

    /// Publicly visible posts, paginated, newest publication first unless
    /// the query says otherwise.
    pub async fn list_visible(&self, mut query: PostQuery) -> Result<Page<Post>, DomainError> {
        query.page = query.page.max(1);
        query.per_page = query.per_page.clamp(1, MAX_PAGE_SIZE);
        query.search = query
            .search
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        self.posts
            .list_visible(&query)
            .await
            .map_err(Self::store_error)
    }

    /// Every post belonging to `owner_id`, all statuses, newest first.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, DomainError> {
        self.posts
            .list_by_owner(owner_id, PostOrdering::CreatedDesc)
            .await
            .map_err(Self::store_error)
    }

    /// Load a post and enforce ownership. Non-owners receive the same
    /// NotFound as a missing id so existence is never disclosed.
    async fn owned(&self, post_id: Uuid, caller: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if !post.can_edit(caller) {
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(post)
    }

    /// Assign a slug and write, retrying on a unique-constraint violation.
    ///
    /// Two concurrent saves can both pass the existence check before
    /// either writes; the loser's write trips the unique index and lands
    /// here for a fresh suffix. Bounded - exhaustion surfaces Conflict.
    async fn write_with_slug(
        &self,
        mut post: Post,
        candidate: &str,
        exclude: Option<Uuid>,
        is_new: bool,
    ) -> Result<Post, DomainError> {
        let mut last_conflict = String::new();
        for attempt in 1..=SLUG_WRITE_ATTEMPTS {
            post.slug = self.assign_slug(candidate, exclude).await?;

            let written = if is_new {
                self.posts.insert(post.clone()).await
            } else {
                self.posts.update(post.clone()).await
            };

            match written {
                Ok(saved) => return Ok(saved),
                Err(RepoError::Constraint(message)) => {
                    tracing::warn!(
                        slug = %post.slug,
                        attempt,
                        "slug taken between check and write, retrying"
                    );
                    last_conflict = message;
                }
                Err(other) => return Err(Self::store_error(other)),
            }
        }
        Err(DomainError::Conflict(last_conflict))
    }

    fn store_error(err: RepoError) -> DomainError {
        match err {
            RepoError::Constraint(message) => DomainError::Conflict(message),
            RepoError::NotFound => DomainError::Internal("row vanished mid-operation".to_string()),
            RepoError::Connection(message) | RepoError::Query(message) => {
                DomainError::Internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::TimeDelta;
    use tokio::sync::RwLock;

    use super::*;
    use crate::ports::BaseRepository;

    /// In-memory post store enforcing the same unique-slug rule as the
    /// database index, with an injectable run of constraint failures.
    #[derive(Default)]
    struct StubPosts {
        rows: RwLock<HashMap<Uuid, Post>>,
        forced_conflicts: AtomicU32,
    }

    impl StubPosts {
        fn fail_next_writes(&self, count: u32) {
            self.forced_conflicts.store(count, Ordering::SeqCst);
        }

        fn take_forced_conflict(&self) -> bool {
            self.forced_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for StubPosts {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
            if self.take_forced_conflict() {
                return Err(RepoError::Constraint("posts_slug_key".to_string()));
            }
            let mut rows = self.rows.write().await;
            if rows.values().any(|p| p.slug == entity.slug) {
                return Err(RepoError::Constraint("posts_slug_key".to_string()));
            }
            rows.insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: Post) -> Result<Post, RepoError> {
            if self.take_forced_conflict() {
                return Err(RepoError::Constraint("posts_slug_key".to_string()));
            }
            let mut rows = self.rows.write().await;
            if rows
                .values()
                .any(|p| p.slug == entity.slug && p.id != entity.id)
            {
                return Err(RepoError::Constraint("posts_slug_key".to_string()));
            }
            if !rows.contains_key(&entity.id) {
                return Err(RepoError::NotFound);
            }
            rows.insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            match self.rows.write().await.remove(&id) {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            }
        }
    }

    #[async_trait]
    impl PostRepository for StubPosts {
        async fn slug_exists(
            &self,
            slug: &str,
            exclude: Option<Uuid>,
        ) -> Result<bool, RepoError> {
            Ok(self
                .rows
                .read()
                .await
                .values()
                .any(|p| p.slug == slug && Some(p.id) != exclude))
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self
                .rows
                .read()
                .await
                .values()
                .find(|p| p.slug == slug)
                .cloned())
        }

        async fn list_visible(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
            let rows = self.rows.read().await;
            let mut items: Vec<Post> = rows
                .values()
                .filter(|p| p.is_visible(query.as_of))
                .filter(|p| match &query.search {
                    Some(term) => {
                        let term = term.to_lowercase();
                        p.title.to_lowercase().contains(&term)
                            || p.content.to_lowercase().contains(&term)
                            || p
                                .excerpt
                                .as_deref()
                                .is_some_and(|e| e.to_lowercase().contains(&term))
                    }
                    None => true,
                })
                .cloned()
                .collect();

            match query.ordering {
                PostOrdering::PublishedDesc => {
                    items.sort_by(|a, b| b.published_at.cmp(&a.published_at))
                }
                PostOrdering::CreatedDesc => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
                PostOrdering::CreatedAsc => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            }

            let total = items.len() as u64;
            let items = items
                .into_iter()
                .skip(((query.page - 1) * query.per_page) as usize)
                .take(query.per_page as usize)
                .collect();

            Ok(Page {
                items,
                page: query.page,
                per_page: query.per_page,
                total,
            })
        }

        async fn list_by_owner(
            &self,
            owner_id: Uuid,
            ordering: PostOrdering,
        ) -> Result<Vec<Post>, RepoError> {
            let rows = self.rows.read().await;
            let mut items: Vec<Post> = rows
                .values()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect();
            match ordering {
                PostOrdering::PublishedDesc => {
                    items.sort_by(|a, b| b.published_at.cmp(&a.published_at))
                }
                PostOrdering::CreatedDesc => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
                PostOrdering::CreatedAsc => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            }
            Ok(items)
        }
    }

    fn service() -> (PostService, Arc<StubPosts>) {
        let repo = Arc::new(StubPosts::default());
        (PostService::new(repo.clone()), repo)
    }

    fn titled(title: &str) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: "Body text.".to_string(),
            ..CreatePost::default()
        }
    }

    #[tokio::test]
    async fn test_create_derives_normalized_slug() {
        let (service, _) = service();
        let owner = Uuid::new_v4();

        let post = service.create(owner, titled("My Amazing Post!")).await.unwrap();

        assert_eq!(post.slug, "my-amazing-post");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
        assert_eq!(post.owner_id, owner);
    }

    #[tokio::test]
    async fn test_collisions_get_incrementing_suffixes() {
        let (service, _) = service();
        let owner = Uuid::new_v4();

        let first = service.create(owner, titled("My Post")).await.unwrap();
        let second = service.create(owner, titled("My Post")).await.unwrap();
        let third = service.create(owner, titled("My Post")).await.unwrap();

        assert_eq!(first.slug, "my-post");
        assert_eq!(second.slug, "my-post-2");
        assert_eq!(third.slug, "my-post-3");
    }

    #[tokio::test]
    async fn test_title_edit_keeps_slug_sticky() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Original Title")).await.unwrap();

        let updated = service
            .update(
                post.id,
                owner,
                UpdatePost {
                    title: Some("A Completely New Title".to_string()),
                    ..UpdatePost::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "A Completely New Title");
        assert_eq!(updated.slug, "original-title");
    }

    #[tokio::test]
    async fn test_resubmitting_own_slug_gains_no_suffix() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("My Post")).await.unwrap();

        let updated = service
            .update(
                post.id,
                owner,
                UpdatePost {
                    slug: Some("My Post".to_string()),
                    ..UpdatePost::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "my-post");
    }

    #[tokio::test]
    async fn test_explicit_slug_edit_respects_uniqueness() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        service.create(owner, titled("My Post")).await.unwrap();
        let other = service.create(owner, titled("Another Post")).await.unwrap();

        let updated = service
            .update(
                other.id,
                owner,
                UpdatePost {
                    slug: Some("my-post".to_string()),
                    ..UpdatePost::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "my-post-2");
    }

    #[tokio::test]
    async fn test_empty_title_is_rejected() {
        let (service, _) = service();
        let result = service.create(Uuid::new_v4(), titled("   ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_title_of_only_punctuation_is_rejected() {
        let (service, _) = service();
        let result = service.create(Uuid::new_v4(), titled("!!!")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_publish_unpublish_round_trip() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Lifecycle")).await.unwrap();

        let published = service.publish(post.id, owner).await.unwrap();
        assert_eq!(published.status, PostStatus::Published);
        assert!(published.published_at.is_some());

        let drafted = service.unpublish(post.id, owner).await.unwrap();
        assert_eq!(drafted.status, PostStatus::Draft);
        assert_eq!(drafted.published_at, None);
    }

    #[tokio::test]
    async fn test_archive_keeps_publication_timestamp() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Keep the stamp")).await.unwrap();
        let published = service.publish(post.id, owner).await.unwrap();

        let archived = service.archive(post.id, owner).await.unwrap();

        assert_eq!(archived.status, PostStatus::Archived);
        assert_eq!(archived.published_at, published.published_at);
    }

    #[tokio::test]
    async fn test_strangers_see_not_found_on_mutation() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let post = service.create(owner, titled("Mine")).await.unwrap();

        let update = service
            .update(post.id, stranger, UpdatePost::default())
            .await;
        let publish = service.publish(post.id, stranger).await;
        let delete = service.delete(post.id, stranger).await;

        assert!(matches!(update, Err(DomainError::NotFound { .. })));
        assert!(matches!(publish, Err(DomainError::NotFound { .. })));
        assert!(matches!(delete, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_write_conflict_recovers_on_retry() {
        let (service, repo) = service();
        repo.fail_next_writes(1);

        let post = service
            .create(Uuid::new_v4(), titled("Raced Title"))
            .await
            .unwrap();

        assert_eq!(post.slug, "raced-title");
    }

    #[tokio::test]
    async fn test_write_conflict_exhaustion_surfaces_conflict() {
        let (service, repo) = service();
        repo.fail_next_writes(SLUG_WRITE_ATTEMPTS);

        let result = service.create(Uuid::new_v4(), titled("Doomed")).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_resolve_by_slug_and_by_id() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Findable")).await.unwrap();
        service.publish(post.id, owner).await.unwrap();

        let by_slug = service.resolve_visible("findable", Utc::now()).await.unwrap();
        let by_id = service
            .resolve_visible(&post.id.to_string(), Utc::now())
            .await
            .unwrap();

        assert_eq!(by_slug.id, post.id);
        assert_eq!(by_id.id, post.id);
    }

    #[tokio::test]
    async fn test_drafts_do_not_resolve_publicly() {
        let (service, _) = service();
        let post = service
            .create(Uuid::new_v4(), titled("Hidden Draft"))
            .await
            .unwrap();

        let result = service.resolve_visible(&post.id.to_string(), Utc::now()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_scheduled_publish_becomes_visible_later() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let when = Utc::now() + TimeDelta::hours(6);

        let post = service
            .create(
                owner,
                CreatePost {
                    status: Some(PostStatus::Published),
                    published_at: Some(when),
                    ..titled("Scheduled")
                },
            )
            .await
            .unwrap();

        let now = service.resolve_visible(&post.slug, Utc::now()).await;
        assert!(matches!(now, Err(DomainError::NotFound { .. })));

        let later = service
            .resolve_visible(&post.slug, when + TimeDelta::minutes(1))
            .await;
        assert!(later.is_ok());
    }

    #[tokio::test]
    async fn test_listing_filters_searches_and_paginates() {
        let (service, _) = service();
        let owner = Uuid::new_v4();

        for title in ["Rust Patterns", "Cooking Rice", "Rust Macros"] {
            let post = service.create(owner, titled(title)).await.unwrap();
            service.publish(post.id, owner).await.unwrap();
        }
        // One draft that must never show up publicly.
        service.create(owner, titled("Unfinished")).await.unwrap();

        let mut query = PostQuery::latest(1, 10);
        query.search = Some("rust".to_string());
        let page = service.list_visible(query).await.unwrap();

        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|p| p.title.contains("Rust")));

        let all = service.list_visible(PostQuery::latest(1, 10)).await.unwrap();
        assert_eq!(all.total, 3);

        let owned = service.list_for_owner(owner).await.unwrap();
        assert_eq!(owned.len(), 4);
    }

    #[tokio::test]
    async fn test_update_transition_routes_through_publish_semantics() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Via Update")).await.unwrap();

        let published = service
            .update(
                post.id,
                owner,
                UpdatePost {
                    status: Some(PostStatus::Published),
                    ..UpdatePost::default()
                },
            )
            .await
            .unwrap();
        assert!(published.published_at.is_some());

        let drafted = service
            .update(
                post.id,
                owner,
                UpdatePost {
                    status: Some(PostStatus::Draft),
                    ..UpdatePost::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(drafted.published_at, None);
    }

    #[tokio::test]
    async fn test_rescheduling_a_draft_is_rejected() {
        let (service, _) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Still Draft")).await.unwrap();

        let result = service
            .update(
                post.id,
                owner,
                UpdatePost {
                    published_at: Some(Utc::now() + TimeDelta::days(1)),
                    ..UpdatePost::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_the_post() {
        let (service, repo) = service();
        let owner = Uuid::new_v4();
        let post = service.create(owner, titled("Short Lived")).await.unwrap();

        service.delete(post.id, owner).await.unwrap();

        assert!(repo.rows.read().await.is_empty());
    }
}
