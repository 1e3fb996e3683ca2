//! In-memory repositories - used as fallback when no database is
//! configured. Data is lost on process restart.
//!
//! These honor the same uniqueness rules the relational schema enforces
//! (post slug, user email) so the conflict-retry path behaves the same
//! with or without PostgreSQL behind it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, Page, PostOrdering, PostQuery, PostRepository, UserRepository,
};

fn sort_posts(items: &mut [Post], ordering: PostOrdering) {
    match ordering {
        PostOrdering::PublishedDesc => items.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        PostOrdering::CreatedDesc => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        PostOrdering::CreatedAsc => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// In-memory post repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|p| p.slug == entity.slug) {
            return Err(RepoError::Constraint(format!(
                "duplicate slug: {}",
                entity.slug
            )));
        }
        rows.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows
            .values()
            .any(|p| p.slug == entity.slug && p.id != entity.id)
        {
            return Err(RepoError::Constraint(format!(
                "duplicate slug: {}",
                entity.slug
            )));
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
impl PostRepository for InMemoryPostRepository {
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
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

        sort_posts(&mut items, query.ordering);

        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip((query.page.saturating_sub(1) * query.per_page) as usize)
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
        let mut items: Vec<Post> = self
            .rows
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        sort_posts(&mut items, ordering);
        Ok(items)
    }
}

/// In-memory user repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|u| u.email == entity.email) {
            return Err(RepoError::Constraint(format!(
                "duplicate email: {}",
                entity.email
            )));
        }
        rows.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows
            .values()
            .any(|u| u.email == entity.email && u.id != entity.id)
        {
            return Err(RepoError::Constraint(format!(
                "duplicate email: {}",
                entity.email
            )));
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
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(owner: Uuid, slug: &str) -> Post {
        Post::new(
            owner,
            slug.replace('-', " "),
            slug.to_string(),
            "content".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_slug() {
        let repo = InMemoryPostRepository::new();
        let owner = Uuid::new_v4();

        repo.insert(post(owner, "taken")).await.unwrap();
        let result = repo.insert(post(owner, "taken")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_slug_exists_excludes_the_given_id() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post(Uuid::new_v4(), "mine")).await.unwrap();

        assert!(repo.slug_exists("mine", None).await.unwrap());
        assert!(!repo.slug_exists("mine", Some(saved.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(post(Uuid::new_v4(), "ghost")).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_user_email_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("a@example.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("a@example.com".into(), "h".into()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
