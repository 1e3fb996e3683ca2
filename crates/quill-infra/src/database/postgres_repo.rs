//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{Page, PostOrdering, PostQuery, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part for logging to keep PII out of logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.len() > 1 => {
                format!("{}***@{}", &local[..1], domain)
            }
            Some((_, domain)) => format!("***@{domain}"),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

fn ordered(
    select: sea_orm::Select<PostEntity>,
    ordering: PostOrdering,
) -> sea_orm::Select<PostEntity> {
    match ordering {
        PostOrdering::PublishedDesc => select.order_by_desc(post::Column::PublishedAt),
        PostOrdering::CreatedDesc => select.order_by_desc(post::Column::CreatedAt),
        PostOrdering::CreatedAsc => select.order_by_asc(post::Column::CreatedAt),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_visible(&self, query: &PostQuery) -> Result<Page<Post>, RepoError> {
        let mut select = PostEntity::find()
            .filter(post::Column::Status.eq(post::PostStatus::Published))
            .filter(post::Column::PublishedAt.lte(query.as_of));

        if let Some(term) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(post::Column::Title.contains(term))
                    .add(post::Column::Content.contains(term))
                    .add(post::Column::Excerpt.contains(term)),
            );
        }

        let paginator = ordered(select, query.ordering).paginate(&self.db, query.per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
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
        let select = PostEntity::find().filter(post::Column::OwnerId.eq(owner_id));
        let models = ordered(select, ordering)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
