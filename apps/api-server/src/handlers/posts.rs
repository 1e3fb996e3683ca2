//! Post handlers - the HTTP face of the post lifecycle.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::ports::{PostOrdering, PostQuery};
use quill_core::service::{CreatePost, UpdatePost};
use quill_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse, PostSummary,
    UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 10;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        reading_time: post.reading_time(),
        id: post.id,
        owner_id: post.owner_id,
        title: post.title,
        slug: post.slug,
        status: post.status.to_string(),
        published_at: post.published_at,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        meta_title: post.meta_title,
        meta_description: post.meta_description,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn post_summary(post: Post) -> PostSummary {
    PostSummary {
        reading_time: post.reading_time(),
        id: post.id,
        title: post.title,
        slug: post.slug,
        status: post.status.to_string(),
        published_at: post.published_at,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        created_at: post.created_at,
    }
}

fn parse_status(raw: Option<String>) -> AppResult<Option<PostStatus>> {
    raw.map(|s| s.parse::<PostStatus>())
        .transpose()
        .map_err(AppError::BadRequest)
}

/// GET /api/posts - publicly visible posts, paginated, searchable.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();

    let page = state
        .posts
        .list_visible(PostQuery {
            page: params.page.unwrap_or(1),
            per_page: params.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
            search: params.q,
            as_of: Utc::now(),
            ordering: PostOrdering::PublishedDesc,
        })
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        items: page.items.into_iter().map(post_summary).collect(),
        page: page.page,
        per_page: page.per_page,
        total: page.total,
    }))
}

/// GET /api/posts/{slug_or_id} - resolve a visible post by slug or id.
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.posts.resolve_visible(&path, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/manage/posts - the caller's posts, every status.
pub async fn manage_list(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_for_owner(identity.user_id).await?;
    let items: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let status = parse_status(req.status)?;

    let post = state
        .posts
        .create(
            identity.user_id,
            CreatePost {
                title: req.title,
                content: req.content,
                slug: req.slug,
                excerpt: req.excerpt,
                status,
                featured_image: req.featured_image,
                meta_title: req.meta_title,
                meta_description: req.meta_description,
                published_at: req.published_at,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let status = parse_status(req.status)?;

    let post = state
        .posts
        .update(
            path.into_inner(),
            identity.user_id,
            UpdatePost {
                title: req.title,
                content: req.content,
                slug: req.slug,
                excerpt: req.excerpt,
                status,
                featured_image: req.featured_image,
                meta_title: req.meta_title,
                meta_description: req.meta_description,
                published_at: req.published_at,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/publish
pub async fn publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .publish(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/unpublish
pub async fn unpublish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .unpublish(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts/{id}/archive
pub async fn archive(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .archive(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}
