//! Post handlers: the public listing/detail surface and the
//! authenticated authoring surface.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use gazette_core::domain::Post;
use gazette_core::forms::PostForm;
use gazette_core::pagination::parse_page_token;
use gazette_shared::dto::{PostListResponse, PostPayload, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query string of the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// One-based page token. Anything unparseable means page 1.
    pub page: Option<String>,
    /// Tag label to narrow the listing to.
    pub tag: Option<String>,
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        slug: post.slug,
        body: post.body,
        status: post.status.as_str().to_string(),
        created_at: post.created_at,
        published_at: post.published_at,
        updated_at: post.updated_at,
        tags: post.tags,
    }
}

fn to_form(payload: PostPayload) -> PostForm {
    PostForm {
        title: payload.title,
        body: payload.body,
        status: payload.status,
        published_at: payload.published_at,
        tags: payload.tags,
    }
}

/// Map the year/month/day path segments to a calendar date. An impossible
/// date reads the same as a date with no post.
pub(super) fn resolve_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::NotFound(format!("No post at {year}-{month:02}-{day:02}")))
}

/// GET /api/posts - published posts, newest first.
pub async fn list_published(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    // An unknown tag label is 404, not an empty listing.
    let tag_id = match query.tag.as_deref() {
        Some(label) => {
            let tag = state
                .tags
                .find_by_name(label)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No tag named '{label}'")))?;
            Some(tag.id)
        }
        None => None,
    };

    let requested = parse_page_token(query.page.as_deref());
    let page = state
        .posts
        .list_published(requested, state.page_size, tag_id)
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: page.items.into_iter().map(to_response).collect(),
        page: page.page,
        page_size: page.page_size,
        total_posts: page.total_items,
        total_pages: page.total_pages,
    }))
}

/// GET /api/posts/{year}/{month}/{day}/{slug}
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let date = resolve_date(year, month, day)?;

    let post = state
        .posts
        .find_by_date_slug(date, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post at {date} with slug '{slug}'")))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts - create a post owned by the authenticated author.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let draft = to_form(body.into_inner()).validate()?;

    let post = Post::from_draft(identity.author_id, draft);
    let labels = post.tags.clone();
    let mut saved = state.posts.insert(post).await?;
    let tags = state.tags.replace_for_post(saved.id, &labels).await?;
    saved.tags = tags.into_iter().map(|t| t.name).collect();

    tracing::info!(post_id = %saved.id, author_id = %identity.author_id, "Post created");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// PUT /api/posts/{id} - update a post; only its author may.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post {post_id}")))?;

    if post.author_id != identity.author_id {
        return Err(AppError::Forbidden);
    }

    let draft = to_form(body.into_inner()).validate()?;
    post.apply_draft(draft)?;

    let labels = post.tags.clone();
    let mut saved = state.posts.update(post).await?;
    let tags = state.tags.replace_for_post(saved.id, &labels).await?;
    saved.tags = tags.into_iter().map(|t| t.name).collect();

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// POST /api/posts/{id}/publish - the one-way Draft -> Published switch.
pub async fn publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post {post_id}")))?;

    if post.author_id != identity.author_id {
        return Err(AppError::Forbidden);
    }

    post.publish()?;
    let mut saved = state.posts.update(post).await?;
    let tags = state.tags.list_for_post(saved.id).await?;
    saved.tags = tags.into_iter().map(|t| t.name).collect();

    tracing::info!(post_id = %saved.id, "Post published");

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// GET /api/posts/mine - all of the authenticated author's posts,
/// drafts included.
pub async fn list_mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.find_by_author_id(identity.author_id).await?;
    let posts: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impossible_calendar_date_reads_as_absent() {
        assert!(matches!(
            resolve_date(2025, 13, 1),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            resolve_date(2025, 2, 30),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_real_calendar_date_resolves() {
        let date = resolve_date(2024, 2, 29).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
