//! Comment handlers. Submitting is open to any visitor and targets a
//! published post; reading returns only active comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::domain::Comment;
use gazette_core::forms::CommentForm;
use gazette_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        name: comment.name,
        body: comment.body,
        created_at: comment.created_at,
    }
}

/// GET /api/posts/{year}/{month}/{day}/{slug}/comments - active
/// comments on a published post, oldest first.
pub async fn list(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let date = super::posts::resolve_date(year, month, day)?;

    let post = state
        .posts
        .find_by_date_slug(date, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post at {date} with slug '{slug}'")))?;

    let comments = state.comments.list_visible(post.id).await?;
    let comments: Vec<CommentResponse> = comments.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/posts/{id}/comments - attach a comment to a published post.
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    // Drafts take no comments; an unpublished ID reads as absent.
    let post = state
        .posts
        .find_published_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post {post_id}")))?;

    let req = body.into_inner();
    let fields = CommentForm {
        name: req.name,
        email: req.email,
        body: req.body,
    }
    .validate()?;

    let comment = Comment::submit(post.id, fields);
    let saved = state.comments.insert(comment).await?;

    tracing::info!(post_id = %post.id, comment_id = %saved.id, "Comment submitted");

    Ok(HttpResponse::Created().json(to_response(saved)))
}
