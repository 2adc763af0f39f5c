//! Share-by-mail handler.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::forms::ShareForm;
use gazette_core::share::compose_share_mail;
use gazette_shared::dto::{SharePostRequest, ShareResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{id}/share - mail a recommendation for a published
/// post to one recipient.
pub async fn share(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SharePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    // Only published posts can be recommended.
    let post = state
        .posts
        .find_published_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post {post_id}")))?;

    let req = body.into_inner();
    let request = ShareForm {
        name: req.name,
        email: req.email,
        to: req.to,
        comments: req.comments,
    }
    .validate()?;

    let mail = compose_share_mail(&post, &request, &state.site_base_url);
    state.mailer.send(mail).await?;

    tracing::info!(post_id = %post.id, "Post shared by mail");

    Ok(HttpResponse::Ok().json(ShareResponse { sent_to: request.to }))
}
