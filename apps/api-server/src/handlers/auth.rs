//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use gazette_core::domain::Author;
use gazette_core::ports::{PasswordService, TokenService};
use gazette_shared::dto::{AuthResponse, AuthorResponse, LoginRequest, RegisterAuthorRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_USERNAME_LEN: usize = 150;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let username = req.username.trim().to_string();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Username must be between 1 and {MAX_USERNAME_LEN} characters"
        )));
    }
    if !email_address::EmailAddress::is_valid(&req.email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if state.authors.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }
    if state.authors.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let author = Author::new(username, req.email, password_hash);
    let saved = state.authors.insert(author).await?;

    tracing::info!(author_id = %saved.id, "New author registered");

    let token = token_service
        .generate_token(saved.id, &saved.email, vec!["author".to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let author = state
        .authors
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &author.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(author.id, &author.email, vec!["author".to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(author_id = %author.id, "Author logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let author = state
        .authors
        .find_by_id(identity.author_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

    Ok(HttpResponse::Ok().json(AuthorResponse {
        id: author.id,
        username: author.username,
        email: author.email,
        created_at: author.created_at,
    }))
}
