//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAuthorRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing an author's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create or update a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    /// `"DF"` (draft) or `"PB"` (published); omitted means draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response containing one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

/// One page of the published-post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total_posts: u64,
    pub total_pages: u64,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Response containing one visible comment. The commenter's address is
/// never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Request to share a post by mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePostRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Acknowledgement of a share dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub sent_to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_response_serializes_without_envelope() {
        let body = serde_json::to_value(ShareResponse {
            sent_to: "friend@example.com".to_string(),
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({ "sent_to": "friend@example.com" }));
    }

    #[test]
    fn test_comment_response_carries_no_email() {
        let body = serde_json::to_value(CommentResponse {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            body: "Nice.".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();

        assert!(body.get("email").is_none());
        assert_eq!(body["name"], "Ada");
    }
}
