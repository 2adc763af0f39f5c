use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::forms::PostDraft;

/// Publication status of a post.
///
/// Persisted as the two-letter codes `"DF"` / `"PB"`. The only allowed
/// transition is Draft -> Published; a published post never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    #[serde(rename = "DF")]
    Draft,
    #[serde(rename = "PB")]
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DF",
            PostStatus::Published => "PB",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DF" => Some(PostStatus::Draft),
            "PB" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

/// Post entity - a blog post addressed by publication date + slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    /// Derived from the title; unique per publication date, not globally.
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    /// Defaults to creation time; author-settable. Part of the address.
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Tag labels, loaded alongside the post by the repository.
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post from a validated draft.
    pub fn from_draft(author_id: Uuid, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            slug: draft.slug,
            body: draft.body,
            status: draft.status,
            created_at: now,
            published_at: draft.published_at.unwrap_or(now),
            updated_at: now,
            tags: draft.tags,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Perform the Draft -> Published transition.
    ///
    /// Publishing an already-published post is rejected; there is no
    /// reverse transition. `published_at` is left untouched.
    pub fn publish(&mut self) -> Result<(), DomainError> {
        if self.is_published() {
            return Err(DomainError::invalid("status", "post is already published"));
        }
        self.status = PostStatus::Published;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a validated draft to an existing post, re-deriving the slug.
    ///
    /// Demoting a published post back to draft is rejected.
    pub fn apply_draft(&mut self, draft: PostDraft) -> Result<(), DomainError> {
        if self.is_published() && draft.status == PostStatus::Draft {
            return Err(DomainError::invalid(
                "status",
                "a published post cannot return to draft",
            ));
        }
        self.title = draft.title;
        self.slug = draft.slug;
        self.body = draft.body;
        self.status = draft.status;
        if let Some(published_at) = draft.published_at {
            self.published_at = published_at;
        }
        self.tags = draft.tags;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::PostForm;

    fn draft(title: &str, status: PostStatus) -> PostDraft {
        PostForm {
            title: title.to_string(),
            body: "Some body".to_string(),
            status: Some(status.as_str().to_string()),
            published_at: None,
            tags: vec![],
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_from_draft_derives_slug_and_timestamps() {
        let author = Uuid::new_v4();
        let post = Post::from_draft(author, draft("Hello World", PostStatus::Draft));

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.author_id, author);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.created_at, post.published_at);
    }

    #[test]
    fn test_publish_transitions_draft() {
        let mut post = Post::from_draft(Uuid::new_v4(), draft("Draft", PostStatus::Draft));
        let published_at = post.published_at;

        post.publish().unwrap();

        assert!(post.is_published());
        // publishing never rewrites the publication timestamp
        assert_eq!(post.published_at, published_at);
    }

    #[test]
    fn test_publish_twice_is_rejected() {
        let mut post = Post::from_draft(Uuid::new_v4(), draft("Draft", PostStatus::Draft));
        post.publish().unwrap();

        assert!(post.publish().is_err());
    }

    #[test]
    fn test_demoting_published_post_is_rejected() {
        let mut post = Post::from_draft(Uuid::new_v4(), draft("Live", PostStatus::Published));

        let result = post.apply_draft(draft("Live again", PostStatus::Draft));

        assert!(result.is_err());
        assert!(post.is_published());
    }

    #[test]
    fn test_apply_draft_rederives_slug() {
        let mut post = Post::from_draft(Uuid::new_v4(), draft("First Title", PostStatus::Draft));

        post.apply_draft(draft("Second Title", PostStatus::Draft))
            .unwrap();

        assert_eq!(post.slug, "second-title");
    }
}
