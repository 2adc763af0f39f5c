//! Typed form validation.
//!
//! Each form validates into a typed value or a list of field errors;
//! nothing is persisted until validation has passed in full. Bounds follow
//! the persisted column widths, email grammar is checked with the
//! `email_address` crate.

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::domain::slug::slugify;
use crate::domain::{PostStatus, normalize_label};

/// Maximum length of a comment author name.
pub const MAX_COMMENT_NAME_LEN: usize = 80;
/// Maximum length of a comment body.
pub const MAX_COMMENT_BODY_LEN: usize = 2000;
/// Maximum length of a post title.
pub const MAX_TITLE_LEN: usize = 250;
/// Maximum length of a tag label.
pub const MAX_TAG_LEN: usize = 100;
/// Maximum length of a share sender name.
pub const MAX_SHARE_NAME_LEN: usize = 25;
/// Bounds of the optional share note.
pub const SHARE_COMMENTS_MIN_LEN: usize = 10;
pub const SHARE_COMMENTS_MAX_LEN: usize = 400;

/// A single failed field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Comment submission as received from a visitor.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A fully validated comment submission.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentForm {
    /// Validate every field, collecting all failures.
    pub fn validate(self) -> Result<NewComment, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        } else if name.chars().count() > MAX_COMMENT_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {MAX_COMMENT_NAME_LEN} characters"),
            ));
        }

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }

        let body = self.body.trim().to_string();
        if body.is_empty() {
            errors.push(FieldError::new("body", "must not be empty"));
        } else if body.chars().count() > MAX_COMMENT_BODY_LEN {
            errors.push(FieldError::new(
                "body",
                format!("must be at most {MAX_COMMENT_BODY_LEN} characters"),
            ));
        }

        if errors.is_empty() {
            Ok(NewComment { name, email, body })
        } else {
            Err(errors)
        }
    }
}

/// Share-by-mail submission: who sends, who receives, optional note.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareForm {
    /// Sender display name.
    pub name: String,
    /// Sender address.
    pub email: String,
    /// Recipient address.
    pub to: String,
    /// Optional note forwarded in the mail body.
    #[serde(default)]
    pub comments: Option<String>,
}

/// A fully validated share request.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: Option<String>,
}

impl ShareForm {
    pub fn validate(self) -> Result<ShareRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        } else if name.chars().count() > MAX_SHARE_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {MAX_SHARE_NAME_LEN} characters"),
            ));
        }

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }

        let to = self.to.trim().to_string();
        if !is_valid_email(&to) {
            errors.push(FieldError::new("to", "must be a valid email address"));
        }

        // The note is optional, but when present it must carry real content.
        let comments = self
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(ref note) = comments {
            let count = note.chars().count();
            if !(SHARE_COMMENTS_MIN_LEN..=SHARE_COMMENTS_MAX_LEN).contains(&count) {
                errors.push(FieldError::new(
                    "comments",
                    format!(
                        "must be between {SHARE_COMMENTS_MIN_LEN} and {SHARE_COMMENTS_MAX_LEN} characters"
                    ),
                ));
            }
        }

        if errors.is_empty() {
            Ok(ShareRequest {
                name,
                email,
                to,
                comments,
            })
        } else {
            Err(errors)
        }
    }
}

/// Post creation/update payload as received from an author.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    /// `"DF"` or `"PB"`; defaults to draft.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A validated post payload with its derived slug.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl PostForm {
    pub fn validate(self) -> Result<PostDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim().to_string();
        let mut slug = None;
        if title.is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.push(FieldError::new(
                "title",
                format!("must be at most {MAX_TITLE_LEN} characters"),
            ));
        } else {
            slug = slugify(&title);
            if slug.is_none() {
                errors.push(FieldError::new(
                    "title",
                    "must contain at least one letter or digit",
                ));
            }
        }

        let body = self.body.trim().to_string();
        if body.is_empty() {
            errors.push(FieldError::new("body", "must not be empty"));
        }

        let status = match self.status.as_deref() {
            None => PostStatus::Draft,
            Some(raw) => match PostStatus::parse(raw) {
                Some(status) => status,
                None => {
                    errors.push(FieldError::new("status", "must be one of: DF, PB"));
                    PostStatus::Draft
                }
            },
        };

        // Normalize labels, dropping empties and duplicates.
        let mut tags: Vec<String> = Vec::new();
        for raw in &self.tags {
            let label = normalize_label(raw);
            if !label.is_empty() && !tags.contains(&label) {
                tags.push(label);
            }
        }
        for label in &tags {
            if label.chars().count() > MAX_TAG_LEN {
                errors.push(FieldError::new(
                    "tags",
                    format!("labels must be at most {MAX_TAG_LEN} characters"),
                ));
            }
        }

        if errors.is_empty() {
            Ok(PostDraft {
                title,
                slug: slug.unwrap_or_default(),
                body,
                status,
                published_at: self.published_at,
                tags,
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(name: &str, email: &str, body: &str) -> CommentForm {
        CommentForm {
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        }
    }

    fn share(name: &str, comments: Option<&str>) -> ShareForm {
        ShareForm {
            name: name.to_string(),
            email: "sender@example.com".to_string(),
            to: "friend@example.com".to_string(),
            comments: comments.map(str::to_string),
        }
    }

    #[test]
    fn test_comment_with_invalid_email_fails() {
        let errors = comment("Ada", "not-an-email", "Nice post").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_comment_collects_all_failing_fields() {
        let errors = comment("", "nope", "").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "body"]);
    }

    #[test]
    fn test_comment_name_bound() {
        let long = "x".repeat(MAX_COMMENT_NAME_LEN + 1);
        assert!(comment(&long, "a@example.com", "hi there").validate().is_err());

        let at_limit = "x".repeat(MAX_COMMENT_NAME_LEN);
        assert!(comment(&at_limit, "a@example.com", "hi there").validate().is_ok());
    }

    #[test]
    fn test_valid_comment_passes_trimmed() {
        let fields = comment("  Ada  ", "ada@example.com", " Great. ").validate().unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.body, "Great.");
    }

    #[test]
    fn test_share_name_bound_is_25() {
        assert!(share(&"x".repeat(25), None).validate().is_ok());
        assert!(share(&"x".repeat(26), None).validate().is_err());
    }

    #[test]
    fn test_share_comments_bounds() {
        assert!(share("Ada", Some(&"a".repeat(9))).validate().is_err());
        assert!(share("Ada", Some(&"a".repeat(10))).validate().is_ok());
        assert!(share("Ada", Some(&"a".repeat(400))).validate().is_ok());
        assert!(share("Ada", Some(&"a".repeat(401))).validate().is_err());
        assert!(share("Ada", None).validate().is_ok());
    }

    #[test]
    fn test_share_validates_both_addresses() {
        let form = ShareForm {
            name: "Ada".to_string(),
            email: "bad".to_string(),
            to: "worse".to_string(),
            comments: None,
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "to"]);
    }

    #[test]
    fn test_post_form_requires_sluggable_title() {
        let form = PostForm {
            title: "!!!".to_string(),
            body: "text".to_string(),
            status: None,
            published_at: None,
            tags: vec![],
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_post_form_defaults_to_draft_and_dedupes_tags() {
        let form = PostForm {
            title: "Hello".to_string(),
            body: "text".to_string(),
            status: None,
            published_at: None,
            tags: vec!["Rust".to_string(), " rust ".to_string(), "".to_string()],
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.status, PostStatus::Draft);
        assert_eq!(draft.tags, vec!["rust".to_string()]);
        assert_eq!(draft.slug, "hello");
    }

    #[test]
    fn test_post_form_bounds_tag_labels() {
        let form = PostForm {
            title: "Hello".to_string(),
            body: "text".to_string(),
            status: None,
            published_at: None,
            tags: vec!["x".repeat(MAX_TAG_LEN + 1)],
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "tags");

        let form = PostForm {
            title: "Hello".to_string(),
            body: "text".to_string(),
            status: None,
            published_at: None,
            tags: vec!["x".repeat(MAX_TAG_LEN)],
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_post_form_rejects_unknown_status() {
        let form = PostForm {
            title: "Hello".to_string(),
            body: "text".to_string(),
            status: Some("XX".to_string()),
            published_at: None,
            tags: vec![],
        };
        assert!(form.validate().is_err());
    }
}
