use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::NewComment;

/// Comment entity - a visitor comment attached to a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Display gate. Submissions always start `true`; only an
    /// administrative actor ever flips it to hide a comment.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Attach a validated submission to a post. Comments are visible
    /// immediately - the public path never creates an inactive comment.
    pub fn submit(post_id: Uuid, fields: NewComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name: fields.name,
            email: fields.email,
            body: fields.body,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::CommentForm;

    #[test]
    fn test_submitted_comments_are_active() {
        let fields = CommentForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            body: "Lovely read.".to_string(),
        }
        .validate()
        .unwrap();

        let post_id = Uuid::new_v4();
        let comment = Comment::submit(post_id, fields);

        assert!(comment.active);
        assert_eq!(comment.post_id, post_id);
    }
}
