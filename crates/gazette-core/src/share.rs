//! Share-by-mail composition.
//!
//! Turns a validated [`ShareRequest`](crate::forms::ShareRequest) and a
//! published post into a plain-text mail for the transport to deliver.

use chrono::Datelike;

use crate::domain::Post;
use crate::forms::ShareRequest;
use crate::ports::MailMessage;

/// Absolute address of a post under `base_url`.
///
/// Month and day are unpadded, matching the detail route.
pub fn post_url(base_url: &str, post: &Post) -> String {
    let date = post.published_at.date_naive();
    format!(
        "{}/posts/{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day(),
        post.slug
    )
}

/// Build the outbound recommendation mail.
pub fn compose_share_mail(post: &Post, request: &ShareRequest, base_url: &str) -> MailMessage {
    let subject = format!("{} recommends you read {}", request.name, post.title);
    let mut body = format!("Read {} at {}", post.title, post_url(base_url, post));
    if let Some(comments) = &request.comments {
        body.push_str(&format!("\n\n{}'s comments: {}", request.name, comments));
    }
    MailMessage {
        to: request.to.clone(),
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::domain::PostStatus;

    fn published_post() -> Post {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 12, 30, 0).unwrap();
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "Why ducks quack".to_string(),
            slug: "why-ducks-quack".to_string(),
            body: "Because.".to_string(),
            status: PostStatus::Published,
            created_at: at,
            published_at: at,
            updated_at: at,
            tags: vec![],
        }
    }

    fn request(comments: Option<&str>) -> ShareRequest {
        ShareRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            to: "friend@example.com".to_string(),
            comments: comments.map(str::to_string),
        }
    }

    #[test]
    fn test_post_url_uses_unpadded_publication_date() {
        let url = post_url("https://gazette.example/", &published_post());
        assert_eq!(url, "https://gazette.example/posts/2025/3/7/why-ducks-quack");
    }

    #[test]
    fn test_subject_names_sender_and_title() {
        let mail = compose_share_mail(&published_post(), &request(None), "https://gazette.example");
        assert_eq!(mail.subject, "Ada recommends you read Why ducks quack");
        assert_eq!(mail.to, "friend@example.com");
    }

    #[test]
    fn test_body_includes_comments_only_when_present() {
        let base = "https://gazette.example";
        let plain = compose_share_mail(&published_post(), &request(None), base);
        assert!(plain.body.contains("/posts/2025/3/7/why-ducks-quack"));
        assert!(!plain.body.contains("comments:"));

        let with_note = compose_share_mail(&published_post(), &request(Some("Read this one")), base);
        assert!(with_note.body.ends_with("Ada's comments: Read this one"));
    }
}
