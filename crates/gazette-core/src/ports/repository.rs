use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Author, Comment, Post, Tag};
use crate::error::RepoError;
use crate::pagination::Page;

/// Generic repository trait defining standard CRUD operations.
///
/// Identifiers are generated by the caller, so create and update are
/// separate operations rather than a single upsert.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author repository with domain-specific lookups.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// Find an author by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, RepoError>;

    /// Find an author by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of published posts, newest first, optionally narrowed
    /// to a single tag. `page` is one-based and clamped to the last page.
    async fn list_published(
        &self,
        page: u64,
        per_page: u64,
        tag_id: Option<Uuid>,
    ) -> Result<Page<Post>, RepoError>;

    /// Resolve a published post by publication date (UTC) and slug.
    async fn find_by_date_slug(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Find a post by ID only if it is published.
    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts belonging to one author, newest first.
    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments on a post, oldest first.
    async fn list_visible(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Look up a tag by its normalized label.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// Fetch-or-insert a tag for a normalized label.
    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError>;

    /// Labels attached to a post, alphabetical.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Replace a post's tag set with the given labels.
    async fn replace_for_post(&self, post_id: Uuid, names: &[String]) -> Result<Vec<Tag>, RepoError>;
}
