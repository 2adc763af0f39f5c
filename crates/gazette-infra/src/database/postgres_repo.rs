//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use gazette_core::domain::{Author, Comment, Post, Tag, normalize_label};
use gazette_core::error::RepoError;
use gazette_core::pagination::{self, Page};
use gazette_core::ports::{
    AuthorRepository, CommentRepository, PostRepository, TagRepository,
};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{PostgresBaseRepository, map_write_err};

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(author_email = %masked, "Finding author by email");

        let result = AuthorEntity::find()
            .filter(author::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError> {
        let result = AuthorEntity::find()
            .filter(author::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

impl PostgresPostRepository {
    /// Load tag labels for a fetched row and build the domain post.
    async fn with_tags(&self, model: post::Model) -> Result<Post, RepoError> {
        let tags = model
            .find_related(TagEntity)
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut post = Post::from(model);
        post.tags = tags.into_iter().map(|t| t.name).collect();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        page: u64,
        per_page: u64,
        tag_id: Option<Uuid>,
    ) -> Result<Page<Post>, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Status.eq(post::Status::Published));

        if let Some(tag_id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        let paginator = query
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::Id)
            .paginate(self.db.as_ref(), per_page);

        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        // Requests past the end land on the last page instead of failing.
        let page = pagination::clamp_page(page, totals.number_of_pages);
        let models = if totals.number_of_items == 0 {
            Vec::new()
        } else {
            paginator
                .fetch_page(page - 1)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?
        };

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.with_tags(model).await?);
        }

        Ok(Page {
            items,
            page,
            page_size: per_page,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn find_by_date_slug(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        // The calendar's last day has no following midnight to query up to.
        let day_end = match date.succ_opt() {
            Some(next) => next.and_time(NaiveTime::MIN).and_utc(),
            None => return Ok(None),
        };
        let day_start = date.and_time(NaiveTime::MIN).and_utc();

        let result = PostEntity::find()
            .filter(post::Column::Status.eq(post::Status::Published))
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::PublishedAt.gte(day_start.fixed_offset()))
            .filter(post::Column::PublishedAt.lt(day_end.fixed_offset()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match result {
            Some(model) => Ok(Some(self.with_tags(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(post::Column::Status.eq(post::Status::Published))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match result {
            Some(model) => Ok(Some(self.with_tags(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut posts = Vec::with_capacity(models.len());
        for model in models {
            posts.push(self.with_tags(model).await?);
        }

        Ok(posts)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_visible(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(normalize_label(name)))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_or_create(&self, name: &str) -> Result<Tag, RepoError> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        let active: tag::ActiveModel = Tag::new(name).into();
        match active.insert(self.db.as_ref()).await {
            Ok(model) => Ok(model.into()),
            // Lost the race against a concurrent insert; the row exists now.
            Err(e) => match map_write_err(e) {
                RepoError::Constraint(_) => {
                    self.find_by_name(name).await?.ok_or(RepoError::NotFound)
                }
                other => Err(other),
            },
        }
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn replace_for_post(
        &self,
        post_id: Uuid,
        names: &[String],
    ) -> Result<Vec<Tag>, RepoError> {
        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            tags.push(self.find_or_create(name).await?);
        }

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if !tags.is_empty() {
            let links = tags.iter().map(|t| post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(t.id),
            });
            PostTagEntity::insert_many(links)
                .exec(self.db.as_ref())
                .await
                .map_err(map_write_err)?;
        }

        Ok(tags)
    }
}
