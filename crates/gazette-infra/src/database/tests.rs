#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::database::entity::{comment, post, tag};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    };
    use gazette_core::domain::{Post, PostStatus, Tag};
    use gazette_core::error::RepoError;
    use gazette_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Transaction};

    fn post_model(title: &str, slug: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            author_id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            slug: slug.to_owned(),
            body: "Body".to_owned(),
            status: post::Status::Published,
            created_at: now.into(),
            published_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(num_items: i64) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("num_items", sea_orm::Value::from(num_items))])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test Post", "test-post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_list_published_clamps_to_last_page() {
        // 7 published posts at 5 per page -> 2 pages; page 9999 lands on 2.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(7)]])
            .append_query_results(vec![vec![
                post_model("Sixth", "sixth"),
                post_model("Seventh", "seventh"),
            ]])
            .append_query_results(vec![Vec::<tag::Model>::new(), Vec::<tag::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let page = repo.list_published(9999, 5, None).await.unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_size, 5);
    }

    #[tokio::test]
    async fn test_list_published_empty_listing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(0)]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let page = repo.list_published(1, 5, None).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_published_queries_published_rows_newest_first() {
        let model = post_model("Only", "only");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(1)]])
            .append_query_results(vec![vec![model]])
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .into_connection();

        let conn = Arc::new(db);
        let repo = PostgresPostRepository::new(conn.clone());
        repo.list_published(1, 5, None).await.unwrap();
        drop(repo);

        let log = Arc::into_inner(conn).unwrap().into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT COUNT(*) AS num_items FROM (SELECT "posts"."id", "posts"."author_id", "posts"."title", "posts"."slug", "posts"."body", "posts"."status", "posts"."created_at", "posts"."published_at", "posts"."updated_at" FROM "posts" WHERE "posts"."status" = $1 ORDER BY "posts"."published_at" DESC, "posts"."id" DESC) AS "sub_query""#,
                ["PB".into()],
            )
        );
        assert_eq!(
            log[1],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "posts"."id", "posts"."author_id", "posts"."title", "posts"."slug", "posts"."body", "posts"."status", "posts"."created_at", "posts"."published_at", "posts"."updated_at" FROM "posts" WHERE "posts"."status" = $1 ORDER BY "posts"."published_at" DESC, "posts"."id" DESC LIMIT $2 OFFSET $3"#,
                ["PB".into(), 5u64.into(), 0u64.into()],
            )
        );
        assert_eq!(
            log[2],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "tags"."id", "tags"."name" FROM "tags" INNER JOIN "post_tags" ON "post_tags"."tag_id" = "tags"."id" INNER JOIN "posts" ON "posts"."id" = "post_tags"."post_id" WHERE "posts"."id" = $1 ORDER BY "tags"."name" ASC"#,
                [post_id.into()],
            )
        );
    }

    #[tokio::test]
    async fn test_list_published_tag_filter_joins_post_tags() {
        let tag_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(0)]])
            .into_connection();

        let conn = Arc::new(db);
        let repo = PostgresPostRepository::new(conn.clone());
        repo.list_published(1, 5, Some(tag_id)).await.unwrap();
        drop(repo);

        let log = Arc::into_inner(conn).unwrap().into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT COUNT(*) AS num_items FROM (SELECT "posts"."id", "posts"."author_id", "posts"."title", "posts"."slug", "posts"."body", "posts"."status", "posts"."created_at", "posts"."published_at", "posts"."updated_at" FROM "posts" INNER JOIN "post_tags" ON "posts"."id" = "post_tags"."post_id" WHERE "posts"."status" = $1 AND "post_tags"."tag_id" = $2 ORDER BY "posts"."published_at" DESC, "posts"."id" DESC) AS "sub_query""#,
                ["PB".into(), tag_id.into()],
            )
        );
    }

    #[tokio::test]
    async fn test_find_by_date_slug_loads_tags() {
        let model = post_model("Tagged", "tagged");
        let tag_row = tag::Model {
            id: uuid::Uuid::new_v4(),
            name: "rust".to_owned(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .append_query_results(vec![vec![tag_row]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let date = chrono::Utc::now().date_naive();
        let post = repo.find_by_date_slug(date, "tagged").await.unwrap().unwrap();

        assert_eq!(post.slug, "tagged");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.tags, vec!["rust".to_owned()]);
    }

    #[tokio::test]
    async fn test_find_by_date_slug_queries_one_publication_day() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let conn = Arc::new(db);
        let repo = PostgresPostRepository::new(conn.clone());
        let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let found = repo.find_by_date_slug(date, "hello").await.unwrap();
        assert!(found.is_none());
        drop(repo);

        let day_start = date
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .fixed_offset();
        let day_end = date
            .succ_opt()
            .unwrap()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .fixed_offset();

        let log = Arc::into_inner(conn).unwrap().into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "posts"."id", "posts"."author_id", "posts"."title", "posts"."slug", "posts"."body", "posts"."status", "posts"."created_at", "posts"."published_at", "posts"."updated_at" FROM "posts" WHERE "posts"."status" = $1 AND "posts"."slug" = $2 AND "posts"."published_at" >= $3 AND "posts"."published_at" < $4 LIMIT $5"#,
                [
                    "PB".into(),
                    "hello".into(),
                    day_start.into(),
                    day_end.into(),
                    1u64.into(),
                ],
            )
        );
    }

    #[tokio::test]
    async fn test_find_by_date_slug_past_calendar_end_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresPostRepository::new(Arc::new(db));

        let found = repo
            .find_by_date_slug(chrono::NaiveDate::MAX, "anything")
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_visible_comments_maps_rows() {
        let post_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();
        let rows = vec![
            comment::Model {
                id: uuid::Uuid::new_v4(),
                post_id,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                body: "First!".to_owned(),
                active: true,
                created_at: now.into(),
                updated_at: now.into(),
            },
            comment::Model {
                id: uuid::Uuid::new_v4(),
                post_id,
                name: "Grace".to_owned(),
                email: "grace@example.com".to_owned(),
                body: "Second.".to_owned(),
                active: true,
                created_at: (now + chrono::TimeDelta::minutes(1)).into(),
                updated_at: (now + chrono::TimeDelta::minutes(1)).into(),
            },
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows])
            .into_connection();

        let repo = PostgresCommentRepository::new(Arc::new(db));

        let comments = repo.list_visible(post_id).await.unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].name, "Ada");
        assert_eq!(comments[1].name, "Grace");
        assert!(comments.iter().all(|c| c.active));
    }

    #[tokio::test]
    async fn test_list_visible_queries_active_rows_oldest_first() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<comment::Model>::new()])
            .into_connection();

        let conn = Arc::new(db);
        let repo = PostgresCommentRepository::new(conn.clone());
        repo.list_visible(post_id).await.unwrap();
        drop(repo);

        let log = Arc::into_inner(conn).unwrap().into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "comments"."id", "comments"."post_id", "comments"."name", "comments"."email", "comments"."body", "comments"."active", "comments"."created_at", "comments"."updated_at" FROM "comments" WHERE "comments"."post_id" = $1 AND "comments"."active" = $2 ORDER BY "comments"."created_at" ASC"#,
                [post_id.into(), true.into()],
            )
        );
    }

    #[tokio::test]
    async fn test_duplicate_slug_surfaces_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"idx_posts_slug_published_date\""
                    .to_owned(),
            )])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));
        let post = Post::from(post_model("Clashing", "clashing"));

        let err = repo.insert(post).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_find_or_create_returns_existing_tag() {
        let existing = tag::Model {
            id: uuid::Uuid::new_v4(),
            name: "rust".to_owned(),
        };
        let existing_id = existing.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![existing]])
            .into_connection();

        let repo = PostgresTagRepository::new(Arc::new(db));

        let tag: Tag = repo.find_or_create("Rust").await.unwrap();

        assert_eq!(tag.id, existing_id);
        assert_eq!(tag.name, "rust");
    }
}
