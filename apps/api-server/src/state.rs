//! Application state - shared across all handlers.

use std::sync::Arc;

use gazette_core::ports::{
    AuthorRepository, CommentRepository, Mailer, PostRepository, TagRepository,
};
use gazette_infra::database::{
    DatabaseConnections, PostgresAuthorRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresTagRepository,
};
use gazette_infra::mailer::{LogMailer, SmtpConfig, SmtpMailer};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub db: Arc<DatabaseConnections>,
    /// Base for absolute post links in share mail.
    pub site_base_url: String,
    /// Posts per listing page.
    pub page_size: u64,
}

impl AppState {
    /// Build the application state. The database is mandatory; startup
    /// fails without it.
    pub async fn new(config: &AppConfig) -> Result<Self, String> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let connections = DatabaseConnections::init(db_config)
            .await
            .map_err(|e| format!("Failed to connect to database: {e}"))?;
        let db = Arc::new(connections);

        let authors: Arc<dyn AuthorRepository> =
            Arc::new(PostgresAuthorRepository::new(db.main.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db.main.clone()));
        let comments: Arc<dyn CommentRepository> =
            Arc::new(PostgresCommentRepository::new(db.main.clone()));
        let tags: Arc<dyn TagRepository> = Arc::new(PostgresTagRepository::new(db.main.clone()));

        let mailer: Arc<dyn Mailer> = match SmtpConfig::from_env() {
            Some(smtp) => {
                let mailer = SmtpMailer::new(smtp)
                    .map_err(|e| format!("Invalid SMTP configuration: {e}"))?;
                tracing::info!("SMTP mailer enabled");
                Arc::new(mailer)
            }
            None => {
                tracing::warn!("SMTP_HOST not set. Outbound mail will be logged, not delivered.");
                Arc::new(LogMailer)
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            authors,
            posts,
            comments,
            tags,
            mailer,
            db,
            site_base_url: config.site_base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }
}
