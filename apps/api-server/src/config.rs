//! Application configuration loaded from environment variables.

use std::env;

use gazette_core::pagination::DEFAULT_PAGE_SIZE;
use gazette_infra::database::DatabaseConfig;

/// Parse a positive integer; zero and garbage read as unset.
fn positive_u64(raw: &str) -> Option<u64> {
    raw.parse().ok().filter(|&n| n > 0)
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Absolute base for links composed into outbound mail.
    pub site_base_url: String,
    /// Posts per listing page.
    pub page_size: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            site_base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|s| positive_u64(&s))
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_must_be_a_positive_number() {
        assert_eq!(positive_u64("5"), Some(5));
        assert_eq!(positive_u64("0"), None);
        assert_eq!(positive_u64("-1"), None);
        assert_eq!(positive_u64("five"), None);
    }
}
