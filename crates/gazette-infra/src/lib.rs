//! # Gazette Infrastructure
//!
//! Concrete implementations of the ports defined in `gazette-core`.
//! This crate contains database, authentication, and mail integrations.

pub mod auth;
pub mod database;
pub mod mailer;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
pub use mailer::{LogMailer, SmtpConfig, SmtpMailer};
