//! Database connection management and SeaORM repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{
    PostgresAuthorRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository,
};

#[cfg(test)]
mod tests;
