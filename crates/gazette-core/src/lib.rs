//! # Gazette Core
//!
//! The domain layer of the Gazette blog service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod share;

pub use error::DomainError;
