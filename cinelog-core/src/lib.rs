//! Core library for Cinelog.
//!
//! Holds everything the server and seeder share: the error taxonomy,
//! the rating aggregation and catalog pipeline, review and account
//! validation, the repository ports with their Postgres
//! implementations, and the TMDB discover provider.
#![allow(missing_docs)]

pub mod api_types;
pub mod catalog;
pub mod database;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod ratings;
pub mod reviews;
pub mod users;

pub use error::{CoreError, Result};

/// Embedded migrator, exposed for tests and external tooling.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
