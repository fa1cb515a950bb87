//! Storage layer: repository ports and their Postgres implementations.

pub mod ports;
pub mod postgres;
pub mod repositories;

pub use postgres::PostgresDatabase;
