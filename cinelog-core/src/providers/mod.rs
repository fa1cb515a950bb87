pub mod tmdb;

pub use tmdb::{ProviderError, TmdbClient};
