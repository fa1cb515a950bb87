//! Cinelog API server library surface.
//!
//! The binary in `main.rs` wires configuration and resources; routes,
//! handlers, and infrastructure live here so integration tests can
//! assemble the same router.

pub mod handlers;
pub mod infra;
pub mod routes;
pub mod users;

pub use infra::app_state::AppState;
