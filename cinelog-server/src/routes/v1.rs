use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    handlers::{catalog, reviews},
    infra::app_state::AppState,
    users::auth,
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoints
        .route("/auth/register", post(auth::handlers::register))
        .route("/auth/login", post(auth::handlers::login))
        .route("/auth/refresh", post(auth::handlers::refresh))
        // Public catalog endpoints
        .route("/titles", get(catalog::list_titles))
        .route("/titles/{id}", get(catalog::get_title))
        // Merge protected routes
        .merge(create_protected_routes(state))
}

/// Create protected routes that require authentication
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/auth/logout", post(auth::handlers::logout))
        .route("/auth/me", get(auth::handlers::get_current_user))
        // Review endpoints
        .route("/titles/{id}/reviews", post(reviews::create_review))
        .route("/reviews/{id}", put(reviews::update_review))
        .route("/reviews/{id}", delete(reviews::delete_review))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::middleware::auth_middleware,
        ))
}
