use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create routes for the users feature.
///
/// Note: user management is deliberately unauthenticated; it is an
/// internally-trusted capability and must not be exposed publicly as-is.
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/user",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/user/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .with_state(service)
}
