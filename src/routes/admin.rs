use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{post, put},
};

/// Admin Router Module
///
/// Mutating category and post endpoints. Paths overlap with the public router;
/// axum merges the method routers, so `GET /api/categories/{id}` stays public while `PUT`
/// and `DELETE` on the same path go through the admin layer.
///
/// Access Control:
/// `create_router` applies `auth::require_admin` with `route_layer`, so a request only reaches
/// these handlers with a valid token whose user has role ADMIN.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", post(handlers::categories::add_category))
        .route(
            "/api/categories/{id}",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route("/api/v1/posts", post(handlers::posts::create_post))
        .route("/api/v1/posts/{id}", put(handlers::posts::update_post))
}
