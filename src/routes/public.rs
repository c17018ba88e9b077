use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a bearer token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // --- Auth ---
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/signin", post(handlers::auth::login))
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/signup", post(handlers::auth::register))
        // --- Categories (read-only) ---
        .route("/api/categories", get(handlers::categories::get_categories))
        .route("/api/categories/{id}", get(handlers::categories::get_category))
        // --- Posts ---
        // GET /api/v1/posts?pageNo&pageSize&sortBy&sortDir
        .route("/api/v1/posts", get(handlers::posts::get_all_posts))
        // DELETE is public here, unlike PUT.
        .route(
            "/api/v1/posts/{id}",
            get(handlers::posts::get_post_by_id).delete(handlers::posts::delete_post),
        )
        .route(
            "/api/v1/posts/category/{id}",
            get(handlers::posts::get_posts_by_category),
        )
        // --- Comments (always addressed through their post) ---
        .route(
            "/api/v1/posts/{id}/comments",
            get(handlers::comments::get_comments_by_post_id)
                .post(handlers::comments::create_comment),
        )
        .route(
            "/api/v1/posts/{id}/comments/{comment_id}",
            get(handlers::comments::get_comment_by_id)
                .put(handlers::comments::update_comment)
                .delete(handlers::comments::delete_comment),
        )
}
