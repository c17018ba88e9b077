use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

// Routing segregated by access level (Public, Admin).
pub mod routes;
use routes::{admin, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

use services::{AuthService, CategoryService, CommentService, PostService};

/// ApiDoc
///
/// OpenAPI document for every handler and DTO, served at `/api-docs/openapi.json` and
/// browsable through Swagger UI at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::categories::add_category, handlers::categories::get_category,
        handlers::categories::get_categories, handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::posts::create_post, handlers::posts::get_all_posts,
        handlers::posts::get_post_by_id, handlers::posts::update_post,
        handlers::posts::delete_post, handlers::posts::get_posts_by_category,
        handlers::comments::create_comment, handlers::comments::get_comments_by_post_id,
        handlers::comments::get_comment_by_id, handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::auth::login, handlers::auth::register,
    ),
    components(
        schemas(
            models::CategoryDto, models::PostDto, models::CommentDto, models::PostResponse,
            models::LoginDto, models::RegisterDto, models::JwtAuthResponse,
            error::ErrorDetails,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "categories", description = "Category CRUD"),
        (name = "posts", description = "CRUD REST APIs for Post Resource"),
        (name = "comments", description = "Comments addressed through their post"),
        (name = "auth", description = "Login and registration")
    )
)]
pub struct ApiDoc;

/// Declares the `bearer_auth` scheme referenced by the admin endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// Shared, cheaply clonable container of the store handle and configuration. Services are
/// built from it per request; they hold nothing but the handle.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        Self { repo, config }
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.repo.clone())
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.repo.clone())
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.repo.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.repo.clone(), self.config.clone())
    }
}

// --- Axum FromRef Extractor Implementations ---

// Lets extractors such as `AuthUser` pull single components out of the shared state.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing tree, applies the admin layer and the observability stack, and
/// registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Admin routes: `route_layer` so unmatched paths still 404 instead of 401.
        .merge(
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_admin,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: every log line of a request carries its `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
