use blog_api::{
    AppConfig, AppState, create_router,
    config::AdminBootstrap,
    error::ErrorDetails,
    models::{CategoryDto, JwtAuthResponse, PostDto, PostResponse},
    repository::{InMemoryRepository, RepositoryState},
};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin-password";

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "usernameOrEmail": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status(), StatusCode::OK);
        let body: JwtAuthResponse = response.json().await.unwrap();
        assert_eq!(body.token_type, "Bearer");
        body.access_token
    }

    async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    async fn user_token(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({
                "name": "Regular",
                "username": "regular",
                "email": "regular@example.com",
                "password": "regular-password"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        self.login("regular", "regular-password").await
    }
}

/// Serves the full router over the in-memory store on an ephemeral port.
async fn spawn_app() -> TestApp {
    let config = AppConfig {
        admin: Some(AdminBootstrap {
            username: ADMIN_USERNAME.to_string(),
            email: "admin@localhost".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        ..AppConfig::default()
    };
    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    let state = AppState::new(repo, config.clone());

    if let Some(admin) = &config.admin {
        state.auth().bootstrap_admin(admin).await.unwrap();
    }

    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    // Every response carries a request id.
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = response.json().await.unwrap();
    assert!(doc["paths"]["/api/v1/posts"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_admin_routes_require_token_and_role() {
    let app = spawn_app().await;
    let payload = json!({ "name": "Rust", "description": "Systems" });

    let anonymous = app
        .client
        .post(app.url("/api/categories"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let user_token = app.user_token().await;
    let forbidden = app
        .client
        .post(app.url("/api/categories"))
        .bearer_auth(&user_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Neither attempt created anything.
    let listed: Vec<CategoryDto> = app
        .client
        .get(app.url("/api/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());

    let admin_token = app.admin_token().await;
    let created = app
        .client
        .post(app.url("/api/categories"))
        .bearer_auth(&admin_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let category: CategoryDto = created.json().await.unwrap();
    assert_eq!(category.name, "Rust");

    // Reads on the same path stay public.
    let fetched = app
        .client
        .get(app.url(&format!("/api/categories/{}", category.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_post_is_rejected_without_persisting() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/api/v1/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title": "A", "description": "short", "content": "body" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDetails = response.json().await.unwrap();
    let fields = error.field_errors.expect("field errors present");
    assert!(fields.contains_key("title"));
    assert!(fields.contains_key("description"));

    let page: PostResponse = app
        .client
        .get(app.url("/api/v1/posts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total_elements, 0);
}

#[tokio::test]
async fn test_missing_post_fields_are_reported_per_field() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .post(app.url("/api/v1/posts"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Hi", "description": "short" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDetails = response.json().await.unwrap();
    let fields = error.field_errors.expect("field errors present");
    assert!(fields.contains_key("description"));
    assert!(fields.contains_key("content"));
    assert!(!fields.contains_key("title"));

    let page: PostResponse = app
        .client
        .get(app.url("/api/v1/posts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total_elements, 0);
}

#[tokio::test]
async fn test_huge_page_bounds_return_a_page() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let created = app
        .client
        .post(app.url("/api/v1/posts"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Only post",
            "description": "A description long enough",
            "content": "Body"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app
        .client
        .get(app.url("/api/v1/posts?pageSize=9223372036854775807"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: PostResponse = response.json().await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.last);

    let response = app
        .client
        .get(app.url("/api/v1/posts?pageNo=9223372036854775807&pageSize=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: PostResponse = response.json().await.unwrap();
    assert!(page.content.is_empty());
    assert!(page.last);
}

#[tokio::test]
async fn test_delete_unknown_category_is_not_found() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let response = app
        .client
        .delete(app.url("/api/categories/999"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorDetails = response.json().await.unwrap();
    assert_eq!(error.message, "Category not found with id : '999'");
}

#[tokio::test]
async fn test_post_listing_and_comment_lifecycle() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    for title in ["A", "B", "C", "D", "E"] {
        let response = app
            .client
            .post(app.url("/api/v1/posts"))
            .bearer_auth(&token)
            .json(&json!({
                "title": format!("{} title", title),
                "description": "A description long enough",
                "content": "Body"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page: PostResponse = app
        .client
        .get(app.url("/api/v1/posts?pageNo=0&pageSize=2&sortBy=title&sortDir=desc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = page.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["E title", "D title"]);
    assert_eq!(page.total_pages, 3);
    assert!(!page.last);

    let bad_sort = app
        .client
        .get(app.url("/api/v1/posts?sortBy=secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_sort.status(), StatusCode::BAD_REQUEST);

    // Comments are public and always addressed through their post.
    let post_id = page.content[0].id;
    let created = app
        .client
        .post(app.url(&format!("/api/v1/posts/{}/comments", post_id)))
        .json(&json!({ "name": "Ann", "email": "ann@example.com", "body": "Great write-up, thanks!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let post: PostDto = app
        .client
        .get(app.url(&format!("/api/v1/posts/{}", post_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post.comments.len(), 1);
    let comment_id = post.comments[0].id;

    let other_post = page.content[1].id;
    let foreign = app
        .client
        .get(app.url(&format!("/api/v1/posts/{}/comments/{}", other_post, comment_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::BAD_REQUEST);

    let deleted = app
        .client
        .delete(app.url(&format!("/api/v1/posts/{}/comments/{}", post_id, comment_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(deleted.text().await.unwrap(), "Comment deleted successfully");
}

#[tokio::test]
async fn test_register_duplicate_and_bad_login() {
    let app = spawn_app().await;

    let duplicate = app
        .client
        .post(app.url("/api/v1/auth/signup"))
        .json(&json!({
            "name": "Impostor",
            "username": ADMIN_USERNAME,
            "email": "someone@example.com",
            "password": "password123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDetails = duplicate.json().await.unwrap();
    assert_eq!(error.message, "Username is already exists!");

    let bad_login = app
        .client
        .post(app.url("/api/v1/auth/signin"))
        .json(&json!({ "usernameOrEmail": ADMIN_USERNAME, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_login.status(), StatusCode::UNAUTHORIZED);
}
