use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use blog_api::{
    AppState,
    auth::{self, AuthUser, Claims},
    config::{AdminBootstrap, AppConfig},
    models::{LoginDto, RegisterDto, Role, User},
    repository::{InMemoryRepository, Repository},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Signs a token directly, bypassing `issue_token`, so expiry can be forced into the past.
fn create_token(user_id: Uuid, iat: u64, exp: u64) -> String {
    let claims = Claims {
        sub: user_id,
        role: "USER".to_string(),
        iat: iat as usize,
        exp: exp as usize,
    };

    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

async fn create_app_state(users: Vec<User>) -> AppState {
    let repo = InMemoryRepository::new();
    for user in users {
        repo.insert_user(user).await.unwrap();
    }
    AppState::new(Arc::new(repo), test_config())
}

fn make_user(role: Role) -> User {
    let id = Uuid::new_v4();
    User {
        id,
        name: "Test User".to_string(),
        username: format!("user-{}", id.simple()),
        email: format!("{}@example.com", id.simple()),
        password_hash: auth::hash_password("password123").unwrap(),
        role: role.as_str().to_string(),
    }
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri, bearer: Option<&str>) -> Parts {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(axum::body::Body::empty()).unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Extractor Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let admin = make_user(Role::Admin);
    let state = create_app_state(vec![admin.clone()]).await;

    let now = now_secs();
    let token = create_token(admin.id, now, now + 3600);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), Some(&token));

    let auth_user = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect("valid token should authenticate");

    assert_eq!(auth_user.id, admin.id);
    // The role comes from the store, not from the token claim.
    assert_eq!(auth_user.role, Role::Admin);
    assert!(auth_user.is_admin());
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let state = create_app_state(vec![]).await;
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), None);

    let result = AuthUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_non_bearer_scheme() {
    let state = create_app_state(vec![]).await;
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), None);
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_static("Basic YWRtaW46YWRtaW4="),
    );

    let result = AuthUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    let user = make_user(Role::User);
    let state = create_app_state(vec![user.clone()]).await;

    // Well past the default 60s leeway.
    let now = now_secs();
    let token = create_token(user.id, now - 7200, now - 3600);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), Some(&token));

    let result = AuthUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_foreign_signature() {
    let user = make_user(Role::User);
    let state = create_app_state(vec![user.clone()]).await;

    let other = AppConfig {
        jwt_secret: "some-other-secret".to_string(),
        ..AppConfig::default()
    };
    let token = auth::issue_token(&other, &user).unwrap();
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), Some(&token));

    let result = AuthUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_for_unknown_subject() {
    // A correctly signed token whose user is not in the store.
    let state = create_app_state(vec![]).await;
    let ghost = make_user(Role::Admin);
    let token = auth::issue_token(&state.config, &ghost).unwrap();
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), Some(&token));

    let result = AuthUser::from_request_parts(&mut parts, &state).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

// --- AuthService Tests ---

#[tokio::test]
async fn test_register_then_login_by_username_and_email() {
    let state = create_app_state(vec![]).await;

    let created = state
        .auth()
        .register(RegisterDto {
            name: "Jane".to_string(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "correct-horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.role, "USER");
    assert_ne!(created.password_hash, "correct-horse");

    for login in ["jane", "jane@example.com"] {
        let response = state
            .auth()
            .login(LoginDto {
                username_or_email: login.to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.token_type, "Bearer");

        let claims = auth::verify_token(&state.config, &response.access_token).unwrap();
        assert_eq!(claims.sub, created.id);
    }
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let user = make_user(Role::User);
    let state = create_app_state(vec![user.clone()]).await;

    let err = state
        .auth()
        .login(LoginDto {
            username_or_email: user.username.clone(),
            password: "not-the-password".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_duplicate_username_and_email() {
    let existing = make_user(Role::User);
    let state = create_app_state(vec![existing.clone()]).await;

    let dup_username = state
        .auth()
        .register(RegisterDto {
            name: "Other".to_string(),
            username: existing.username.clone(),
            email: "fresh@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(dup_username.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dup_username.to_string(), "Username is already exists!");

    let dup_email = state
        .auth()
        .register(RegisterDto {
            name: "Other".to_string(),
            username: "fresh-name".to_string(),
            email: existing.email.clone(),
            password: "password123".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(dup_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dup_email.to_string(), "Email is already exists!");
}

#[tokio::test]
async fn test_bootstrap_admin_is_idempotent() {
    let state = create_app_state(vec![]).await;
    let admin = AdminBootstrap {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: "admin-password".to_string(),
    };

    assert!(state.auth().bootstrap_admin(&admin).await.unwrap());
    assert!(!state.auth().bootstrap_admin(&admin).await.unwrap());

    let stored = state.repo.find_user_by_login("admin").await.unwrap().unwrap();
    assert_eq!(Role::parse(&stored.role), Role::Admin);
}
