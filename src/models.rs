use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Core Application Schemas (Mapped to Database) ---

/// Category
///
/// A row of the `categories` table. Posts reference it through `posts.category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Post
///
/// A row of the `posts` table. Owns zero or more comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    // Nullable FK to categories.id; cleared when the category is deleted.
    pub category_id: Option<i64>,
}

/// Comment
///
/// A row of the `comments` table. `post_id` is fixed at creation and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Default)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub post_id: i64,
}

/// User
///
/// An account able to obtain a bearer token. Only `Role::Admin` may call mutating
/// category/post endpoints.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    // Stored as text: 'ADMIN' | 'USER'.
    pub role: String,
}

/// Role
///
/// Coarse RBAC role carried by a user and checked by the admin middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Unknown role strings degrade to `User`, never to `Admin`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start_matches("ROLE_");
        if raw.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

// --- Insert Payloads (store assigns identity) ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
    pub post_id: i64,
}

// --- Transfer Objects (JSON surface) ---

/// CategoryDto
///
/// JSON shape of a category. `id` is ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 1, message = "Category name should not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// PostDto
///
/// JSON shape of a post. `comments` is output only: it is filled on every read and ignored
/// on create/update. Missing text fields decode as empty and are reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PostDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 2, message = "Post title should have at least 2 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Post description should have at least 10 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Post content should not be empty"))]
    pub content: String,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// CommentDto
///
/// JSON shape of a comment. The owning post comes from the request path, never the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommentDto {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name should not be null or empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Email should be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Comment body must be minimum 10 characters"))]
    pub body: String,
}

/// PostResponse
///
/// One page of the post listing plus the metadata needed to walk the remaining pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PostResponse {
    pub content: Vec<PostDto>,
    pub page_no: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

// --- Auth Payloads ---

/// LoginDto
///
/// Input for `POST /api/v1/auth/login`. Either the username or the email is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username_or_email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// RegisterDto
///
/// Input for `POST /api/v1/auth/register`. New accounts always get `Role::User`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 3, message = "Username should have at least 3 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Email should be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password should have at least 8 characters"))]
    pub password: String,
}

/// JwtAuthResponse
///
/// Bearer token handed out after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JwtAuthResponse {
    pub access_token: String,
    pub token_type: String,
}

impl JwtAuthResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}
