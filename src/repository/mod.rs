use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Category, Comment, NewCategory, NewComment, NewPost, Post, User};
use crate::pagination::{Page, PageRequest};

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// RepositoryError
///
/// Failures of the underlying store. "Row not found" is never an error here: lookups return
/// `Option` and the service layer decides whether absence is a `NotFound`.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository Trait
///
/// The persistence contract the services are written against. Implemented by
/// `PostgresRepository` for real deployments and `InMemoryRepository` for local runs and tests.
///
/// `update_*` methods return `None` when the row vanished between load and save;
/// `delete_*` methods return whether a row was removed.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Categories ---
    async fn insert_category(&self, category: NewCategory) -> RepoResult<Category>;
    async fn find_category(&self, id: i64) -> RepoResult<Option<Category>>;
    // Store-native order (ascending id), no pagination.
    async fn list_categories(&self) -> RepoResult<Vec<Category>>;
    async fn update_category(&self, category: &Category) -> RepoResult<Option<Category>>;
    // Referencing posts keep existing with `category_id` cleared.
    async fn delete_category(&self, id: i64) -> RepoResult<bool>;

    // --- Posts ---
    async fn insert_post(&self, post: NewPost) -> RepoResult<Post>;
    async fn find_post(&self, id: i64) -> RepoResult<Option<Post>>;
    // Ordered by (sort field, id) in the requested direction.
    async fn find_posts_page(&self, request: &PageRequest) -> RepoResult<Page<Post>>;
    async fn find_posts_by_category(&self, category_id: i64) -> RepoResult<Vec<Post>>;
    async fn update_post(&self, post: &Post) -> RepoResult<Option<Post>>;
    // Cascades to the post's comments.
    async fn delete_post(&self, id: i64) -> RepoResult<bool>;

    // --- Comments ---
    async fn insert_comment(&self, comment: NewComment) -> RepoResult<Comment>;
    async fn find_comment(&self, id: i64) -> RepoResult<Option<Comment>>;
    async fn find_comments_by_post(&self, post_id: i64) -> RepoResult<Vec<Comment>>;
    // Batch variant used to fill `PostDto::comments` for a whole page in one query.
    async fn find_comments_by_posts(&self, post_ids: &[i64]) -> RepoResult<Vec<Comment>>;
    // Never rewrites `post_id`.
    async fn update_comment(&self, comment: &Comment) -> RepoResult<Option<Comment>>;
    async fn delete_comment(&self, id: i64) -> RepoResult<bool>;

    // --- Users ---
    async fn find_user(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_user_by_login(&self, username_or_email: &str) -> RepoResult<Option<User>>;
    async fn username_taken(&self, username: &str) -> RepoResult<bool>;
    async fn email_taken(&self, email: &str) -> RepoResult<bool>;
    async fn insert_user(&self, user: User) -> RepoResult<User>;
}

/// RepositoryState
///
/// The shared handle placed in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;
