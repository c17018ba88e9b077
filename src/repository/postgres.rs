use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use uuid::Uuid;

use super::{RepoResult, Repository};
use crate::models::{Category, Comment, NewCategory, NewComment, NewPost, Post, User};
use crate::pagination::{Page, PageRequest};

const POST_COLUMNS: &str = "id, title, description, content, category_id";
const COMMENT_COLUMNS: &str = "id, name, email, body, post_id";
const USER_COLUMNS: &str = "id, name, username, email, password_hash, role";

/// PostgresRepository
///
/// `Repository` backed by PostgreSQL. Queries are bound at runtime (`query_as` + `bind`)
/// so the crate builds without a live database; the schema lives in `migrations/`.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations. Called once at startup.
    pub async fn migrate(&self) -> RepoResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Logs the failing operation before handing the error to the caller.
fn logged<T>(op: &'static str, result: Result<T, sqlx::Error>) -> RepoResult<T> {
    result.map_err(|e| {
        tracing::error!("{} error: {:?}", op, e);
        e.into()
    })
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- CATEGORIES ---

    async fn insert_category(&self, category: NewCategory) -> RepoResult<Category> {
        let result = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(category.name)
        .bind(category.description)
        .fetch_one(&self.pool)
        .await;
        logged("insert_category", result)
    }

    async fn find_category(&self, id: i64) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        logged("find_category", result)
    }

    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let result = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;
        logged("list_categories", result)
    }

    async fn update_category(&self, category: &Category) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3 WHERE id = $1 RETURNING id, name, description",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .fetch_optional(&self.pool)
        .await;
        logged("update_category", result)
    }

    /// The `ON DELETE SET NULL` foreign key detaches referencing posts.
    async fn delete_category(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        logged("delete_category", result).map(|res| res.rows_affected() > 0)
    }

    // --- POSTS ---

    async fn insert_post(&self, post: NewPost) -> RepoResult<Post> {
        let sql = format!(
            "INSERT INTO posts (title, description, content, category_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            POST_COLUMNS
        );
        let result = sqlx::query_as::<_, Post>(&sql)
            .bind(post.title)
            .bind(post.description)
            .bind(post.content)
            .bind(post.category_id)
            .fetch_one(&self.pool)
            .await;
        logged("insert_post", result)
    }

    async fn find_post(&self, id: i64) -> RepoResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        let result = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        logged("find_post", result)
    }

    /// find_posts_page
    ///
    /// The sort column comes from the `SortField` whitelist, so pushing it into the SQL text
    /// is safe; limit and offset are bound. `id` breaks ties in the same direction so that a
    /// descending listing is the exact reverse of the ascending one.
    async fn find_posts_page(&self, request: &PageRequest) -> RepoResult<Page<Post>> {
        let total = logged(
            "count_posts",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
                .fetch_one(&self.pool)
                .await,
        )?;

        let direction = request.direction.as_sql();
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM posts", POST_COLUMNS));
        builder.push(format!(
            " ORDER BY {} {}, id {}",
            request.sort_by.column(),
            direction,
            direction
        ));
        builder.push(" LIMIT ");
        builder.push_bind(request.page_size);
        builder.push(" OFFSET ");
        builder.push_bind(request.offset());

        let content = logged(
            "find_posts_page",
            builder.build_query_as::<Post>().fetch_all(&self.pool).await,
        )?;

        Ok(Page {
            content,
            request: *request,
            total_elements: total,
        })
    }

    async fn find_posts_by_category(&self, category_id: i64) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE category_id = $1 ORDER BY id",
            POST_COLUMNS
        );
        let result = sqlx::query_as::<_, Post>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await;
        logged("find_posts_by_category", result)
    }

    async fn update_post(&self, post: &Post) -> RepoResult<Option<Post>> {
        let sql = format!(
            "UPDATE posts SET title = $2, description = $3, content = $4, category_id = $5 WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        );
        let result = sqlx::query_as::<_, Post>(&sql)
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.content)
            .bind(post.category_id)
            .fetch_optional(&self.pool)
            .await;
        logged("update_post", result)
    }

    /// Comments go with the post through `ON DELETE CASCADE`.
    async fn delete_post(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        logged("delete_post", result).map(|res| res.rows_affected() > 0)
    }

    // --- COMMENTS ---

    async fn insert_comment(&self, comment: NewComment) -> RepoResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (name, email, body, post_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            COMMENT_COLUMNS
        );
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.name)
            .bind(comment.email)
            .bind(comment.body)
            .bind(comment.post_id)
            .fetch_one(&self.pool)
            .await;
        logged("insert_comment", result)
    }

    async fn find_comment(&self, id: i64) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {} FROM comments WHERE id = $1", COMMENT_COLUMNS);
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        logged("find_comment", result)
    }

    async fn find_comments_by_post(&self, post_id: i64) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM comments WHERE post_id = $1 ORDER BY id",
            COMMENT_COLUMNS
        );
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await;
        logged("find_comments_by_post", result)
    }

    async fn find_comments_by_posts(&self, post_ids: &[i64]) -> RepoResult<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM comments WHERE post_id = ANY($1) ORDER BY id",
            COMMENT_COLUMNS
        );
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await;
        logged("find_comments_by_posts", result)
    }

    async fn update_comment(&self, comment: &Comment) -> RepoResult<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET name = $2, email = $3, body = $4 WHERE id = $1 RETURNING {}",
            COMMENT_COLUMNS
        );
        let result = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.id)
            .bind(&comment.name)
            .bind(&comment.email)
            .bind(&comment.body)
            .fetch_optional(&self.pool)
            .await;
        logged("update_comment", result)
    }

    async fn delete_comment(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        logged("delete_comment", result).map(|res| res.rows_affected() > 0)
    }

    // --- USERS ---

    async fn find_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        logged("find_user", result)
    }

    async fn find_user_by_login(&self, username_or_email: &str) -> RepoResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE username = $1 OR email = $1 LIMIT 1",
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(username_or_email)
            .fetch_optional(&self.pool)
            .await;
        logged("find_user_by_login", result)
    }

    async fn username_taken(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await;
        logged("username_taken", result)
    }

    async fn email_taken(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        logged("email_taken", result)
    }

    async fn insert_user(&self, user: User) -> RepoResult<User> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS, USER_COLUMNS
        );
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(user.name)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await;
        logged("insert_user", result)
    }
}
