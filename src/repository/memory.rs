use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepoResult, Repository};
use crate::models::{Category, Comment, NewCategory, NewComment, NewPost, Post, User};
use crate::pagination::{Page, PageRequest, SortDirection, SortField};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    users: HashMap<Uuid, User>,
    next_category_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// InMemoryRepository
///
/// `Repository` kept in process memory behind a single `RwLock`. Mirrors the Postgres schema
/// rules: identities start at 1, deleting a category clears `category_id` on its posts and
/// deleting a post removes its comments.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Postgres ordering for nullable columns: NULLS LAST when ascending.
fn cmp_nullable(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Case-folded first, byte order as tiebreak. Close to a linguistic Postgres collation
/// (e.g. `en_US.UTF-8`); under the `C` collation Postgres uses plain byte order instead.
fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn cmp_posts(a: &Post, b: &Post, field: SortField) -> Ordering {
    let primary = match field {
        SortField::Id => Ordering::Equal,
        SortField::Title => cmp_text(&a.title, &b.title),
        SortField::Description => cmp_text(&a.description, &b.description),
        SortField::Content => cmp_text(&a.content, &b.content),
        SortField::CategoryId => cmp_nullable(a.category_id, b.category_id),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl Repository for InMemoryRepository {
    // --- CATEGORIES ---

    async fn insert_category(&self, category: NewCategory) -> RepoResult<Category> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_category_id);
        let stored = Category {
            id,
            name: category.name,
            description: category.description,
        };
        tables.categories.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_category(&self, id: i64) -> RepoResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn update_category(&self, category: &Category) -> RepoResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.get_mut(&category.id).map(|slot| {
            *slot = category.clone();
            slot.clone()
        }))
    }

    async fn delete_category(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(true)
    }

    // --- POSTS ---

    async fn insert_post(&self, post: NewPost) -> RepoResult<Post> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_post_id);
        let stored = Post {
            id,
            title: post.title,
            description: post.description,
            content: post.content,
            category_id: post.category_id,
        };
        tables.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_post(&self, id: i64) -> RepoResult<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_posts_page(&self, request: &PageRequest) -> RepoResult<Page<Post>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            let ordering = cmp_posts(a, b, request.sort_by);
            match request.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total_elements = posts.len() as i64;
        let content = posts
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .collect();

        Ok(Page {
            content,
            request: *request,
            total_elements,
        })
    }

    async fn find_posts_by_category(&self, category_id: i64) -> RepoResult<Vec<Post>> {
        Ok(self
            .tables
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn update_post(&self, post: &Post) -> RepoResult<Option<Post>> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.get_mut(&post.id).map(|slot| {
            *slot = post.clone();
            slot.clone()
        }))
    }

    async fn delete_post(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(true)
    }

    // --- COMMENTS ---

    async fn insert_comment(&self, comment: NewComment) -> RepoResult<Comment> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_comment_id);
        let stored = Comment {
            id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
            post_id: comment.post_id,
        };
        tables.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_comment(&self, id: i64) -> RepoResult<Option<Comment>> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn find_comments_by_post(&self, post_id: i64) -> RepoResult<Vec<Comment>> {
        self.find_comments_by_posts(&[post_id]).await
    }

    async fn find_comments_by_posts(&self, post_ids: &[i64]) -> RepoResult<Vec<Comment>> {
        Ok(self
            .tables
            .read()
            .await
            .comments
            .values()
            .filter(|c| post_ids.contains(&c.post_id))
            .cloned()
            .collect())
    }

    async fn update_comment(&self, comment: &Comment) -> RepoResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        Ok(tables.comments.get_mut(&comment.id).map(|slot| {
            slot.name = comment.name.clone();
            slot.email = comment.email.clone();
            slot.body = comment.body.clone();
            slot.clone()
        }))
    }

    async fn delete_comment(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }

    // --- USERS ---

    async fn find_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_login(&self, username_or_email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username_or_email || u.email == username_or_email)
            .cloned())
    }

    async fn username_taken(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .any(|u| u.username == username))
    }

    async fn email_taken(&self, email: &str) -> RepoResult<bool> {
        Ok(self.tables.read().await.users.values().any(|u| u.email == email))
    }

    async fn insert_user(&self, user: User) -> RepoResult<User> {
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(user)
    }
}
