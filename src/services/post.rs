use std::collections::HashMap;

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::{Comment, NewPost, Post, PostDto, PostResponse},
    pagination::PageRequest,
    repository::RepositoryState,
};

#[derive(Clone)]
pub struct PostService {
    repo: RepositoryState,
}

impl PostService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    async fn load(&self, id: i64) -> AppResult<Post> {
        self.repo
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post", "id", id))
    }

    async fn ensure_category(&self, category_id: Option<i64>) -> AppResult<()> {
        if let Some(id) = category_id {
            if self.repo.find_category(id).await?.is_none() {
                return Err(AppError::not_found("Category", "id", id));
            }
        }
        Ok(())
    }

    /// Maps posts to DTOs with their comments, fetched in a single batch.
    async fn with_comments(&self, posts: Vec<Post>) -> AppResult<Vec<PostDto>> {
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in self.repo.find_comments_by_posts(&ids).await? {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let comments = by_post.remove(&post.id).unwrap_or_default();
                mapper::post_to_dto(post, comments)
            })
            .collect())
    }

    /// Shape constraints were checked by the extractor; only the category reference is
    /// verified here.
    #[instrument(skip(self, dto), fields(title = %dto.title))]
    pub async fn create(&self, dto: PostDto) -> AppResult<PostDto> {
        self.ensure_category(dto.category_id).await?;
        let saved = self.repo.insert_post(NewPost::from(dto)).await?;
        tracing::info!(post_id = saved.id, "post created");
        Ok(mapper::post_to_dto(saved, vec![]))
    }

    /// get_all
    ///
    /// One zero-based page of posts ordered by the requested field, plus page metadata.
    pub async fn get_all(&self, request: PageRequest) -> AppResult<PostResponse> {
        let page = self.repo.find_posts_page(&request).await?;
        let total_pages = page.total_pages();
        let last = page.is_last();
        let total_elements = page.total_elements;

        Ok(PostResponse {
            content: self.with_comments(page.content).await?,
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<PostDto> {
        let post = self.load(id).await?;
        let comments = self.repo.find_comments_by_post(id).await?;
        Ok(mapper::post_to_dto(post, comments))
    }

    #[instrument(skip(self, dto))]
    pub async fn update(&self, dto: PostDto, id: i64) -> AppResult<PostDto> {
        let existing = self.load(id).await?;
        self.ensure_category(dto.category_id).await?;

        let updated = self
            .repo
            .update_post(&mapper::patch_post(existing, dto))
            .await?
            .ok_or_else(|| AppError::not_found("Post", "id", id))?;
        tracing::info!(post_id = id, "post updated");

        let comments = self.repo.find_comments_by_post(id).await?;
        Ok(mapper::post_to_dto(updated, comments))
    }

    /// Removes the post together with its comments.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.load(id).await?;
        if !self.repo.delete_post(id).await? {
            return Err(AppError::not_found("Post", "id", id));
        }
        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }

    pub async fn get_by_category(&self, category_id: i64) -> AppResult<Vec<PostDto>> {
        if self.repo.find_category(category_id).await?.is_none() {
            return Err(AppError::not_found("Category", "id", category_id));
        }
        let posts = self.repo.find_posts_by_category(category_id).await?;
        self.with_comments(posts).await
    }
}
