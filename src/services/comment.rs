use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::{Comment, CommentDto, Post},
    repository::RepositoryState,
};

pub const COMMENT_NOT_IN_POST: &str = "Comment does not belong to post";

/// CommentService
///
/// Every operation addressed through a post path checks, in order: the post exists, the
/// comment exists, the comment belongs to that post.
#[derive(Clone)]
pub struct CommentService {
    repo: RepositoryState,
}

/// Ownership check: the stored parent reference must match the post from the path.
pub fn belongs_to(comment: &Comment, post: &Post) -> bool {
    comment.post_id == post.id
}

impl CommentService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    async fn load_post(&self, post_id: i64) -> AppResult<Post> {
        self.repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post", "id", post_id))
    }

    /// Loads a comment scoped to a post, applying the two existence checks and then the
    /// ownership check.
    async fn load_owned(&self, post_id: i64, comment_id: i64) -> AppResult<Comment> {
        let post = self.load_post(post_id).await?;
        let comment = self
            .repo
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment", "id", comment_id))?;

        if !belongs_to(&comment, &post) {
            tracing::debug!(post_id, comment_id, owner = comment.post_id, "comment addressed through foreign post");
            return Err(AppError::bad_request(COMMENT_NOT_IN_POST));
        }
        Ok(comment)
    }

    #[instrument(skip(self, dto))]
    pub async fn create(&self, post_id: i64, dto: CommentDto) -> AppResult<CommentDto> {
        let post = self.load_post(post_id).await?;
        let saved = self
            .repo
            .insert_comment(mapper::new_comment(post.id, dto))
            .await?;
        tracing::info!(post_id, comment_id = saved.id, "comment created");
        Ok(saved.into())
    }

    /// Fails NotFound for a missing post, like every other comment operation.
    pub async fn list_by_post(&self, post_id: i64) -> AppResult<Vec<CommentDto>> {
        self.load_post(post_id).await?;
        let comments = self.repo.find_comments_by_post(post_id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    pub async fn get_by_id(&self, post_id: i64, comment_id: i64) -> AppResult<CommentDto> {
        Ok(self.load_owned(post_id, comment_id).await?.into())
    }

    /// Overwrites name, email and body. The comment stays attached to its post.
    #[instrument(skip(self, dto))]
    pub async fn update(
        &self,
        post_id: i64,
        comment_id: i64,
        dto: CommentDto,
    ) -> AppResult<CommentDto> {
        let existing = self.load_owned(post_id, comment_id).await?;
        let updated = self
            .repo
            .update_comment(&mapper::patch_comment(existing, dto))
            .await?
            .ok_or_else(|| AppError::not_found("Comment", "id", comment_id))?;
        tracing::info!(post_id, comment_id, "comment updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, post_id: i64, comment_id: i64) -> AppResult<()> {
        self.load_owned(post_id, comment_id).await?;
        if !self.repo.delete_comment(comment_id).await? {
            return Err(AppError::not_found("Comment", "id", comment_id));
        }
        tracing::info!(post_id, comment_id, "comment deleted");
        Ok(())
    }
}
