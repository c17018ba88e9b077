//! Field-by-field conversions between stored entities and transfer objects.
//!
//! `patch_*` functions implement update semantics: they take the loaded record and the
//! incoming DTO and return the record to persist. Only the named fields are overwritten;
//! identity and ownership (`id`, `post_id`) always come from the existing record.

use crate::models::{
    Category, CategoryDto, Comment, CommentDto, NewCategory, NewComment, NewPost, Post, PostDto,
};

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        CategoryDto {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

impl From<CategoryDto> for NewCategory {
    fn from(dto: CategoryDto) -> Self {
        NewCategory {
            name: dto.name,
            description: dto.description,
        }
    }
}

pub fn patch_category(existing: Category, changes: CategoryDto) -> Category {
    Category {
        name: changes.name,
        description: changes.description,
        ..existing
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        CommentDto {
            id: comment.id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
        }
    }
}

pub fn new_comment(post_id: i64, dto: CommentDto) -> NewComment {
    NewComment {
        name: dto.name,
        email: dto.email,
        body: dto.body,
        post_id,
    }
}

pub fn patch_comment(existing: Comment, changes: CommentDto) -> Comment {
    Comment {
        name: changes.name,
        email: changes.email,
        body: changes.body,
        ..existing
    }
}

/// Builds the outgoing DTO; `comments` must already be filtered to this post.
pub fn post_to_dto(post: Post, comments: Vec<Comment>) -> PostDto {
    PostDto {
        id: post.id,
        title: post.title,
        description: post.description,
        content: post.content,
        comments: comments.into_iter().map(CommentDto::from).collect(),
        category_id: post.category_id,
    }
}

impl From<PostDto> for NewPost {
    fn from(dto: PostDto) -> Self {
        NewPost {
            title: dto.title,
            description: dto.description,
            content: dto.content,
            category_id: dto.category_id,
        }
    }
}

/// `category_id` is mapped explicitly, so an update without it detaches the post.
pub fn patch_post(existing: Post, changes: PostDto) -> Post {
    Post {
        title: changes.title,
        description: changes.description,
        content: changes.content,
        category_id: changes.category_id,
        ..existing
    }
}
