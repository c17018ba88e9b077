use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{AppState, error::AppResult, error::ErrorDetails, extract::ValidatedJson, models::CommentDto};

/// create_comment
///
/// [Public Route] Attaches a new comment to the post in the path.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    tag = "comments",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = CommentDto,
    responses(
        (status = 201, description = "Created", body = CommentDto),
        (status = 400, description = "Validation failed", body = ErrorDetails),
        (status = 404, description = "Post Not Found", body = ErrorDetails)
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let saved = state.comments().create(post_id, payload).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// get_comments_by_post_id
///
/// [Public Route] Every comment of the post; 404 when the post is unknown.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments",
    tag = "comments",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments of the post", body = [CommentDto]),
        (status = 404, description = "Post Not Found", body = ErrorDetails)
    )
)]
pub async fn get_comments_by_post_id(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<Vec<CommentDto>>> {
    Ok(Json(state.comments().list_by_post(post_id).await?))
}

/// get_comment_by_id
///
/// [Public Route] 400 when the comment exists but belongs to another post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Found", body = CommentDto),
        (status = 400, description = "Comment does not belong to post", body = ErrorDetails),
        (status = 404, description = "Post or Comment Not Found", body = ErrorDetails)
    )
)]
pub async fn get_comment_by_id(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> AppResult<Json<CommentDto>> {
    Ok(Json(state.comments().get_by_id(post_id, comment_id).await?))
}

/// update_comment
///
/// [Public Route] Overwrites name, email and body of a comment owned by the post.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = CommentDto,
    responses(
        (status = 200, description = "Updated", body = CommentDto),
        (status = 400, description = "Validation failed or foreign comment", body = ErrorDetails),
        (status = 404, description = "Post or Comment Not Found", body = ErrorDetails)
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    ValidatedJson(payload): ValidatedJson<CommentDto>,
) -> AppResult<Json<CommentDto>> {
    Ok(Json(
        state.comments().update(post_id, comment_id, payload).await?,
    ))
}

/// delete_comment
///
/// [Public Route] Same existence and ownership checks as the read.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = String),
        (status = 400, description = "Comment does not belong to post", body = ErrorDetails),
        (status = 404, description = "Post or Comment Not Found", body = ErrorDetails)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> AppResult<(StatusCode, &'static str)> {
    state.comments().delete(post_id, comment_id).await?;
    Ok((StatusCode::OK, "Comment deleted successfully"))
}
