use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppResult, ErrorDetails},
    extract::ValidatedJson,
    models::{PostDto, PostResponse},
    pagination::PostPageQuery,
};

/// create_post
///
/// [Admin Route] Creates a post. Title, description and content constraints are enforced by
/// `ValidatedJson` before the service is called.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = PostDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = PostDto),
        (status = 400, description = "Validation failed", body = ErrorDetails),
        (status = 404, description = "Unknown category", body = ErrorDetails)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let saved = state.posts().create(payload).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// get_all_posts
///
/// [Public Route] Paginated, sorted post listing.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PostPageQuery),
    responses(
        (status = 200, description = "One page of posts", body = PostResponse),
        (status = 400, description = "Bad page or sort parameters", body = ErrorDetails)
    )
)]
pub async fn get_all_posts(
    State(state): State<AppState>,
    Query(query): Query<PostPageQuery>,
) -> AppResult<Json<PostResponse>> {
    let request = query.into_page_request()?;
    Ok(Json(state.posts().get_all(request).await?))
}

/// get_post_by_id
///
/// [Public Route] Single post with its comments.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Found", body = PostDto),
        (status = 404, description = "Not Found", body = ErrorDetails)
    )
)]
pub async fn get_post_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    Ok(Json(state.posts().get_by_id(id).await?))
}

/// update_post
///
/// [Admin Route] Overwrites title, description, content and categoryId.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = PostDto),
        (status = 400, description = "Validation failed", body = ErrorDetails),
        (status = 404, description = "Not Found", body = ErrorDetails)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PostDto>,
) -> AppResult<Json<PostDto>> {
    Ok(Json(state.posts().update(payload, id).await?))
}

/// delete_post
///
/// [Public Route] Removes a post and its comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted", body = String),
        (status = 404, description = "Not Found", body = ErrorDetails)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, &'static str)> {
    state.posts().delete_by_id(id).await?;
    Ok((StatusCode::OK, "Post entity deleted successfully"))
}

/// get_posts_by_category
///
/// [Public Route] Every post of a category; 404 when the category itself is unknown.
#[utoipa::path(
    get,
    path = "/api/v1/posts/category/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Posts of the category", body = [PostDto]),
        (status = 404, description = "Category Not Found", body = ErrorDetails)
    )
)]
pub async fn get_posts_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<PostDto>>> {
    Ok(Json(state.posts().get_by_category(category_id).await?))
}
