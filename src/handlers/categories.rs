use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{AppState, error::AppResult, extract::ValidatedJson, models::CategoryDto};

/// add_category
///
/// [Admin Route] Creates a category.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CategoryDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = CategoryDto),
        (status = 400, description = "Invalid body", body = crate::error::ErrorDetails),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn add_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryDto>,
) -> AppResult<(StatusCode, Json<CategoryDto>)> {
    let saved = state.categories().add(payload).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// get_category
///
/// [Public Route] Single category by id.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Found", body = CategoryDto),
        (status = 404, description = "Not Found", body = crate::error::ErrorDetails)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryDto>> {
    Ok(Json(state.categories().get(id).await?))
}

/// get_categories
///
/// [Public Route] Every category, unpaginated.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "All categories", body = [CategoryDto]))
)]
pub async fn get_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryDto>>> {
    Ok(Json(state.categories().list_all().await?))
}

/// update_category
///
/// [Admin Route] Overwrites name and description.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = CategoryDto),
        (status = 404, description = "Not Found", body = crate::error::ErrorDetails)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CategoryDto>,
) -> AppResult<Json<CategoryDto>> {
    Ok(Json(state.categories().update(payload, id).await?))
}

/// delete_category
///
/// [Admin Route] Removes a category. Its posts remain, detached.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Deleted", body = String),
        (status = 404, description = "Not Found", body = crate::error::ErrorDetails)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, &'static str)> {
    state.categories().delete(id).await?;
    Ok((StatusCode::OK, "Category deleted successfully"))
}
