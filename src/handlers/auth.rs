use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::{AppResult, ErrorDetails},
    extract::ValidatedJson,
    models::{JwtAuthResponse, LoginDto, RegisterDto},
};

/// login
///
/// [Public Route] Exchanges username/email + password for a bearer token. Also mounted at
/// `/api/v1/auth/signin`.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Token issued", body = JwtAuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorDetails)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginDto>,
) -> AppResult<Json<JwtAuthResponse>> {
    Ok(Json(state.auth().login(payload).await?))
}

/// register
///
/// [Public Route] Creates a USER account. Also mounted at `/api/v1/auth/signup`.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered", body = String),
        (status = 400, description = "Invalid body or username/email taken", body = ErrorDetails)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterDto>,
) -> AppResult<(StatusCode, &'static str)> {
    state.auth().register(payload).await?;
    Ok((StatusCode::CREATED, "User registered successfully!"))
}
