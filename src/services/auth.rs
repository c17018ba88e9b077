use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth,
    config::{AdminBootstrap, AppConfig},
    error::{AppError, AppResult},
    models::{JwtAuthResponse, LoginDto, RegisterDto, Role, User},
    repository::RepositoryState,
};

/// AuthService
///
/// Account registration and token issuance. Token verification lives in the `AuthUser`
/// extractor.
#[derive(Clone)]
pub struct AuthService {
    repo: RepositoryState,
    config: AppConfig,
}

impl AuthService {
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(skip(self, dto), fields(login = %dto.username_or_email))]
    pub async fn login(&self, dto: LoginDto) -> AppResult<JwtAuthResponse> {
        let user = self
            .repo
            .find_user_by_login(&dto.username_or_email)
            .await?
            .filter(|user| auth::verify_password(&dto.password, &user.password_hash))
            .ok_or(AppError::InvalidCredentials)?;

        let token = auth::issue_token(&self.config, &user)?;
        tracing::info!(user_id = %user.id, "token issued");
        Ok(JwtAuthResponse::bearer(token))
    }

    /// New accounts are always plain users; admins only come from the startup bootstrap.
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn register(&self, dto: RegisterDto) -> AppResult<User> {
        if self.repo.username_taken(&dto.username).await? {
            return Err(AppError::BlogApi {
                status: StatusCode::BAD_REQUEST,
                message: "Username is already exists!".to_string(),
            });
        }
        if self.repo.email_taken(&dto.email).await? {
            return Err(AppError::BlogApi {
                status: StatusCode::BAD_REQUEST,
                message: "Email is already exists!".to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            name: dto.name,
            username: dto.username,
            email: dto.email,
            password_hash: auth::hash_password(&dto.password)?,
            role: Role::User.as_str().to_string(),
        };
        let created = self.repo.insert_user(user).await?;
        tracing::info!(user_id = %created.id, "user registered");
        Ok(created)
    }

    /// bootstrap_admin
    ///
    /// Creates the configured ADMIN account unless a user with that username already
    /// exists. Returns whether an account was created.
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> AppResult<bool> {
        if self.repo.username_taken(&admin.username).await? {
            tracing::debug!(username = %admin.username, "admin account already present");
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: admin.username.clone(),
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash: auth::hash_password(&admin.password)?,
            role: Role::Admin.as_str().to_string(),
        };
        self.repo.insert_user(user).await?;
        tracing::info!(username = %admin.username, "admin account bootstrapped");
        Ok(true)
    }
}
