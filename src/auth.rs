use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::AppError,
    models::{Role, User},
    repository::RepositoryState,
};

/// Claims
///
/// Payload of the bearer tokens issued by `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's UUID.
    pub sub: Uuid,
    /// Role at issue time. Informational; the extractor re-reads the role from the store.
    pub role: String,
    /// Expiration Time (exp), seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat), seconds since the epoch.
    pub iat: usize,
}

/// issue_token
///
/// Signs an HS256 token for `user` valid for `config.jwt_expiration_ms`.
pub fn issue_token(config: &AppConfig, user: &User) -> Result<String, AppError> {
    let now = Utc::now().timestamp().max(0) as usize;
    let lifetime = (config.jwt_expiration_ms / 1000) as usize;
    let claims = Claims {
        sub: user.id,
        role: user.role.clone(),
        iat: now,
        exp: now.saturating_add(lifetime),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// verify_token
///
/// Checks signature and expiry. Every failure collapses into `AppError::Unauthorized`.
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                other => tracing::debug!(?other, "rejected invalid token"),
            }
            Err(AppError::Unauthorized)
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// AuthUser
///
/// The resolved identity of a request carrying a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// AuthUser Extractor Implementation
///
/// 1. Pull the repository and config out of the app state.
/// 2. Require an `Authorization: Bearer <token>` header.
/// 3. Verify the JWT.
/// 4. Re-load the user so deleted accounts and demoted roles take effect immediately.
///
/// Rejection: `AppError::Unauthorized` (401) on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = verify_token(&config, token)?;

        let user = repo
            .find_user(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            id: user.id,
            role: Role::parse(&user.role),
        })
    }
}

/// require_admin
///
/// Route middleware for every ADMIN-only endpoint. Authentication failures surface as 401
/// through the extractor; an authenticated non-admin gets 403. The handler never runs in
/// either case.
pub async fn require_admin(
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !auth_user.is_admin() {
        tracing::debug!(user_id = %auth_user.id, "non-admin rejected from admin route");
        return Err(AppError::Forbidden);
    }
    Ok(next.run(request).await)
}
