/// Router Module Index
///
/// Routes are split by access level so that authorization is applied once per router (as an
/// axum layer) instead of inside each handler.

/// Routes open to anonymous clients: reads, comments, post deletion, login/registration.
pub mod public;

/// Mutating category/post routes. Wrapped in `auth::require_admin` by `create_router`.
pub mod admin;
