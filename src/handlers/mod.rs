//! HTTP handlers. Each one decodes its inputs, delegates to a service and shapes the status
//! code; errors pass through as `AppError` unchanged.
//!
//! Coarse authorization (ADMIN on mutating category/post endpoints) is not checked here: the
//! admin router wraps those handlers in `auth::require_admin`.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod posts;
