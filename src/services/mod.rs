//! Domain services: existence checks, cross-entity consistency and orchestration of
//! repository + mapper calls. Handlers never talk to the repository directly.

mod auth;
mod category;
mod comment;
mod post;

pub use auth::AuthService;
pub use category::CategoryService;
pub use comment::CommentService;
pub use post::PostService;
