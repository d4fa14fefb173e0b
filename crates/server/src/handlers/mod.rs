//! Request handlers.

pub mod packument;
pub mod ping;
pub mod publish;
pub mod search;
pub mod session;

pub use packument::get_packument;
pub use ping::ping;
pub use publish::publish_package;
pub use search::search;
pub use session::get_session;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("unknown route".to_string())
}
