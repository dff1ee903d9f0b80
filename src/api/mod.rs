//! REST API module.
//!
//! Recipe CRUD/search handlers and the AI text generation endpoints.

mod ai;
mod recipes;

pub use ai::*;
pub use recipes::*;

/// Handler result; errors render through the shared error envelope.
pub type ApiResult<T> = Result<T, crate::errors::AppError>;
