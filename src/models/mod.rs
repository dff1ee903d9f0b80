//! Data models for the Recipe Explorer application.
//!
//! Field names follow the snake_case JSON contract the frontend already speaks.

mod ai;
mod recipe;

pub use ai::*;
pub use recipe::*;
