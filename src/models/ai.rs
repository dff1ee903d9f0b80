//! Request and response bodies for the AI endpoints.

use serde::{Deserialize, Serialize};

use super::normalize_ingredients;
use crate::errors::AppError;

/// Request body for a recipe suggestion.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRecipeRequest {
    pub ingredients: Vec<String>,
}

impl SuggestRecipeRequest {
    /// Normalized ingredient list; rejects an empty list or blank entries.
    pub fn validate(self) -> Result<Vec<String>, AppError> {
        normalize_ingredients(self.ingredients)
    }
}

/// Request body for simplifying a stored recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifyRecipeRequest {
    pub recipe_id: String,
}

/// Response envelope for AI operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    pub success: bool,
    pub data: Option<String>,
    pub error: Option<String>,
}

impl AiResponse {
    pub fn ok(data: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Snapshot of the text generation gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiHealth {
    pub configured: bool,
    pub available: bool,
    pub service: String,
    pub model: String,
    pub message: String,
}
