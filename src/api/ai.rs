//! AI API endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{AiHealth, AiResponse, SimplifyRecipeRequest, SuggestRecipeRequest};
use crate::AppState;

/// POST /api/ai/suggest-recipe - Suggest a recipe from available ingredients.
pub async fn suggest_recipe(
    State(state): State<AppState>,
    Json(request): Json<SuggestRecipeRequest>,
) -> ApiResult<Json<AiResponse>> {
    let ingredients = request.validate()?;
    let suggestion = state.gateway.suggest(&ingredients).await;
    tracing::debug!(
        fallback = suggestion.is_fallback(),
        bytes = suggestion.text().len(),
        "Recipe suggestion ready"
    );
    Ok(Json(AiResponse::ok(suggestion.into_text())))
}

/// POST /api/ai/simplify-recipe - Beginner-friendly version of a stored recipe.
pub async fn simplify_recipe(
    State(state): State<AppState>,
    Json(request): Json<SimplifyRecipeRequest>,
) -> ApiResult<Json<AiResponse>> {
    let recipe = state
        .repo
        .get_by_id(&request.recipe_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Recipe with ID '{}' not found",
                request.recipe_id
            ))
        })?;

    let simplified = state
        .gateway
        .simplify(&recipe.name, &recipe.instructions)
        .await;
    tracing::debug!(fallback = simplified.is_fallback(), "Simplification ready");
    Ok(Json(AiResponse::ok(simplified.into_text())))
}

/// GET /api/ai/health - Gateway configuration status.
pub async fn ai_health(State(state): State<AppState>) -> Json<AiHealth> {
    Json(state.gateway.status())
}
