//! Recipe API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{
    CreateRecipeRequest, ListParams, Recipe, RecipeSearchFilters, UpdateRecipeRequest,
};
use crate::AppState;

/// Body of the count endpoint.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Recipe with ID '{}' not found", id))
}

/// POST /api/recipes/ - Create a new recipe.
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    let recipe = request.validate()?;
    let created = state.repo.create(recipe).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/recipes/?skip=&limit= - List recipes.
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Recipe>>> {
    let recipes = state.repo.get_all(params.skip, params.limit).await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/count - Count all recipes.
pub async fn count_recipes(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.repo.count().await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/recipes/{id} - Get a single recipe.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    state
        .repo
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// PUT /api/recipes/{id} - Partially update a recipe.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<Recipe>> {
    let changes = request.validate()?;
    state
        .repo
        .update(&id, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/recipes/{id} - Delete a recipe.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.repo.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/recipes/search - Search recipes with filters.
pub async fn search_recipes(
    State(state): State<AppState>,
    Json(filters): Json<RecipeSearchFilters>,
) -> ApiResult<Json<Vec<Recipe>>> {
    filters.validate()?;
    let recipes = state.repo.search(&filters).await?;
    Ok(Json(recipes))
}
