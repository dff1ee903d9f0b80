//! Recipe model, identifiers, and the request payloads that create, update and search recipes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_CUISINE_LEN: usize = 100;
pub const MIN_INSTRUCTIONS_LEN: usize = 10;

/// Difficulty level of a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Identifier of a stored recipe.
///
/// Recipes created through the API get a store-assigned UUID. Seeded or imported
/// recipes may carry any other string, which is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeId {
    Native(Uuid),
    Literal(String),
}

impl RecipeId {
    /// Fresh store-native identifier.
    pub fn generate() -> Self {
        RecipeId::Native(Uuid::new_v4())
    }

    /// Classify a caller-supplied identifier by format.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(uuid) => RecipeId::Native(uuid),
            Err(_) => RecipeId::Literal(raw.to_string()),
        }
    }

    /// Key under which the recipe is stored.
    pub fn key(&self) -> String {
        match self {
            RecipeId::Native(uuid) => uuid.hyphenated().to_string(),
            RecipeId::Literal(raw) => raw.clone(),
        }
    }
}

/// A stored recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub is_vegetarian: bool,
    pub prep_time_minutes: i64,
    pub ingredients: Vec<String>,
    pub difficulty: Difficulty,
    pub instructions: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated and normalized creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub cuisine: String,
    pub is_vegetarian: bool,
    pub prep_time_minutes: i64,
    pub ingredients: Vec<String>,
    pub difficulty: Difficulty,
    pub instructions: String,
    pub tags: Vec<String>,
}

impl NewRecipe {
    /// Stamp the payload into a full record.
    pub fn into_recipe(self, id: &RecipeId, now: DateTime<Utc>) -> Recipe {
        Recipe {
            id: id.key(),
            name: self.name,
            cuisine: self.cuisine,
            is_vegetarian: self.is_vegetarian,
            prep_time_minutes: self.prep_time_minutes,
            ingredients: self.ingredients,
            difficulty: self.difficulty,
            instructions: self.instructions,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Request body for creating a new recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub cuisine: String,
    #[serde(default = "default_true")]
    pub is_vegetarian: bool,
    pub prep_time_minutes: i64,
    pub ingredients: Vec<String>,
    pub difficulty: String,
    pub instructions: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateRecipeRequest {
    /// Validate all fields and normalize ingredients, tags and difficulty.
    pub fn validate(self) -> Result<NewRecipe, AppError> {
        Ok(NewRecipe {
            name: validate_name(self.name)?,
            cuisine: validate_cuisine(self.cuisine)?,
            is_vegetarian: self.is_vegetarian,
            prep_time_minutes: validate_prep_time(self.prep_time_minutes)?,
            ingredients: normalize_ingredients(self.ingredients)?,
            difficulty: validate_difficulty(&self.difficulty)?,
            instructions: validate_instructions(self.instructions)?,
            tags: normalize_tags(self.tags),
        })
    }
}

/// Request body for a partial update. Absent and null fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub is_vegetarian: Option<bool>,
    #[serde(default)]
    pub prep_time_minutes: Option<i64>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateRecipeRequest {
    /// Validate the provided fields with the same rules as creation.
    pub fn validate(self) -> Result<RecipeChanges, AppError> {
        Ok(RecipeChanges {
            name: self.name.map(validate_name).transpose()?,
            cuisine: self.cuisine.map(validate_cuisine).transpose()?,
            is_vegetarian: self.is_vegetarian,
            prep_time_minutes: self.prep_time_minutes.map(validate_prep_time).transpose()?,
            ingredients: self.ingredients.map(normalize_ingredients).transpose()?,
            difficulty: self
                .difficulty
                .as_deref()
                .map(validate_difficulty)
                .transpose()?,
            instructions: self.instructions.map(validate_instructions).transpose()?,
            tags: self.tags.map(normalize_tags),
        })
    }
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_vegetarian: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl RecipeChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cuisine.is_none()
            && self.is_vegetarian.is_none()
            && self.prep_time_minutes.is_none()
            && self.ingredients.is_none()
            && self.difficulty.is_none()
            && self.instructions.is_none()
            && self.tags.is_none()
    }
}

/// Search filters. Every provided filter must hold; absent ones are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeSearchFilters {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub is_vegetarian: Option<bool>,
    #[serde(default)]
    pub max_prep_time: Option<i64>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Matches recipes carrying at least one of these tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Matches recipes containing every one of these ingredients.
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    /// Substring of the name or of any ingredient.
    #[serde(default)]
    pub search_query: Option<String>,
}

impl RecipeSearchFilters {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.max_prep_time {
            Some(max) if max <= 0 => Err(AppError::Validation(
                "max_prep_time must be greater than 0".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Pagination for the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_list_limit")]
    pub limit: u32,
}

fn default_list_limit() -> u32 {
    100
}

fn validate_name(name: String) -> Result<String, AppError> {
    validate_text("name", name, MAX_NAME_LEN)
}

fn validate_cuisine(cuisine: String) -> Result<String, AppError> {
    validate_text("cuisine", cuisine, MAX_CUISINE_LEN)
}

fn validate_text(field: &str, value: String, max_len: usize) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(value)
}

fn validate_prep_time(minutes: i64) -> Result<i64, AppError> {
    if minutes <= 0 {
        return Err(AppError::Validation(
            "prep_time_minutes must be greater than 0".to_string(),
        ));
    }
    Ok(minutes)
}

fn validate_difficulty(raw: &str) -> Result<Difficulty, AppError> {
    Difficulty::parse(raw).ok_or_else(|| {
        AppError::Validation("Difficulty must be one of: easy, medium, hard".to_string())
    })
}

fn validate_instructions(instructions: String) -> Result<String, AppError> {
    if instructions.chars().count() < MIN_INSTRUCTIONS_LEN {
        return Err(AppError::Validation(format!(
            "instructions must be at least {} characters",
            MIN_INSTRUCTIONS_LEN
        )));
    }
    Ok(instructions)
}

/// Trim and lower-case ingredients, rejecting blank entries and empty lists.
pub fn normalize_ingredients(ingredients: Vec<String>) -> Result<Vec<String>, AppError> {
    if ingredients.is_empty() {
        return Err(AppError::Validation(
            "At least one ingredient is required".to_string(),
        ));
    }
    if ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err(AppError::Validation(
            "Ingredients cannot be empty strings".to_string(),
        ));
    }
    Ok(ingredients
        .into_iter()
        .map(|i| i.trim().to_lowercase())
        .collect())
}

/// Trim and lower-case tags, dropping blank ones.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
