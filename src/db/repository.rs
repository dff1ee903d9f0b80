//! Recipe repository for CRUD and search operations.
//!
//! Every operation is a single store call; there are no multi-document transactions.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use super::{build_search_query, fold, RecordStore};
use crate::errors::AppError;
use crate::models::{NewRecipe, Recipe, RecipeChanges, RecipeId, RecipeSearchFilters};

/// Repository for recipe documents.
#[derive(Clone)]
pub struct Repository {
    store: Arc<RecordStore>,
}

impl Repository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    async fn pool(&self) -> Result<SqlitePool, AppError> {
        self.store.get_or_init().await
    }

    /// Create a recipe under a fresh store-assigned id.
    pub async fn create(&self, recipe: NewRecipe) -> Result<Recipe, AppError> {
        self.insert(RecipeId::generate(), recipe).await
    }

    /// Create a recipe under a caller-chosen id.
    pub async fn create_with_id(&self, id: &str, recipe: NewRecipe) -> Result<Recipe, AppError> {
        self.insert(RecipeId::parse(id), recipe).await
    }

    async fn insert(&self, id: RecipeId, recipe: NewRecipe) -> Result<Recipe, AppError> {
        let recipe = recipe.into_recipe(&id, Utc::now());
        let doc = to_document(&recipe)?;

        let result = sqlx::query(
            "INSERT INTO recipes (id, doc, name_folded, cuisine_folded) VALUES (?, ?, ?, ?)",
        )
        .bind(&recipe.id)
        .bind(&doc)
        .bind(fold(&recipe.name))
        .bind(fold(&recipe.cuisine))
        .execute(&self.pool().await?)
        .await;

        match result {
            Ok(_) => {
                tracing::info!("Created recipe {} ({})", recipe.name, recipe.id);
                Ok(recipe)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Validation(
                format!("Recipe with ID '{}' already exists", recipe.id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a recipe by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        let key = RecipeId::parse(id).key();
        let row = sqlx::query("SELECT id, doc FROM recipes WHERE id = ?")
            .bind(&key)
            .fetch_optional(&self.pool().await?)
            .await?;

        row.as_ref().map(recipe_from_row).transpose()
    }

    /// List recipes in insertion order.
    pub async fn get_all(&self, skip: u32, limit: u32) -> Result<Vec<Recipe>, AppError> {
        let rows = sqlx::query("SELECT id, doc FROM recipes ORDER BY rowid LIMIT ? OFFSET ?")
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool().await?)
            .await?;

        rows.iter().map(recipe_from_row).collect()
    }

    /// Merge the provided fields into a recipe.
    ///
    /// An empty change set leaves the record, including `updated_at`, untouched.
    /// Returns `None` when no recipe has this id.
    pub async fn update(
        &self,
        id: &str,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, AppError> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut patch = serde_json::to_value(changes)?;
        if let Value::Object(fields) = &mut patch {
            fields.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);
        }

        let key = RecipeId::parse(id).key();
        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET doc = json_patch(doc, ?),
                name_folded = COALESCE(?, name_folded),
                cuisine_folded = COALESCE(?, cuisine_folded)
            WHERE id = ?
            "#,
        )
        .bind(patch.to_string())
        .bind(changes.name.as_deref().map(fold))
        .bind(changes.cuisine.as_deref().map(fold))
        .bind(&key)
        .execute(&self.pool().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tracing::info!("Updated recipe {}", key);

        self.get_by_id(&key).await
    }

    /// Delete a recipe. Returns false when nothing matched.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let key = RecipeId::parse(id).key();
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(&key)
            .execute(&self.pool().await?)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!("Deleted recipe {}", key);
        }
        Ok(deleted)
    }

    /// Search recipes. Returns at most 100 matches.
    pub async fn search(&self, filters: &RecipeSearchFilters) -> Result<Vec<Recipe>, AppError> {
        let mut qb = build_search_query(filters);
        let rows = qb.build().fetch_all(&self.pool().await?).await?;

        let recipes = rows
            .iter()
            .map(recipe_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!("Search found {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Total number of recipes.
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool().await?)
            .await?;
        Ok(count)
    }

    /// Insert the given recipes if the collection is empty. Returns how many were inserted.
    pub async fn seed_if_empty(
        &self,
        samples: Vec<(&'static str, NewRecipe)>,
    ) -> Result<usize, AppError> {
        let existing = self.count().await?;
        if existing > 0 {
            tracing::info!("Collection already has {} recipes, skipping seed", existing);
            return Ok(0);
        }

        let mut inserted = 0;
        for (id, recipe) in samples {
            self.create_with_id(id, recipe).await?;
            inserted += 1;
        }
        tracing::info!("Seeded {} sample recipes", inserted);
        Ok(inserted)
    }
}

/// Serialize a recipe into its stored document; the id lives in its own column.
fn to_document(recipe: &Recipe) -> Result<String, AppError> {
    let mut doc = serde_json::to_value(recipe)?;
    if let Value::Object(fields) = &mut doc {
        fields.remove("_id");
    }
    Ok(doc.to_string())
}

fn recipe_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Recipe, AppError> {
    let id: String = row.get("id");
    let doc: String = row.get("doc");

    let mut value: Value = serde_json::from_str(&doc)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("_id".to_string(), Value::String(id));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, UpdateRecipeRequest};
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(temp_dir.path().join("test.sqlite")));
        (Repository::new(store), temp_dir)
    }

    fn recipe(name: &str, ingredients: &[&str], tags: &[&str]) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            cuisine: "Indian".to_string(),
            is_vegetarian: true,
            prep_time_minutes: 30,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            difficulty: Difficulty::Easy,
            instructions: "Cook everything together.".to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_get_native_id() {
        let (repo, _dir) = repo().await;

        let created = repo
            .create(recipe("Dal Tadka", &["dal"], &["dinner"]))
            .await
            .unwrap();
        assert!(matches!(RecipeId::parse(&created.id), RecipeId::Native(_)));
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // Uppercase form of the same UUID resolves to the same record
        let upper = created.id.to_uppercase();
        assert!(repo.get_by_id(&upper).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_literal_ids() {
        let (repo, _dir) = repo().await;

        repo.create_with_id("rec_101", recipe("Aloo Gobi", &["potato"], &[]))
            .await
            .unwrap();
        let fetched = repo.get_by_id("rec_101").await.unwrap().unwrap();
        assert_eq!(fetched.id, "rec_101");

        let dup = repo
            .create_with_id("rec_101", recipe("Again", &["potato"], &[]))
            .await;
        assert!(matches!(dup, Err(AppError::Validation(_))));

        assert!(repo.get_by_id("rec_999").await.unwrap().is_none());
        assert!(repo
            .get_by_id(&uuid::Uuid::new_v4().to_string())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_all_pagination_in_insertion_order() {
        let (repo, _dir) = repo().await;
        for name in ["One", "Two", "Three", "Four"] {
            repo.create(recipe(name, &["rice"], &[])).await.unwrap();
        }

        let all = repo.get_all(0, 100).await.unwrap();
        assert_eq!(names(&all), vec!["One", "Two", "Three", "Four"]);

        let page = repo.get_all(1, 2).await.unwrap();
        assert_eq!(names(&page), vec!["Two", "Three"]);

        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (repo, _dir) = repo().await;
        let created = repo
            .create(recipe("Pulao", &["rice", "peas"], &["lunch"]))
            .await
            .unwrap();

        let changes = UpdateRecipeRequest {
            name: Some("Veg Pulao".to_string()),
            difficulty: Some("MEDIUM".to_string()),
            tags: Some(vec![" Party ".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let updated = repo.update(&created.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "Veg Pulao");
        assert_eq!(updated.difficulty, Difficulty::Medium);
        assert_eq!(updated.tags, vec!["party"]);
        // Untouched fields survive
        assert_eq!(updated.ingredients, vec!["rice", "peas"]);
        assert_eq!(updated.cuisine, "Indian");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let (repo, _dir) = repo().await;
        let created = repo.create(recipe("Khichdi", &["rice"], &[])).await.unwrap();

        let unchanged = repo
            .update(&created.id, &RecipeChanges::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, created);

        let missing = repo
            .update("rec_missing", &RecipeChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (repo, _dir) = repo().await;
        let changes = RecipeChanges {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(repo.update("rec_missing", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_successive_updates_advance_timestamp() {
        let (repo, _dir) = repo().await;
        let created = repo.create(recipe("Upma", &["semolina"], &[])).await.unwrap();

        let mut last = created.updated_at;
        for minutes in [10, 15, 20] {
            let changes = RecipeChanges {
                prep_time_minutes: Some(minutes),
                ..Default::default()
            };
            let updated = repo.update(&created.id, &changes).await.unwrap().unwrap();
            assert_eq!(updated.prep_time_minutes, minutes);
            assert!(updated.updated_at >= last);
            last = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _dir) = repo().await;
        let created = repo.create(recipe("Poha", &["rice flakes"], &[])).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete("rec_never_existed").await.unwrap());
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_filters() {
        let (repo, _dir) = repo().await;

        repo.create(recipe(
            "Paneer Butter Masala",
            &["paneer", "tomato", "cream"],
            &["dinner", "rich"],
        ))
        .await
        .unwrap();
        repo.create(recipe("Paneer Tikka", &["paneer", "yogurt"], &["party"]))
            .await
            .unwrap();
        let mut biryani = recipe("Chicken Biryani", &["chicken", "rice"], &["lunch"]);
        biryani.is_vegetarian = false;
        biryani.prep_time_minutes = 90;
        biryani.difficulty = Difficulty::Hard;
        repo.create(biryani).await.unwrap();
        let mut pasta = recipe("Pasta Aglio e Olio", &["pasta", "garlic"], &["quick"]);
        pasta.cuisine = "Italian".to_string();
        pasta.prep_time_minutes = 20;
        repo.create(pasta).await.unwrap();

        // All-of ingredients
        let found = repo
            .search(&RecipeSearchFilters {
                ingredients: Some(vec!["paneer".into(), "TOMATO".into()]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Paneer Butter Masala"]);

        // Any-of tags
        let found = repo
            .search(&RecipeSearchFilters {
                tags: Some(vec!["dinner".into(), "party".into()]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Paneer Butter Masala", "Paneer Tikka"]);

        // Case-insensitive cuisine substring
        let found = repo
            .search(&RecipeSearchFilters {
                cuisine: Some("ITAL".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Pasta Aglio e Olio"]);

        // Scalar filters combine with AND
        let found = repo
            .search(&RecipeSearchFilters {
                is_vegetarian: Some(false),
                max_prep_time: Some(120),
                difficulty: Some("Hard".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Chicken Biryani"]);

        let found = repo
            .search(&RecipeSearchFilters {
                max_prep_time: Some(25),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Pasta Aglio e Olio"]);

        // Name or ingredient substring, AND'ed with the rest
        let found = repo
            .search(&RecipeSearchFilters {
                search_query: Some("yog".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Paneer Tikka"]);

        let found = repo
            .search(&RecipeSearchFilters {
                search_query: Some("paneer".into()),
                tags: Some(vec!["party".into()]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Paneer Tikka"]);

        let found = repo.search(&RecipeSearchFilters::default()).await.unwrap();
        assert_eq!(found.len(), 4);
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (repo, _dir) = repo().await;

        let mut eclair = recipe("Éclair au Chocolat", &["choux pastry", "crème"], &[]);
        eclair.cuisine = "Émirati".to_string();
        let created = repo.create(eclair).await.unwrap();
        repo.create(recipe("Dal Tadka", &["dal"], &[])).await.unwrap();

        for needle in ["Éclair", "ÉCLAIR", "éclair au"] {
            let found = repo
                .search(&RecipeSearchFilters {
                    search_query: Some(needle.into()),
                    ..Default::default()
                })
                .await
                .unwrap();
            assert_eq!(names(&found), vec!["Éclair au Chocolat"], "needle {}", needle);
        }

        let found = repo
            .search(&RecipeSearchFilters {
                search_query: Some("CRÈME".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Éclair au Chocolat"]);

        for cuisine in ["Émirati", "ÉMIRATI"] {
            let found = repo
                .search(&RecipeSearchFilters {
                    cuisine: Some(cuisine.into()),
                    ..Default::default()
                })
                .await
                .unwrap();
            assert_eq!(names(&found), vec!["Éclair au Chocolat"], "cuisine {}", cuisine);
        }

        // Renaming refreshes the folded copies
        let changes = UpdateRecipeRequest {
            name: Some("Œufs en Meurette".to_string()),
            cuisine: Some("Française".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        repo.update(&created.id, &changes).await.unwrap().unwrap();

        let found = repo
            .search(&RecipeSearchFilters {
                search_query: Some("ÉCLAIR".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());

        let found = repo
            .search(&RecipeSearchFilters {
                search_query: Some("œUFS".into()),
                cuisine: Some("FRANÇAISE".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Œufs en Meurette"]);
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let (repo, _dir) = repo().await;
        for i in 0..105 {
            repo.create(recipe(&format!("Rice {}", i), &["rice"], &[]))
                .await
                .unwrap();
        }
        let found = repo.search(&RecipeSearchFilters::default()).await.unwrap();
        assert_eq!(found.len(), crate::db::SEARCH_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_seed_if_empty() {
        let (repo, _dir) = repo().await;
        let samples = || {
            vec![
                ("rec_1", recipe("A", &["rice"], &[])),
                ("rec_2", recipe("B", &["dal"], &[])),
            ]
        };

        assert_eq!(repo.seed_if_empty(samples()).await.unwrap(), 2);
        assert_eq!(repo.seed_if_empty(samples()).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let repo = Repository::new(Arc::new(RecordStore::new(blocker.join("db.sqlite"))));

        assert!(matches!(repo.count().await, Err(AppError::Database(_))));
        assert!(matches!(
            repo.get_by_id("rec_1").await,
            Err(AppError::Database(_))
        ));
    }
}
