//! Search query construction over recipe documents.
//!
//! Filters compile to SQLite JSON1 predicates on the `doc` column:
//! `json_extract` for scalar fields and `json_each` for array membership.
//! Case-insensitive text matching runs against the `name_folded` and
//! `cuisine_folded` columns, which hold copies passed through [`fold`] by the
//! repository. SQLite's own `lower()` only folds ASCII.

use sqlx::{QueryBuilder, Sqlite};

use crate::models::RecipeSearchFilters;

/// Maximum number of recipes a search returns.
pub const SEARCH_LIMIT: i64 = 100;

/// Build the conjunctive search query for the given filters.
///
/// `tags` matches when a recipe has any of the tags, while `ingredients`
/// requires all of them. `search_query` matches the name or any ingredient.
pub fn build_search_query(filters: &RecipeSearchFilters) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT id, doc FROM recipes WHERE 1 = 1");

    if let Some(cuisine) = present(&filters.cuisine) {
        qb.push(" AND instr(cuisine_folded, ")
            .push_bind(fold(cuisine))
            .push(") > 0");
    }

    if let Some(is_vegetarian) = filters.is_vegetarian {
        qb.push(" AND json_extract(doc, '$.is_vegetarian') = ")
            .push_bind(is_vegetarian);
    }

    if let Some(max_prep_time) = filters.max_prep_time {
        qb.push(" AND json_extract(doc, '$.prep_time_minutes') <= ")
            .push_bind(max_prep_time);
    }

    if let Some(difficulty) = present(&filters.difficulty) {
        qb.push(" AND json_extract(doc, '$.difficulty') = ")
            .push_bind(difficulty.to_lowercase());
    }

    let tags = normalized_terms(&filters.tags);
    if !tags.is_empty() {
        qb.push(" AND EXISTS (SELECT 1 FROM json_each(doc, '$.tags') WHERE json_each.value IN (");
        let mut separated = qb.separated(", ");
        for tag in tags {
            separated.push_bind(tag);
        }
        separated.push_unseparated("))");
    }

    for ingredient in normalized_terms(&filters.ingredients) {
        qb.push(
            " AND EXISTS (SELECT 1 FROM json_each(doc, '$.ingredients') WHERE json_each.value = ",
        )
        .push_bind(ingredient)
        .push(")");
    }

    if let Some(search) = present(&filters.search_query) {
        // Stored ingredients are already folded at validation time.
        let needle = fold(search);
        qb.push(" AND (instr(name_folded, ")
            .push_bind(needle.clone())
            .push(") > 0 OR EXISTS (SELECT 1 FROM json_each(doc, '$.ingredients') WHERE instr(json_each.value, ")
            .push_bind(needle)
            .push(") > 0))");
    }

    qb.push(" ORDER BY rowid LIMIT ").push_bind(SEARCH_LIMIT);
    qb
}

/// Unicode-aware case folding shared by stored columns and search needles.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn normalized_terms(terms: &Option<Vec<String>>) -> Vec<String> {
    terms
        .iter()
        .flatten()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
