//! Sample recipes for demos and local development.
//!
//! Inserted under literal ids when `RECIPE_SEED_SAMPLE_DATA` is enabled and the
//! collection is empty.

use crate::models::{Difficulty, NewRecipe};

struct Sample {
    id: &'static str,
    name: &'static str,
    cuisine: &'static str,
    is_vegetarian: bool,
    prep_time_minutes: i64,
    ingredients: &'static [&'static str],
    difficulty: Difficulty,
    instructions: &'static str,
    tags: &'static [&'static str],
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "rec_101",
        name: "Paneer Butter Masala",
        cuisine: "Indian",
        is_vegetarian: true,
        prep_time_minutes: 40,
        ingredients: &["paneer", "tomato", "cream", "butter", "spices"],
        difficulty: Difficulty::Medium,
        instructions: "Step 1: Heat butter in a pan, add chopped onions and cook until golden. Step 2: Add tomato puree, cook for 10 minutes. Step 3: Add cream, spices and paneer cubes. Step 4: Simmer for 5 minutes and serve hot.",
        tags: &["dinner", "party", "rich"],
    },
    Sample {
        id: "rec_102",
        name: "Chicken Biryani",
        cuisine: "Indian",
        is_vegetarian: false,
        prep_time_minutes: 90,
        ingredients: &["chicken", "rice", "yogurt", "onion", "spices"],
        difficulty: Difficulty::Hard,
        instructions: "Step 1: Marinate chicken with yogurt and spices. Step 2: Cook rice separately until 70% done. Step 3: Layer chicken and rice in a pot. Step 4: Cook on low heat for 25 minutes. Step 5: Serve hot with raita.",
        tags: &["lunch", "dinner", "special"],
    },
    Sample {
        id: "rec_103",
        name: "Aloo Gobi",
        cuisine: "Indian",
        is_vegetarian: true,
        prep_time_minutes: 30,
        ingredients: &["potato", "cauliflower", "onion", "tomato", "spices"],
        difficulty: Difficulty::Easy,
        instructions: "Step 1: Cut potatoes and cauliflower into pieces. Step 2: Heat oil, add cumin seeds. Step 3: Add onions, ginger and tomatoes. Step 4: Add vegetables and spices. Step 5: Cook covered for 20 minutes.",
        tags: &["lunch", "dinner", "simple"],
    },
    Sample {
        id: "rec_104",
        name: "Pasta Aglio e Olio",
        cuisine: "Italian",
        is_vegetarian: true,
        prep_time_minutes: 20,
        ingredients: &["pasta", "garlic", "olive oil", "chili flakes", "parsley"],
        difficulty: Difficulty::Easy,
        instructions: "Step 1: Cook pasta in salted water. Step 2: Heat olive oil, add sliced garlic. Step 3: Add chili flakes. Step 4: Toss cooked pasta in the oil. Step 5: Garnish with parsley and serve.",
        tags: &["quick", "dinner", "italian"],
    },
    Sample {
        id: "rec_105",
        name: "Vegetable Fried Rice",
        cuisine: "Chinese",
        is_vegetarian: true,
        prep_time_minutes: 25,
        ingredients: &["rice", "vegetables", "soy sauce", "garlic", "ginger"],
        difficulty: Difficulty::Easy,
        instructions: "Step 1: Cook rice and let it cool. Step 2: Chop all vegetables. Step 3: Heat oil, add garlic and ginger. Step 4: Stir-fry vegetables on high heat. Step 5: Add rice and soy sauce, toss well.",
        tags: &["dinner", "lunch", "quick"],
    },
];

/// The sample recipes paired with their literal ids.
pub fn sample_recipes() -> Vec<(&'static str, NewRecipe)> {
    SAMPLES
        .iter()
        .map(|s| {
            (
                s.id,
                NewRecipe {
                    name: s.name.to_string(),
                    cuisine: s.cuisine.to_string(),
                    is_vegetarian: s.is_vegetarian,
                    prep_time_minutes: s.prep_time_minutes,
                    ingredients: s.ingredients.iter().map(|i| i.to_string()).collect(),
                    difficulty: s.difficulty,
                    instructions: s.instructions.to_string(),
                    tags: s.tags.iter().map(|t| t.to_string()).collect(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{normalize_ingredients, normalize_tags, RecipeId};

    #[test]
    fn test_samples_are_normalized_literal_ids() {
        let samples = sample_recipes();
        assert_eq!(samples.len(), 5);
        for (id, recipe) in samples {
            assert!(matches!(RecipeId::parse(id), RecipeId::Literal(_)));
            assert_eq!(
                normalize_ingredients(recipe.ingredients.clone()).unwrap(),
                recipe.ingredients
            );
            assert_eq!(normalize_tags(recipe.tags.clone()), recipe.tags);
            assert!(recipe.instructions.len() >= 10);
        }
    }
}
