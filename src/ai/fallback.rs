//! Deterministic recipe texts used when the text generation API is unavailable.

/// Answer for an empty ingredient list.
pub const NO_INGREDIENTS: &str = "Please provide at least one ingredient for recipe suggestions.";

const PANEER: &[&str] = &["paneer", "cottage cheese"];
const TOMATO: &[&str] = &["tomato", "tomatoes"];
const MEAT: &[&str] = &["chicken", "mutton", "meat"];
const POTATO: &[&str] = &["potato", "potatoes", "aloo"];
const RICE: &[&str] = &["rice", "basmati"];
const LENTIL: &[&str] = &["dal", "lentil", "lentils"];

/// A canned recipe chosen when every keyword group matches at least one ingredient.
struct Rule {
    groups: &'static [&'static [&'static str]],
    template: &'static str,
}

impl Rule {
    fn matches(&self, ingredients: &[String]) -> bool {
        self.groups
            .iter()
            .all(|group| ingredients.iter().any(|i| group.contains(&i.as_str())))
    }
}

/// Checked in order; the first match wins.
const RULES: &[Rule] = &[
    Rule {
        groups: &[PANEER, TOMATO],
        template: PANEER_BUTTER_MASALA,
    },
    Rule {
        groups: &[PANEER],
        template: PANEER_TIKKA,
    },
    Rule {
        groups: &[MEAT],
        template: CHICKEN_CURRY,
    },
    Rule {
        groups: &[POTATO],
        template: ALOO_PARATHA,
    },
    Rule {
        groups: &[RICE],
        template: VEGETABLE_PULAO,
    },
    Rule {
        groups: &[LENTIL],
        template: DAL_TADKA,
    },
];

/// Pick a recipe for the given ingredients.
pub fn suggestion(ingredients: &[String]) -> String {
    let Some(first) = ingredients.first() else {
        return NO_INGREDIENTS.to_string();
    };

    let lowered: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
    if let Some(rule) = RULES.iter().find(|rule| rule.matches(&lowered)) {
        return rule.template.to_string();
    }

    stir_fry(&title_case(first), &ingredients[..ingredients.len().min(5)].join(", "))
}

fn stir_fry(main_ingredient: &str, listed: &str) -> String {
    format!(
        r#"Recipe: Simple {main_ingredient} Stir-Fry

**Ingredients:**
- {listed}
- Oil - 2 tbsp
- Garlic - 3 cloves, minced
- Soy sauce - 2 tbsp (optional)
- Salt and pepper to taste
- Fresh herbs for garnish

**Instructions:**
1. Prepare all ingredients: wash, peel, and chop as needed
2. Heat oil in a large pan or wok over medium-high heat
3. Add minced garlic and sauté for 30 seconds until fragrant
4. Add main ingredients ({listed}) in order of cooking time
5. Stir-fry for 5-8 minutes until cooked but still crisp
6. Season with salt, pepper, and soy sauce if using
7. Garnish with fresh herbs and serve hot

**Prep Time:** 10 minutes | **Cook Time:** 10 minutes | **Difficulty:** Easy

**Note:** This suggestion comes from the built-in recipe library. Set GEMINI_API_KEY for personalized AI suggestions."#
    )
}

/// Beginner's guide that echoes the original instructions.
pub fn simplification(recipe_name: &str, instructions: &str) -> String {
    let instructions = instructions.trim();
    format!(
        r#"📚 Simplified Guide: {recipe_name}

**Original Instructions:**
{instructions}

---

**Beginner-Friendly Breakdown:**

🔧 **Before You Start:**
- Read through all steps completely first
- Gather and measure all ingredients (mise en place)
- Prepare your cooking equipment and utensils
- Wash your hands and work surface

⏱️ **Cooking Tips:**
- Don't rush - good cooking takes time and practice
- Taste as you cook and adjust seasonings gradually
- Keep ingredients at room temperature (unless recipe says otherwise)
- If something starts burning, reduce heat immediately

📏 **Measurement Guide:**
- 1 cup = 240ml
- 1 tbsp = 15ml
- 1 tsp = 5ml
- A pinch = what you can hold between thumb and finger

🌡️ **Temperature Guide:**
- Low heat: You can hold your hand 5 inches above pan for 8+ seconds
- Medium heat: 5-6 seconds
- High heat: 3-4 seconds

✅ **Success Indicators:**
- Follow timing guidelines but also watch for visual cues
- Vegetables should be tender but not mushy
- Meat should reach safe internal temperatures
- Taste before serving and adjust seasonings

💡 **Common Mistakes to Avoid:**
- Don't overcrowd the pan (cook in batches if needed)
- Don't skip the resting time for meat dishes
- Don't add garlic too early (it burns quickly)
- Don't forget to season at multiple stages

**Note:** This guide comes from the built-in cooking notes. Set GEMINI_API_KEY for AI-written simplifications."#
    )
}

/// Capitalize the first letter of every word, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

const PANEER_BUTTER_MASALA: &str = r#"Recipe: Paneer Butter Masala

**Ingredients:**
- Paneer (cottage cheese) - 250g, cubed
- Tomatoes - 4 medium, pureed
- Onion - 1 large, finely chopped
- Cream - 3 tbsp
- Butter - 2 tbsp
- Ginger-garlic paste - 1 tbsp
- Spices: Red chili powder, garam masala, kasuri methi

**Instructions:**
1. Heat butter in a pan, add ginger-garlic paste and sauté for 1 minute
2. Add onions and cook until golden brown (5-7 minutes)
3. Add tomato puree, salt, red chili powder and cook for 10 minutes
4. Add paneer cubes and garam masala, cook for 3-4 minutes
5. Add cream and kasuri methi, simmer for 2 minutes
6. Garnish with coriander and serve hot with naan or rice

**Prep Time:** 15 minutes | **Cook Time:** 25 minutes | **Difficulty:** Medium"#;

const PANEER_TIKKA: &str = r#"Recipe: Paneer Tikka

**Ingredients:**
- Paneer - 250g, cubed
- Yogurt - 1 cup
- Bell peppers - 1 each (red, yellow, green)
- Onion - 1 large
- Tikka masala - 2 tbsp
- Lemon juice - 2 tbsp
- Oil for grilling

**Instructions:**
1. Mix yogurt, tikka masala, lemon juice and salt to make marinade
2. Cut paneer and vegetables into 1-inch cubes
3. Marinate paneer and vegetables for 30 minutes
4. Thread paneer and vegetables alternately on skewers
5. Grill or bake at 200°C for 15-20 minutes, turning occasionally
6. Serve hot with mint chutney

**Prep Time:** 40 minutes | **Cook Time:** 20 minutes | **Difficulty:** Easy"#;

const CHICKEN_CURRY: &str = r#"Recipe: Chicken Curry

**Ingredients:**
- Chicken - 500g, cut into pieces
- Onions - 2 large, sliced
- Tomatoes - 2 medium, chopped
- Ginger-garlic paste - 2 tbsp
- Curry powder - 2 tbsp
- Coconut milk - 1 cup
- Oil - 3 tbsp

**Instructions:**
1. Heat oil, add onions and cook until golden (8-10 minutes)
2. Add ginger-garlic paste, cook for 2 minutes
3. Add chicken pieces, cook until they change color
4. Add tomatoes and curry powder, cook for 5 minutes
5. Pour coconut milk, simmer covered for 20 minutes
6. Adjust salt and serve with rice

**Prep Time:** 15 minutes | **Cook Time:** 35 minutes | **Difficulty:** Medium"#;

const ALOO_PARATHA: &str = r#"Recipe: Aloo Paratha (Potato Stuffed Flatbread)

**Ingredients:**
- Boiled potatoes - 3 large, mashed
- Whole wheat flour - 2 cups
- Spices: red chili, coriander powder, garam masala
- Fresh coriander - 2 tbsp, chopped
- Ghee/butter for cooking

**Instructions:**
1. Mix mashed potatoes with spices and coriander, set aside
2. Knead wheat flour with water to make soft dough, rest 15 minutes
3. Divide dough into balls, roll each into small circle
4. Place potato filling in center, seal and roll flat carefully
5. Cook on hot griddle with ghee until golden spots appear on both sides
6. Serve hot with yogurt and pickle

**Prep Time:** 25 minutes | **Cook Time:** 20 minutes | **Difficulty:** Easy"#;

const VEGETABLE_PULAO: &str = r#"Recipe: Vegetable Pulao

**Ingredients:**
- Basmati rice - 2 cups, washed
- Mixed vegetables - 2 cups (carrots, peas, beans)
- Onion - 1 large, sliced
- Whole spices: bay leaf, cinnamon, cardamom
- Ghee - 2 tbsp
- Water - 4 cups

**Instructions:**
1. Heat ghee, add whole spices and sliced onions
2. Sauté until onions are golden (5 minutes)
3. Add mixed vegetables, cook for 3-4 minutes
4. Add rice and water, bring to boil
5. Cover and simmer on low heat for 15-20 minutes
6. Fluff with fork and serve with raita

**Prep Time:** 15 minutes | **Cook Time:** 25 minutes | **Difficulty:** Easy"#;

const DAL_TADKA: &str = r#"Recipe: Dal Tadka (Tempered Lentils)

**Ingredients:**
- Yellow lentils (toor dal) - 1 cup
- Tomato - 1 large, chopped
- Onion - 1 medium, chopped
- Garlic - 4 cloves
- Cumin seeds - 1 tsp
- Turmeric, red chili powder
- Ghee - 2 tbsp
- Water - 3 cups

**Instructions:**
1. Pressure cook lentils with turmeric and salt for 3 whistles
2. Mash lightly and keep warm
3. Heat ghee, add cumin seeds and garlic
4. Add onions and tomatoes, cook until soft
5. Pour tadka over cooked dal and mix well
6. Garnish with coriander and serve with rice/roti

**Prep Time:** 10 minutes | **Cook Time:** 20 minutes | **Difficulty:** Easy"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_paneer_and_tomato_gives_butter_masala() {
        let text = suggestion(&strings(&["paneer", "tomato"]));
        assert!(text.starts_with("Recipe: Paneer Butter Masala"));
        assert_eq!(text, suggestion(&strings(&["paneer", "tomato"])));
        // Order does not matter
        assert_eq!(text, suggestion(&strings(&["tomato", "paneer"])));
    }

    #[test]
    fn test_rule_priority() {
        assert!(suggestion(&strings(&["Cottage Cheese"])).starts_with("Recipe: Paneer Tikka"));
        // Paneer outranks chicken
        assert!(suggestion(&strings(&["chicken", "paneer"])).starts_with("Recipe: Paneer Tikka"));
        assert!(suggestion(&strings(&["mutton", "rice"])).starts_with("Recipe: Chicken Curry"));
        assert!(suggestion(&strings(&["rice", "aloo"])).starts_with("Recipe: Aloo Paratha"));
        assert!(suggestion(&strings(&["basmati"])).starts_with("Recipe: Vegetable Pulao"));
        assert!(suggestion(&strings(&["lentils"])).starts_with("Recipe: Dal Tadka"));
    }

    #[test]
    fn test_keywords_match_whole_ingredients() {
        // "brown rice" is not "rice"
        let text = suggestion(&strings(&["brown rice"]));
        assert!(text.starts_with("Recipe: Simple Brown Rice Stir-Fry"));
    }

    #[test]
    fn test_generic_stir_fry_lists_five() {
        let text = suggestion(&strings(&[
            "tofu", "broccoli", "carrot", "garlic", "ginger", "sesame",
        ]));
        assert!(text.starts_with("Recipe: Simple Tofu Stir-Fry"));
        assert!(text.contains("- tofu, broccoli, carrot, garlic, ginger\n"));
        assert!(!text.contains("sesame"));
    }

    #[test]
    fn test_empty_ingredients() {
        assert_eq!(suggestion(&[]), NO_INGREDIENTS);
    }

    #[test]
    fn test_simplification_echoes_instructions() {
        let text = simplification("X", "  short text \n");
        assert!(text.starts_with("📚 Simplified Guide: X"));
        assert!(text.contains("**Original Instructions:**\nshort text\n"));
        assert!(text.contains("(mise en place)"));
        assert!(text.contains("1 cup = 240ml"));
        assert!(text.contains("Medium heat: 5-6 seconds"));
        assert!(text.contains("Success Indicators"));
        assert!(text.contains("Common Mistakes to Avoid"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("bell pepper"), "Bell Pepper");
        assert_eq!(title_case("TOFU"), "Tofu");
        assert_eq!(title_case("sun-dried tomato"), "Sun-Dried Tomato");
    }
}
