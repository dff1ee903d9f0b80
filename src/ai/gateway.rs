//! Text generation gateway with deterministic fallback.

use std::sync::Arc;

use super::{fallback, GeminiProvider, LlmProvider};
use crate::config::Config;
use crate::models::AiHealth;

/// Outcome of a gateway call. Only the text reaches HTTP clients; the variant
/// records which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Text returned by the external model.
    Generated(String),
    /// Built-in template used because the model was unavailable or failed.
    Fallback(String),
}

impl Generation {
    pub fn text(&self) -> &str {
        match self {
            Generation::Generated(text) | Generation::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generation::Generated(text) | Generation::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generation::Fallback(_))
    }
}

/// Gateway to the external text generation service.
///
/// `configured` means a credential was supplied; `available` means a provider was
/// built from it. A configured gateway can still be unavailable, e.g. when the key
/// is malformed.
#[derive(Debug, Clone)]
pub struct TextGateway {
    configured: bool,
    model: String,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl TextGateway {
    /// Build the gateway from configuration.
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.gemini_api_key.clone() else {
            tracing::warn!("No GEMINI_API_KEY found. Using fallback responses.");
            return Self::unconfigured(&config.gemini_model);
        };

        match GeminiProvider::new(api_key, config.gemini_model.clone()) {
            Ok(provider) => {
                tracing::info!(
                    "Gemini API configured successfully ({})",
                    config.gemini_model
                );
                Self::with_provider(Arc::new(provider))
            }
            Err(e) => {
                tracing::error!("Failed to configure Gemini API: {}", e);
                tracing::warn!("Using fallback responses");
                Self {
                    configured: true,
                    model: config.gemini_model.clone(),
                    provider: None,
                }
            }
        }
    }

    /// Gateway without credentials; every call uses the fallback.
    pub fn unconfigured(model: &str) -> Self {
        Self {
            configured: false,
            model: model.to_string(),
            provider: None,
        }
    }

    /// Gateway backed by the given provider.
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            configured: true,
            model: provider.model_name().to_string(),
            provider: Some(provider),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Configuration snapshot for the health endpoint.
    pub fn status(&self) -> AiHealth {
        let message = if self.is_available() {
            "AI service is configured and ready"
        } else {
            "AI service will use fallback responses. Configure GEMINI_API_KEY for full AI functionality."
        };
        AiHealth {
            configured: self.is_configured(),
            available: self.is_available(),
            service: "Google Gemini API".to_string(),
            model: self.model.clone(),
            message: message.to_string(),
        }
    }

    /// One best-effort call. Errors and blank answers yield `None`.
    async fn query(&self, prompt: &str) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.complete(prompt).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!("{} returned an empty response", provider.provider_name());
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(e) => {
                tracing::warn!("Error querying {}: {}", provider.provider_name(), e);
                None
            }
        }
    }

    /// Suggest one recipe that uses the given ingredients.
    pub async fn suggest(&self, ingredients: &[String]) -> Generation {
        let ingredients_str = ingredients.join(", ");
        tracing::info!(
            "Generating recipe suggestion for ingredients: {}",
            ingredients_str
        );

        match self.query(&suggestion_prompt(&ingredients_str)).await {
            Some(text) => {
                tracing::info!("Generated AI recipe suggestion");
                Generation::Generated(text)
            }
            None => {
                tracing::info!("AI unavailable, using fallback suggestion");
                Generation::Fallback(fallback::suggestion(ingredients))
            }
        }
    }

    /// Rewrite a recipe's instructions for beginners.
    pub async fn simplify(&self, recipe_name: &str, instructions: &str) -> Generation {
        tracing::info!("Simplifying recipe: {}", recipe_name);

        match self
            .query(&simplification_prompt(recipe_name, instructions))
            .await
        {
            Some(text) => {
                tracing::info!("Simplified recipe with AI");
                Generation::Generated(text)
            }
            None => {
                tracing::info!("AI unavailable, using fallback simplification");
                Generation::Fallback(fallback::simplification(recipe_name, instructions))
            }
        }
    }
}

fn suggestion_prompt(ingredients: &str) -> String {
    format!(
        r#"You are a helpful cooking assistant. Based on the following ingredients, suggest ONE simple and delicious recipe.

Available ingredients: {ingredients}

Please provide:
1. Recipe name (catchy and descriptive)
2. Brief description (1-2 sentences)
3. Additional ingredients needed (if any)
4. Simple step-by-step instructions (maximum 6 steps)
5. Estimated prep and cook time
6. Difficulty level (Easy/Medium/Hard)

Keep the response well-formatted, concise, and practical for home cooking."#
    )
}

fn simplification_prompt(recipe_name: &str, instructions: &str) -> String {
    format!(
        r#"You are a friendly cooking teacher helping a complete beginner. Simplify these recipe instructions in an encouraging way.

Recipe: {recipe_name}

Original Instructions:
{instructions}

Please provide:
1. Simplified, beginner-friendly instructions with clear, simple language
2. Exact timing and measurements explained
3. Helpful tips and common mistakes to avoid
4. What to look for (visual and sensory cues)
5. Maximum 6 easy-to-follow steps

Make it encouraging and build confidence. Format clearly with proper structure."#
    )
}
