//! Hungie, the chef persona in front of the completion provider.
//!
//! Every method returns text the client can show. When the provider fails,
//! the reply is a canned line and `fallback` is set, so an AI outage never
//! turns into a 5xx.

use crate::models::{Substitution, SubstitutionMap};
use crate::services::catalog::RecipeCatalog;
use crate::services::providers::{ChatMessage, ChatProvider, CompletionParams};
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

pub const PERSONALITY_PROMPT: &str = r#"You are Hungie, an enthusiastic and encouraging chef AI assistant with a unique personality. Your mission is to help people discover and cook amazing food.

PERSONALITY TRAITS:
- Encouraging and supportive (never intimidating)
- Passionate about food and cooking
- Practical and direct (no fluff, just helpful advice)
- Fun and energetic (use emojis and excitement)
- Uses "Yes, Chef!" as a signature catchphrase when appropriate
- Speaks like a knowledgeable but friendly chef who wants everyone to succeed

ANTI-SEO PHILOSOPHY:
- No long backstories or filler content
- Get straight to the point
- Focus on practical cooking help
- Make food accessible, not intimidating

CORE VALUES:
- Real food for real people
- Everyone can cook with confidence
- Substitutions and creativity are encouraged
- Cooking should be fun, not stressful"#;

pub const CHAT_FALLBACK: &str =
    "Yes, Chef! 🍴 I'm here to help you find something delicious! What are you craving today?";

const RECIPE_ADVICE_FALLBACK: &str =
    "Yes, Chef! I'd recommend trying one of these substitutes - they'll work great in your dish!";

const BULK_OVERVIEW_FALLBACK: &str = "Yes, Chef! I found some great substitution options for you!";

/// Recipes and categories quoted to the model as database context.
const CONTEXT_RECIPES: usize = 10;
const CONTEXT_CATEGORIES: usize = 10;

/// Reply shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatOutcome {
    pub text: String,
    /// True when the provider failed and `text` is canned.
    pub fallback: bool,
}

#[derive(Clone)]
pub struct ChefAssistant {
    provider: Arc<dyn ChatProvider>,
}

impl ChefAssistant {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Free-form chat grounded in a sample of the recipe database.
    pub async fn chat(
        &self,
        catalog: Option<&RecipeCatalog>,
        message: &str,
        context: &str,
    ) -> ChatOutcome {
        let prompt = chat_prompt(catalog, message, context);
        self.ask("chat", prompt, 300, CHAT_FALLBACK).await
    }

    /// Advice on substitutes for an ingredient the user asked about.
    pub async fn substitution_advice(
        &self,
        ingredient: &str,
        substitutions: &[Substitution],
        question: &str,
    ) -> ChatOutcome {
        let prompt = format!(
            "The user is asking about substitutions for {ingredient}.\n\n\
             Available substitutions: {subs}\n\n\
             User's original question: {question}\n\n\
             As Hungie, provide encouraging advice about these substitutions. Start with \"Yes, Chef!\" \
             and give practical guidance about which substitute would work best.",
            subs = pretty(&substitutions),
        );
        let fallback = format!(
            "Yes, Chef! I've got some great substitutes for {}. Let me help you out!",
            ingredient
        );
        self.ask("substitution_advice", prompt, 250, &fallback).await
    }

    /// One recommendation for the best substitute in a specific dish.
    pub async fn recipe_substitution_advice(
        &self,
        ingredient: &str,
        substitutions: &[Substitution],
        recipe_context: &str,
    ) -> ChatOutcome {
        let prompt = format!(
            "The user is making {recipe_context} and needs a substitute for {ingredient}.\n\n\
             Available substitutions: {subs}\n\n\
             As Hungie, provide ONE brief, encouraging recommendation for the best substitute given this recipe context. \
             Start with \"Yes, Chef!\" and be practical and supportive.",
            subs = pretty(&substitutions),
        );
        self.ask("recipe_advice", prompt, 150, RECIPE_ADVICE_FALLBACK)
            .await
    }

    /// Overview of substitutions for several ingredients in one dish.
    pub async fn bulk_overview(
        &self,
        requested: &[String],
        found: &SubstitutionMap,
        recipe_context: &str,
    ) -> ChatOutcome {
        let found_keys: Vec<&str> = found.keys().map(String::as_str).collect();
        let prompt = format!(
            "The user is making {recipe_context} and needs substitutes for these ingredients: {requested}.\n\n\
             Found substitutions for: {found}\n\n\
             As Hungie, provide a brief, encouraging overview with your top recommendations. \
             Start with \"Yes, Chef!\" and prioritize the most important substitutions.",
            requested = requested.join(", "),
            found = found_keys.join(", "),
        );
        self.ask("bulk_overview", prompt, 200, BULK_OVERVIEW_FALLBACK)
            .await
    }

    async fn ask(
        &self,
        operation: &'static str,
        prompt: String,
        max_tokens: u32,
        fallback: &str,
    ) -> ChatOutcome {
        let messages = [
            ChatMessage::system(PERSONALITY_PROMPT),
            ChatMessage::user(prompt),
        ];
        let params = CompletionParams {
            max_tokens,
            temperature: 0.7,
        };

        let start = Instant::now();
        let result = self.provider.complete(&messages, &params).await;
        histogram!("ai_request_duration_seconds", "operation" => operation)
            .record(start.elapsed().as_secs_f64());

        match result {
            Ok(completion) => {
                counter!("ai_requests_total", "operation" => operation, "outcome" => "success")
                    .increment(1);
                tracing::debug!(
                    operation,
                    model = %self.provider.model(),
                    prompt_tokens = ?completion.prompt_tokens,
                    completion_tokens = ?completion.completion_tokens,
                    "AI completion received"
                );
                ChatOutcome {
                    text: completion.text,
                    fallback: false,
                }
            }
            Err(e) => {
                counter!("ai_requests_total", "operation" => operation, "outcome" => e.kind())
                    .increment(1);
                tracing::warn!(
                    operation,
                    model = %self.provider.model(),
                    error = %e,
                    "AI completion failed, using fallback reply"
                );
                ChatOutcome {
                    text: fallback.to_string(),
                    fallback: true,
                }
            }
        }
    }
}

/// User prompt for chat: database sample, prior context and the message.
pub fn chat_prompt(catalog: Option<&RecipeCatalog>, message: &str, context: &str) -> String {
    let database_context = match catalog {
        Some(catalog) => {
            let sample: Vec<_> = catalog
                .complete()
                .take(CONTEXT_RECIPES)
                .map(|r| {
                    json!({
                        "name": r.summary.name,
                        "description": r.summary.description,
                        "total_time": r.summary.total_time,
                        "servings": r.summary.servings,
                    })
                })
                .collect();
            let categories: Vec<_> = catalog
                .categories()
                .into_iter()
                .take(CONTEXT_CATEGORIES)
                .collect();

            format!(
                "AVAILABLE RECIPES SAMPLE: {}\n\nPOPULAR CATEGORIES: {}\n\n\
                 TOTAL DATABASE: {} complete recipes with full ingredients and instructions",
                pretty(&sample),
                pretty(&categories),
                catalog.complete_count()
            )
        }
        None => "The recipe database is currently unavailable.".to_string(),
    };

    format!(
        "Context about our recipe database:\n{database_context}\n\n\
         Previous conversation context: {context}\n\n\
         User's message: {message}\n\n\
         Please respond as Hungie, keeping in mind:\n\
         1. Recommend recipes from our database when they fit\n\
         2. Focus on being helpful and encouraging\n\
         3. If they're looking for specific recipes, mention we can search our database\n\
         4. Use \"Yes, Chef!\" when appropriate\n\
         5. Ask follow-up questions to better understand their needs\n\
         6. Keep it conversational and fun!"
    )
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
