//! Gemini `generateContent` client.

use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::ServiceConfig;
use crate::error::{PlannerError, Result};
use crate::models::{MenuOptions, PlanConfiguration, RecipeDetail, RecipeRequest, today};
use crate::service::MenuService;
use crate::service::response::{parse_menu_options, parse_recipe_details};

/// Menu and recipe generation backed by the hosted Gemini models.
#[derive(Debug)]
pub struct GeminiService {
    config: ServiceConfig,
    client: Client,
}

impl GeminiService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Send one prompt and return the model's text answer.
    fn generate(&self, model: &str, prompt: String, schema: Value) -> Result<String> {
        tracing::debug!(%model, "sending generateContent request");
        let response = self.request(model, prompt, schema)?.send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %model, "generateContent failed");
            return Err(PlannerError::Service {
                status: Some(status.as_u16()),
                message,
            });
        }

        let response: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "unexpected generateContent envelope");
            PlannerError::Interpretation
        })?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        tracing::debug!(%model, chars = text.len(), "generateContent answered");
        Ok(text)
    }

    /// Build the `generateContent` call. The key travels in the
    /// `x-goog-api-key` header, never in the URL.
    fn request(&self, model: &str, prompt: String, schema: Value) -> Result<RequestBuilder> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PlannerError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        Ok(self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request))
    }
}

impl MenuService for GeminiService {
    fn generate_menu_options(&self, plan: &PlanConfiguration) -> Result<MenuOptions> {
        let text = self.generate(&self.config.menu_model, menu_prompt(plan), menu_schema())?;
        parse_menu_options(&text)
    }

    fn calculate_recipes(&self, requests: &[RecipeRequest]) -> Result<Vec<RecipeDetail>> {
        let prompt = recipe_prompt(requests)?;
        let text = self.generate(&self.config.recipe_model, prompt, recipe_schema())?;
        parse_recipe_details(&text, today())
    }
}

fn menu_prompt(plan: &PlanConfiguration) -> String {
    let meal_times: Vec<&str> = plan.meal_times.iter().map(|m| m.as_str()).collect();
    format!(
        "You are a professional university dietitian. Propose the menu for the event '{}'.\n\
         Period: {} to {}. Meals: {}.\n\
         For every date and meal, recommend 3 Korean-based menus that are easy to cook in bulk \
         and cost-efficient. Give each menu a short nutritional reason for its composition.\n\
         Use these exact meal time labels: morning, lunch, dinner, late-night.",
        plan.event_name,
        plan.start_date,
        plan.end_date,
        meal_times.join(",")
    )
}

fn recipe_prompt(requests: &[RecipeRequest]) -> Result<String> {
    Ok(format!(
        "You are a dietitian preparing a purchase order. For each menu below, work out the \
         standard amount per person and multiply it by that item's headCount to get the total.\n\
         Data: {}.\n\
         State every amount precisely in kg or g. Write the cooking steps as a bulk-kitchen \
         process for 100 or more servings.",
        serde_json::to_string(requests)?
    ))
}

fn menu_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING" },
                        "meals": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "time": { "type": "STRING" },
                                    "options": {
                                        "type": "ARRAY",
                                        "items": {
                                            "type": "OBJECT",
                                            "properties": {
                                                "menuName": { "type": "STRING" },
                                                "description": { "type": "STRING" },
                                                "category": { "type": "STRING" }
                                            },
                                            "required": ["menuName", "description", "category"]
                                        }
                                    }
                                },
                                "required": ["time", "options"]
                            }
                        }
                    },
                    "required": ["date", "meals"]
                }
            }
        },
        "required": ["recommendations"]
    })
}

fn recipe_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": { "type": "STRING" },
                "mealTime": { "type": "STRING" },
                "menuName": { "type": "STRING" },
                "headCount": { "type": "NUMBER" },
                "ingredients": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "amount": { "type": "STRING" },
                            "unit": { "type": "STRING" }
                        },
                        "required": ["name", "amount", "unit"]
                    }
                },
                "steps": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["menuName", "ingredients", "steps", "headCount"]
        }
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
