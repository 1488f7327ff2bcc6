use std::time::Duration;

/// Base URL of the Generative Language REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fast model used for menu recommendations.
pub const DEFAULT_MENU_MODEL: &str = "gemini-3-flash-preview";

/// Accuracy-first model used for ingredient and recipe calculation.
pub const DEFAULT_RECIPE_MODEL: &str = "gemini-3-pro-preview";

/// Directory holding the four persisted documents.
pub const DEFAULT_DATA_DIR: &str = ".catering_planner";

/// Settings for the recommendation and calculation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub menu_model: String,
    pub recipe_model: String,
    /// `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            menu_model: DEFAULT_MENU_MODEL.to_string(),
            recipe_model: DEFAULT_RECIPE_MODEL.to_string(),
            timeout: None,
        }
    }
}
