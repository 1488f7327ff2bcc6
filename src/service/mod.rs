//! The external capability that produces menus and recipes.
//!
//! Everything the planner knows about food quantities comes through
//! [`MenuService`]. [`GeminiService`] talks to the hosted model;
//! [`StubService`] answers deterministically in-process.

pub mod gemini;
pub mod response;
pub mod stub;

pub use gemini::GeminiService;
pub use stub::StubService;

use crate::error::Result;
use crate::models::{MenuOptions, PlanConfiguration, RecipeDetail, RecipeRequest};

pub trait MenuService {
    /// Recommend menu options for every date and meal time of the plan.
    fn generate_menu_options(&self, plan: &PlanConfiguration) -> Result<MenuOptions>;

    /// Resolve each request into ingredients scaled to its head count and
    /// bulk-kitchen cooking steps, one detail per request.
    fn calculate_recipes(&self, requests: &[RecipeRequest]) -> Result<Vec<RecipeDetail>>;
}
