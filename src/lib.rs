pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod id;
pub mod interface;
pub mod models;
pub mod planner;
pub mod service;
pub mod state;

pub use error::{PlannerError, Result};
pub use models::{Ingredient, RecipeDetail};
