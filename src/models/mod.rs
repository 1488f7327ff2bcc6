pub mod plan;
pub mod recipe;
pub mod report;

pub use plan::{CustomField, CustomMealEntry, MealTime, PlanConfiguration};
pub use recipe::{Ingredient, MenuOption, MenuOptions, RecipeDetail, RecipeRequest};
pub use report::SavedReport;

use chrono::{Local, NaiveDate};

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
