//! Turning model output text into planner types.
//!
//! Models are asked for JSON but sometimes wrap it in a fenced block or add
//! prose around it. Anything that still cannot be read is reported as
//! [`PlannerError::Interpretation`].

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::models::{Ingredient, MealTime, MenuOption, MenuOptions, RecipeDetail};

/// Parse the JSON payload out of a model answer.
pub fn extract_json(text: &str) -> Result<Value> {
    let candidate = fenced_block(text).unwrap_or(text);
    if let Ok(value) = serde_json::from_str(candidate.trim()) {
        return Ok(value);
    }

    if let Some(inner) = bracketed(text) {
        if let Ok(value) = serde_json::from_str(inner) {
            return Ok(value);
        }
    }

    tracing::warn!(len = text.len(), "model answer is not readable JSON");
    Err(PlannerError::Interpretation)
}

/// Contents of the first ``` fenced block, minus an optional `json` tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let rest = &text[open + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let close = rest.find("```")?;
    Some(&rest[..close])
}

/// From the first `[` or `{` to the last matching closer.
fn bracketed(text: &str) -> Option<&str> {
    let start = text.find(['[', '{'])?;
    let closer = if text[start..].starts_with('[') { ']' } else { '}' };
    let end = text.rfind(closer)?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Debug, Deserialize)]
struct MenuAnswer {
    #[serde(default)]
    recommendations: Vec<DayAnswer>,
}

#[derive(Debug, Deserialize)]
struct DayAnswer {
    date: NaiveDate,
    #[serde(default)]
    meals: Vec<MealAnswer>,
}

#[derive(Debug, Deserialize)]
struct MealAnswer {
    time: String,
    #[serde(default)]
    options: Vec<MenuOption>,
}

/// Fold a recommendation answer into the date → meal time → options tree.
///
/// Meals whose time label is not recognised are dropped.
pub fn parse_menu_options(text: &str) -> Result<MenuOptions> {
    let answer: MenuAnswer = from_value(extract_json(text)?)?;

    let mut options = MenuOptions::new();
    for day in answer.recommendations {
        let slots = options.entry(day.date).or_default();
        for meal in day.meals {
            match parse_meal_time(&meal.time) {
                Some(meal_time) => {
                    slots.insert(meal_time, meal.options);
                }
                None => tracing::warn!(time = %meal.time, date = %day.date, "skipping unknown meal time"),
            }
        }
    }
    Ok(options)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeAnswer {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    meal_time: Option<String>,
    menu_name: String,
    #[serde(default)]
    head_count: Option<f64>,
    #[serde(default)]
    ingredients: Vec<IngredientAnswer>,
    #[serde(default)]
    steps: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IngredientAnswer {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    amount: Option<AmountAnswer>,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AmountAnswer {
    Text(String),
    Number(serde_json::Number),
}

impl IngredientAnswer {
    fn into_ingredient(self) -> Ingredient {
        let amount = match self.amount {
            Some(AmountAnswer::Text(text)) if !text.is_empty() => text,
            Some(AmountAnswer::Number(number)) => number.to_string(),
            _ => "0".to_string(),
        };
        Ingredient {
            name: self.name.unwrap_or_default(),
            amount,
            unit: self.unit.unwrap_or_default(),
        }
    }
}

/// Read a calculation answer, filling a missing date with `today` and a
/// missing or unknown meal time with lunch.
pub fn parse_recipe_details(text: &str, today: NaiveDate) -> Result<Vec<RecipeDetail>> {
    let answers: Vec<RecipeAnswer> = from_value(extract_json(text)?)?;

    answers
        .into_iter()
        .map(|answer| -> Result<RecipeDetail> {
            let date = match answer.date.as_deref().map(str::trim) {
                None | Some("") => today,
                Some(raw) => raw.parse().map_err(|_| {
                    tracing::warn!(date = raw, "unreadable date in recipe answer");
                    PlannerError::Interpretation
                })?,
            };
            let meal_time = answer
                .meal_time
                .as_deref()
                .and_then(parse_meal_time)
                .unwrap_or(MealTime::Lunch);

            Ok(RecipeDetail {
                date,
                meal_time,
                menu_name: answer.menu_name,
                head_count: answer
                    .head_count
                    .filter(|n| n.is_finite() && *n >= 0.0)
                    .map(|n| n.round() as u32),
                ingredients: answer
                    .ingredients
                    .into_iter()
                    .map(IngredientAnswer::into_ingredient)
                    .collect(),
                steps: answer.steps,
                recipe_link: String::new(),
            })
        })
        .collect()
}

/// Recognise a meal time label in any of the accepted spellings.
pub fn parse_meal_time(label: &str) -> Option<MealTime> {
    serde_json::from_value(Value::String(label.trim().to_string())).ok()
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "model answer has an unexpected shape");
        PlannerError::Interpretation
    })
}
