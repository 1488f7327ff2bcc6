use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MealTime;

/// A recommended menu for one meal slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub menu_name: String,
    pub description: String,
    pub category: String,
}

/// Recommended options keyed by date, then meal time.
pub type MenuOptions = BTreeMap<NaiveDate, BTreeMap<MealTime, Vec<MenuOption>>>;

/// One ingredient line of a recipe, scaled to the meal's head count.
///
/// `amount` is free text ("10", "2~3", "to taste") and is only interpreted
/// when aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub amount: String,

    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: &str, amount: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// A resolved meal: ingredients and bulk-kitchen steps for one menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub menu_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_count: Option<u32>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default)]
    pub recipe_link: String,
}

/// One item sent to the ingredient calculation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_time: Option<MealTime>,

    pub menu_name: String,
    pub head_count: u32,
}

impl RecipeRequest {
    /// A request with no slot attached (single menu lookup).
    pub fn unslotted(menu_name: &str, head_count: u32) -> Self {
        Self {
            date: None,
            meal_time: None,
            menu_name: menu_name.to_string(),
            head_count,
        }
    }

    pub fn slotted(date: NaiveDate, meal_time: MealTime, menu_name: &str, head_count: u32) -> Self {
        Self {
            date: Some(date),
            meal_time: Some(meal_time),
            menu_name: menu_name.to_string(),
            head_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unslotted_request_omits_slot_fields() {
        let json = serde_json::to_value(RecipeRequest::unslotted("Bibimbap", 80)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"menuName": "Bibimbap", "headCount": 80})
        );
    }

    #[test]
    fn test_menu_options_tree_roundtrip() {
        let mut options = MenuOptions::new();
        options.entry("2024-04-02".parse().unwrap()).or_default().insert(
            MealTime::Dinner,
            vec![MenuOption {
                menu_name: "Kimchi stew".to_string(),
                description: "Warm and filling".to_string(),
                category: "Korean".to_string(),
            }],
        );

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"2024-04-02\""));
        assert!(json.contains("\"dinner\""));

        let back: MenuOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_stored_detail_fills_missing_lists() {
        let detail: RecipeDetail = serde_json::from_str(
            r#"{"date": "2024-04-02", "mealTime": "lunch", "menuName": "Japchae"}"#,
        )
        .unwrap();
        assert!(detail.ingredients.is_empty());
        assert!(detail.steps.is_empty());
        assert_eq!(detail.head_count, None);
        assert_eq!(detail.recipe_link, "");
    }
}
