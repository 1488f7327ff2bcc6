use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MealTime, RecipeDetail};

/// One meal's contribution to an aggregated ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub date: NaiveDate,
    pub meal_time: MealTime,
    /// Amount text exactly as the recipe gave it.
    pub amount: String,
    pub menu_name: String,
}

/// Total requirement for one (name, unit) pair across a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummary {
    pub name: String,
    pub unit: String,
    pub total_amount: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Sum ingredient amounts across meals, grouped by exact (name, unit).
///
/// Summaries come out in first-seen order. Ingredients without a name are
/// skipped; amounts that do not parse count as zero but still appear in
/// the breakdown. Units are never converted, so "g" and "kg" stay apart.
pub fn aggregate(meals: &[RecipeDetail]) -> Vec<IngredientSummary> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut summaries: Vec<IngredientSummary> = Vec::new();

    for meal in meals {
        for ingredient in &meal.ingredients {
            if ingredient.name.is_empty() {
                continue;
            }

            let key = (ingredient.name.as_str(), ingredient.unit.as_str());
            let slot = *index.entry(key).or_insert_with(|| {
                summaries.push(IngredientSummary {
                    name: ingredient.name.clone(),
                    unit: ingredient.unit.clone(),
                    total_amount: 0.0,
                    breakdown: Vec::new(),
                });
                summaries.len() - 1
            });

            let summary = &mut summaries[slot];
            summary.total_amount += parse_amount(&ingredient.amount);
            summary.breakdown.push(BreakdownEntry {
                date: meal.date,
                meal_time: meal.meal_time,
                amount: ingredient.amount.clone(),
                menu_name: meal.menu_name.clone(),
            });
        }
    }

    summaries
}

/// Numeric value of a free-text amount.
///
/// Reads the first number in the text: digits with at most one decimal
/// point, skipping `,` thousands separators. Everything
/// after it is ignored, so a range such as "2~3" reads as 2. Text with no
/// digits reads as 0.
pub fn parse_amount(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    let Some(start) = chars
        .iter()
        .enumerate()
        .position(|(i, c)| c.is_ascii_digit() || (*c == '.' && next_is_digit(&chars, i)))
    else {
        return 0.0;
    };

    let mut number = String::new();
    let mut seen_point = false;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            number.push(c);
        } else if c == '.' && !seen_point && next_is_digit(&chars, i) {
            seen_point = true;
            number.push(c);
        } else if !(c == ',' && !seen_point && is_thousands_group(&chars, i)) {
            break;
        }
        i += 1;
    }

    number.parse().unwrap_or(0.0)
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

/// True when the comma at `i` is followed by exactly three digits.
fn is_thousands_group(chars: &[char], i: usize) -> bool {
    let group = chars.get(i + 1..i + 4);
    group.is_some_and(|g| g.iter().all(|c| c.is_ascii_digit()))
        && !chars.get(i + 4).is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use assert_float_eq::assert_float_absolute_eq;

    fn meal(menu: &str, date: &str, meal_time: MealTime, ingredients: Vec<Ingredient>) -> RecipeDetail {
        RecipeDetail {
            date: date.parse().unwrap(),
            meal_time,
            menu_name: menu.to_string(),
            head_count: Some(100),
            ingredients,
            steps: vec![],
            recipe_link: String::new(),
        }
    }

    #[test]
    fn test_same_name_and_unit_are_summed() {
        let meals = vec![
            meal("A", "2024-06-01", MealTime::Lunch, vec![Ingredient::new("rice", "10", "kg")]),
            meal("B", "2024-06-01", MealTime::Dinner, vec![Ingredient::new("rice", "5", "kg")]),
        ];

        let summaries = aggregate(&meals);
        assert_eq!(summaries.len(), 1);

        let rice = &summaries[0];
        assert_eq!(rice.name, "rice");
        assert_eq!(rice.unit, "kg");
        assert_float_absolute_eq!(rice.total_amount, 15.0, 1e-9);
        assert_eq!(rice.breakdown.len(), 2);
        assert_eq!(rice.breakdown[0].menu_name, "A");
        assert_eq!(rice.breakdown[0].amount, "10");
        assert_eq!(rice.breakdown[1].menu_name, "B");
        assert_eq!(rice.breakdown[1].meal_time, MealTime::Dinner);
    }

    #[test]
    fn test_units_are_never_merged() {
        let meals = vec![meal(
            "Stew",
            "2024-06-01",
            MealTime::Lunch,
            vec![
                Ingredient::new("pork", "500", "g"),
                Ingredient::new("pork", "0.5", "kg"),
            ],
        )];

        let summaries = aggregate(&meals);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].unit, "g");
        assert_eq!(summaries[1].unit, "kg");
    }

    #[test]
    fn test_first_seen_order() {
        let meals = vec![
            meal(
                "A",
                "2024-06-01",
                MealTime::Lunch,
                vec![Ingredient::new("onion", "3", "kg"), Ingredient::new("garlic", "1", "kg")],
            ),
            meal(
                "B",
                "2024-06-02",
                MealTime::Lunch,
                vec![Ingredient::new("tofu", "4", "kg"), Ingredient::new("onion", "2", "kg")],
            ),
        ];

        let summaries = aggregate(&meals);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["onion", "garlic", "tofu"]);
    }

    #[test]
    fn test_non_numeric_amount_kept_in_breakdown() {
        let meals = vec![meal(
            "Soup",
            "2024-06-01",
            MealTime::Dinner,
            vec![Ingredient::new("salt", "적당량", ""), Ingredient::new("water", "200", "")],
        )];

        let summaries = aggregate(&meals);
        assert_float_absolute_eq!(summaries[0].total_amount, 0.0, 1e-9);
        assert_eq!(summaries[0].breakdown[0].amount, "적당량");
        assert_float_absolute_eq!(summaries[1].total_amount, 200.0, 1e-9);
    }

    #[test]
    fn test_nameless_ingredients_are_skipped() {
        let meals = vec![meal(
            "Soup",
            "2024-06-01",
            MealTime::Dinner,
            vec![Ingredient::new("", "5", "kg"), Ingredient::new("leek", "1", "kg")],
        )];

        let summaries = aggregate(&meals);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "leek");
    }

    #[test]
    fn test_separator_in_names_does_not_collide() {
        let meals = vec![meal(
            "Mix",
            "2024-06-01",
            MealTime::Lunch,
            vec![Ingredient::new("a_b", "1", "c"), Ingredient::new("a", "2", "b_c")],
        )];

        assert_eq!(aggregate(&meals).len(), 2);
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let meals = vec![
            meal("A", "2024-06-01", MealTime::Lunch, vec![Ingredient::new("rice", "10", "kg")]),
            meal("B", "2024-06-02", MealTime::Lunch, vec![Ingredient::new("rice", "2~3", "kg")]),
        ];
        let before = meals.clone();

        let first = aggregate(&meals);
        let second = aggregate(&meals);
        assert_eq!(first, second);
        assert_eq!(meals, before);
    }

    #[test]
    fn test_parse_amount() {
        assert_float_absolute_eq!(parse_amount("200"), 200.0, 1e-9);
        assert_float_absolute_eq!(parse_amount("1.5kg"), 1.5, 1e-9);
        assert_float_absolute_eq!(parse_amount("about 12.25"), 12.25, 1e-9);
        assert_float_absolute_eq!(parse_amount("1,000 g"), 1000.0, 1e-9);
        assert_float_absolute_eq!(parse_amount(".5"), 0.5, 1e-9);
        assert_float_absolute_eq!(parse_amount("적당량"), 0.0, 1e-9);
        assert_float_absolute_eq!(parse_amount(""), 0.0, 1e-9);
        assert_float_absolute_eq!(parse_amount("1.2.3"), 1.2, 1e-9);
    }

    #[test]
    fn test_range_takes_first_number() {
        // Stripping non-digits would turn this into 23.
        assert_float_absolute_eq!(parse_amount("2~3"), 2.0, 1e-9);
        assert_float_absolute_eq!(parse_amount("2-3 kg"), 2.0, 1e-9);
        assert_float_absolute_eq!(parse_amount("1.5~2"), 1.5, 1e-9);
        assert_float_absolute_eq!(parse_amount("2,3"), 2.0, 1e-9);
    }
}
