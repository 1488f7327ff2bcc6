use std::fs;
use std::path::Path;

use askama::Template;
use chrono::NaiveDate;

use crate::error::Result;
use crate::export::format_total;
use crate::models::RecipeDetail;
use crate::planner::{BreakdownEntry, IngredientSummary};

/// Markup of the report view: the combined order table followed by one
/// card per meal.
#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    rows: Vec<OrderRow<'a>>,
    cards: Vec<MealCard<'a>>,
}

struct OrderRow<'a> {
    name: &'a str,
    total: String,
    unit: &'a str,
    breakdown: &'a [BreakdownEntry],
}

struct MealCard<'a> {
    meal: &'a RecipeDetail,
    head_count: u32,
}

#[derive(Template)]
#[template(path = "document.html")]
struct DocumentTemplate<'a> {
    title: &'a str,
    markup: &'a str,
}

/// Render the report view. Meals without their own head count show
/// `fallback_head_count`.
pub fn render_report_markup(
    meals: &[RecipeDetail],
    summaries: &[IngredientSummary],
    fallback_head_count: u32,
) -> Result<String> {
    let rows = summaries
        .iter()
        .map(|s| OrderRow {
            name: &s.name,
            total: format_total(s.total_amount),
            unit: &s.unit,
            breakdown: &s.breakdown,
        })
        .collect();
    let cards = meals
        .iter()
        .map(|meal| MealCard {
            meal,
            head_count: meal.head_count.unwrap_or(fallback_head_count),
        })
        .collect();

    Ok(ReportTemplate { rows, cards }.render()?)
}

/// Wrap report markup in a standalone, printable HTML document.
pub fn render_document(title: &str, markup: &str) -> Result<String> {
    Ok(DocumentTemplate { title, markup }.render()?)
}

pub fn export_html<P: AsRef<Path>>(path: P, title: &str, markup: &str) -> Result<()> {
    fs::write(path.as_ref(), render_document(title, markup)?)?;
    tracing::info!(path = %path.as_ref().display(), "html exported");
    Ok(())
}

pub fn default_html_name(date: NaiveDate) -> String {
    format!("catering_report_{}.html", date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealTime};
    use crate::planner::aggregate;

    fn sample_meals() -> Vec<RecipeDetail> {
        vec![RecipeDetail {
            date: "2024-06-01".parse().unwrap(),
            meal_time: MealTime::Dinner,
            menu_name: "Fish & <chips>".to_string(),
            head_count: None,
            ingredients: vec![Ingredient::new("cod", "12", "kg")],
            steps: vec!["Batter".to_string(), "Fry at 180C".to_string()],
            recipe_link: String::new(),
        }]
    }

    #[test]
    fn test_markup_escapes_and_falls_back_to_plan_head_count() {
        let meals = sample_meals();
        let markup = render_report_markup(&meals, &aggregate(&meals), 75).unwrap();

        assert!(markup.contains("Fish &amp; &lt;chips&gt;"));
        assert!(!markup.contains("<chips>"));
        assert!(markup.contains("75 people"));
        assert!(markup.contains("<td>cod</td><td>12</td><td>kg</td>"));
        assert!(markup.contains("<li>Fry at 180C</li>"));
        assert!(markup.contains("2024-06-01 | dinner"));
    }

    #[test]
    fn test_empty_report_markup() {
        let markup = render_report_markup(&[], &[], 50).unwrap();
        assert!(markup.contains("No data."));
    }

    #[test]
    fn test_document_is_standalone() {
        let doc = render_document("Seminar \"Day 1\"", "<p>body</p>").unwrap();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"UTF-8\">"));
        assert!(doc.contains("<title>Seminar &quot;Day 1&quot;</title>"));
        assert!(doc.contains("<p>body</p>"));
        assert!(doc.contains("@page { size: A4"));
        assert!(!doc.contains("<script"));
    }
}
