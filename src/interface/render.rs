use chrono::Local;

use crate::export::format_total;
use crate::models::{CustomMealEntry, MenuOptions, PlanConfiguration, RecipeDetail, SavedReport};
use crate::planner::{IngredientSummary, SelectionTracker};

/// Print the report view: combined order list, then each meal.
pub fn display_report(
    title: &str,
    meals: &[RecipeDetail],
    summaries: &[IngredientSummary],
    fallback_head_count: u32,
) {
    println!();
    println!("=== REPORT: {} ===", title);
    println!();
    println!("--- Combined ingredient order list ---");

    if summaries.is_empty() {
        println!("  No data.");
    } else {
        let name_width = summaries.iter().map(|s| s.name.chars().count()).max().unwrap_or(4).max(4);
        let unit_width = summaries.iter().map(|s| s.unit.chars().count()).max().unwrap_or(4).max(4);

        println!(
            "  {:<nw$}  {:>10}  {:<uw$}  Usage breakdown",
            "Item",
            "Total",
            "Unit",
            nw = name_width,
            uw = unit_width
        );
        for summary in summaries {
            let breakdown: Vec<String> = summary
                .breakdown
                .iter()
                .map(|b| format!("{}: {}", b.menu_name, b.amount))
                .collect();
            println!(
                "  {:<nw$}  {:>10}  {:<uw$}  {}",
                summary.name,
                format_total(summary.total_amount),
                summary.unit,
                breakdown.join(", "),
                nw = name_width,
                uw = unit_width
            );
        }
    }

    for meal in meals {
        println!();
        println!(
            "[{} | {}] {} ({} people)",
            meal.date,
            meal.meal_time,
            meal.menu_name,
            meal.head_count.unwrap_or(fallback_head_count)
        );

        println!("  Ingredients:");
        for ingredient in &meal.ingredients {
            println!("    - {} {}{}", ingredient.name, ingredient.amount, ingredient.unit);
        }

        if !meal.steps.is_empty() {
            println!("  Bulk cooking steps:");
            for (i, step) in meal.steps.iter().enumerate() {
                println!("    {:>2}. {}", i + 1, step);
            }
        }
    }
    println!();
}

pub fn display_plan(plan: &PlanConfiguration) {
    let meal_times: Vec<&str> = plan.meal_times.iter().map(|m| m.as_str()).collect();
    let name = if plan.event_name.is_empty() {
        "(not set)"
    } else {
        plan.event_name.as_str()
    };

    println!();
    println!("=== Event settings ===");
    println!("  Event name : {}", name);
    println!("  Dates      : {} ~ {}", plan.start_date, plan.end_date);
    println!("  Head count : {}", plan.head_count);
    println!("  Meal times : {}", meal_times.join(", "));
    println!();
}

/// Print recommended menus, marking the selected one in each slot.
pub fn display_menu_options(options: &MenuOptions, selections: &SelectionTracker) {
    if options.is_empty() {
        println!("No menu recommendations yet.");
        return;
    }

    println!();
    println!("=== Recommended menus ===");
    for (date, slots) in options {
        println!();
        println!("{}", date);
        for (meal_time, menus) in slots {
            println!("  {}", meal_time);
            for menu in menus {
                let marker = if selections.is_selected(*date, *meal_time, &menu.menu_name) {
                    "[x]"
                } else {
                    "[ ]"
                };
                println!("    {} {} - {}", marker, menu.menu_name, menu.description);
            }
        }
    }
    println!();
    println!("{} slot(s) selected.", selections.len());
    println!();
}

pub fn display_custom_entries(entries: &[CustomMealEntry]) {
    println!();
    println!("=== Custom plan ===");
    if entries.is_empty() {
        println!("  (no rows)");
    }
    for (i, entry) in entries.iter().enumerate() {
        let menu = if entry.is_blank() { "(empty)" } else { entry.menu_name.as_str() };
        println!(
            "{:>3}. {}  {:<10}  {:>5} people  {}",
            i + 1,
            entry.date,
            entry.meal_time.as_str(),
            entry.head_count,
            menu
        );
    }
    println!();
}

pub fn display_report_list(reports: &[SavedReport]) {
    if reports.is_empty() {
        println!("No saved reports.");
        println!("Calculate a plan, then choose 'Save report' to keep it here.");
        return;
    }

    println!();
    println!("=== Saved reports ({}) ===", reports.len());
    for report in reports {
        println!(
            "  {}  {}  {}  ({} menus)",
            report.id,
            report.created_at.with_timezone(&Local).format("%Y-%m-%d"),
            report.title,
            report.meal_count()
        );
    }
    println!();
}
