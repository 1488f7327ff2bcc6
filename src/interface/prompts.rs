use std::collections::BTreeSet;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{PlannerError, Result};
use crate::models::{MealTime, MenuOption};
use crate::planner::Mode;

/// Ask which part of the application to open. `None` means quit.
pub fn prompt_home_choice() -> Result<Option<Mode>> {
    let items = [
        "Event menu plan (get menu recommendations)",
        "Custom plan (enter a fixed menu list)",
        "Single menu lookup",
        "Saved reports",
        "Quit",
    ];

    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&items[..])
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => Some(Mode::EventPlan),
        1 => Some(Mode::CustomPlan),
        2 => Some(Mode::SingleQuery),
        3 => Some(Mode::Archive),
        _ => None,
    })
}

/// Pick one of `items`, returning its index.
pub fn prompt_action(prompt: &str, items: &[&str]) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

/// Free-text input, pre-filled with `current`. May be left empty.
pub fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// A date in `YYYY-MM-DD` form.
pub fn prompt_date(prompt: &str, current: NaiveDate) -> Result<NaiveDate> {
    let input: String = Input::new()
        .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
        .default(current.to_string())
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            s.trim()
                .parse::<NaiveDate>()
                .map(|_| ())
                .map_err(|_| "Use the YYYY-MM-DD format".to_string())
        })
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::validation("Invalid date"))
}

/// A number of people. Anything else is asked again.
pub fn prompt_head_count(prompt: &str, current: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            parse_head_count(s).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    parse_head_count(&input)
}

/// Parse a head count typed by the user: a whole number of people.
pub fn parse_head_count(input: &str) -> Result<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::validation("Enter a whole number of people"))
}

pub fn prompt_meal_time(prompt: &str, current: MealTime) -> Result<MealTime> {
    let labels: Vec<&str> = MealTime::ALL.iter().map(|m| m.as_str()).collect();
    let default = MealTime::ALL.iter().position(|m| *m == current).unwrap_or(1);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(MealTime::ALL[selection])
}

/// Choose any number of meal times, starting from `current`.
pub fn prompt_meal_times(current: &BTreeSet<MealTime>) -> Result<BTreeSet<MealTime>> {
    let labels: Vec<&str> = MealTime::ALL.iter().map(|m| m.as_str()).collect();
    let defaults: Vec<bool> = MealTime::ALL.iter().map(|m| current.contains(m)).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Meal times (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| MealTime::ALL[i]).collect())
}

/// Pick a menu for one slot. `None` keeps whatever was chosen before.
pub fn prompt_menu_for_slot(
    date: NaiveDate,
    meal_time: MealTime,
    options: &[MenuOption],
    current: Option<&str>,
) -> Result<Option<String>> {
    let mut items: Vec<String> = options
        .iter()
        .map(|o| {
            let marker = if current == Some(o.menu_name.as_str()) { "* " } else { "  " };
            format!("{}{} [{}] - {}", marker, o.menu_name, o.category, o.description)
        })
        .collect();
    items.push("  (keep current choice)".to_string());

    let default = current
        .and_then(|c| options.iter().position(|o| o.menu_name == c))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(format!("{} {}", date, meal_time))
        .items(&items)
        .default(default)
        .interact()?;

    Ok(options.get(selection).map(|o| o.menu_name.clone()))
}

/// Ask before a saved report is deleted.
pub fn confirm_delete(title: &str) -> Result<bool> {
    prompt_yes_no(&format!("Delete the report '{}'?", title), false)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_head_count() {
        assert_eq!(parse_head_count("120").unwrap(), 120);
        assert_eq!(parse_head_count("  0 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_head_count_rejects_non_numbers() {
        for input in ["fifty", "", "-3", "12.5", "1,000"] {
            let err = parse_head_count(input).unwrap_err();
            assert!(matches!(err, PlannerError::Validation(_)), "{input:?}");
        }
    }
}
