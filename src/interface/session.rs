//! Interactive terminal session driving a [`Workflow`].

use std::path::PathBuf;

use crate::error::{PlannerError, Result};
use crate::export::{
    default_csv_name, default_html_name, export_csv, export_html, render_report_markup,
};
use crate::interface::prompts::{
    confirm_delete, prompt_action, prompt_date, prompt_head_count, prompt_home_choice,
    prompt_meal_time, prompt_meal_times, prompt_menu_for_slot, prompt_text,
};
use crate::interface::render::{
    display_custom_entries, display_menu_options, display_plan, display_report,
    display_report_list,
};
use crate::models::{CustomField, today};
use crate::planner::{ArchiveStep, CustomStep, EventStep, QueryStep, Screen, Workflow};
use crate::service::MenuService;

/// Run screens until the user quits from the home menu.
///
/// A failed action is reported and the session stays on its screen.
pub fn run_interactive<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    loop {
        let step = match workflow.screen().clone() {
            Screen::Home => match prompt_home_choice()? {
                Some(mode) => {
                    workflow.enter(mode);
                    Ok(())
                }
                None => return Ok(()),
            },
            Screen::EventPlan(EventStep::Configure) => event_configure(workflow),
            Screen::EventPlan(EventStep::SelectMenus) => event_select(workflow),
            Screen::CustomPlan(CustomStep::EditRows) => custom_edit(workflow),
            Screen::SingleQuery(QueryStep::Enter) => single_enter(workflow),
            Screen::Archive(ArchiveStep::List) => archive_list(workflow),
            Screen::EventPlan(EventStep::Report)
            | Screen::CustomPlan(CustomStep::Report)
            | Screen::SingleQuery(QueryStep::Report)
            | Screen::Archive(ArchiveStep::ViewReport(_)) => report_screen(workflow),
        };
        surface(step)?;
    }
}

/// Show a failed action's message and stay on the current screen.
///
/// Terminal prompt failures are not recoverable and are passed on.
fn surface(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(PlannerError::Prompt(e)) => Err(PlannerError::Prompt(e)),
        Err(e) => {
            eprintln!();
            eprintln!("!! {}", e);
            eprintln!();
            Ok(())
        }
    }
}

fn loading_notice() {
    println!();
    println!("Analysing menus and calculating ingredients... (usually 5-10 seconds)");
}

fn event_configure<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    display_plan(workflow.plan());

    let choice = prompt_action(
        "Event settings",
        &[
            "Get menu recommendations",
            "Event name",
            "Dates",
            "Head count",
            "Meal times",
            "Back to home",
        ],
    )?;

    match choice {
        0 => {
            loading_notice();
            workflow.start_planning()?;
        }
        1 => {
            let name = prompt_text("Event name (e.g. Academic seminar)", &workflow.plan().event_name)?;
            workflow.update_plan(|plan| plan.event_name = name)?;
        }
        2 => {
            let start = prompt_date("Start date", workflow.plan().start_date)?;
            let end = prompt_date("End date", workflow.plan().end_date.max(start))?;
            workflow.update_plan(|plan| {
                plan.start_date = start;
                plan.end_date = end;
            })?;
        }
        3 => {
            let head_count = prompt_head_count("Expected head count", workflow.plan().head_count)?;
            workflow.update_plan(|plan| plan.head_count = head_count)?;
        }
        4 => {
            let meal_times = prompt_meal_times(&workflow.plan().meal_times)?;
            workflow.update_plan(|plan| plan.meal_times = meal_times)?;
        }
        _ => workflow.go_home(),
    }
    Ok(())
}

fn event_select<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    display_menu_options(workflow.menu_options(), workflow.selections());

    let choice = prompt_action(
        "Menu selection",
        &[
            "Choose menus",
            "Calculate ingredients for the selection",
            "Back to event settings",
            "Back to home",
        ],
    )?;

    match choice {
        0 => {
            let options = workflow.menu_options().clone();
            for (date, slots) in &options {
                for (meal_time, menus) in slots {
                    if menus.is_empty() {
                        continue;
                    }
                    let current = workflow.selections().selected(*date, *meal_time).map(str::to_string);
                    if let Some(menu) =
                        prompt_menu_for_slot(*date, *meal_time, menus, current.as_deref())?
                    {
                        workflow.toggle_selection(*date, *meal_time, &menu);
                    }
                }
            }
        }
        1 => {
            loading_notice();
            workflow.calculate_event()?;
        }
        2 => workflow.back(),
        _ => workflow.go_home(),
    }
    Ok(())
}

fn custom_edit<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    display_custom_entries(workflow.custom_entries());

    let choice = prompt_action(
        "Custom plan",
        &[
            "Calculate ingredients for all rows",
            "Add row",
            "Edit row",
            "Remove row",
            "Back to home",
        ],
    )?;

    match choice {
        0 => {
            loading_notice();
            workflow.calculate_custom()?;
        }
        1 => {
            let id = workflow.add_custom_row()?;
            edit_row(workflow, &id)?;
        }
        2 | 3 => {
            let Some(id) = pick_row(workflow)? else {
                return Ok(());
            };
            if choice == 2 {
                edit_row(workflow, &id)?;
            } else {
                workflow.remove_custom_row(&id)?;
            }
        }
        _ => workflow.go_home(),
    }
    Ok(())
}

fn pick_row<S: MenuService>(workflow: &Workflow<S>) -> Result<Option<String>> {
    let entries = workflow.custom_entries();
    if entries.is_empty() {
        println!("There are no rows.");
        return Ok(None);
    }

    let labels: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {} {} {}", i + 1, e.date, e.meal_time, e.menu_name))
        .collect();
    let mut items: Vec<&str> = labels.iter().map(String::as_str).collect();
    items.push("Cancel");

    let selection = prompt_action("Which row?", &items)?;
    Ok(entries.get(selection).map(|e| e.id.clone()))
}

fn edit_row<S: MenuService>(workflow: &mut Workflow<S>, id: &str) -> Result<()> {
    let Some(entry) = workflow.custom_entries().iter().find(|e| e.id == id).cloned() else {
        return Ok(());
    };

    let date = prompt_date("Date", entry.date)?;
    let meal_time = prompt_meal_time("Meal", entry.meal_time)?;
    let menu_name = prompt_text("Menu name (e.g. Beef bulgogi)", &entry.menu_name)?;
    let head_count = prompt_head_count("Head count", entry.head_count)?;

    workflow.update_custom_row(id, CustomField::Date(date))?;
    workflow.update_custom_row(id, CustomField::MealTime(meal_time))?;
    workflow.update_custom_row(id, CustomField::MenuName(menu_name))?;
    workflow.update_custom_row(id, CustomField::HeadCount(head_count))?;
    Ok(())
}

fn single_enter<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    let choice = prompt_action("Single menu lookup", &["Look up a menu", "Back to home"])?;
    if choice != 0 {
        workflow.go_home();
        return Ok(());
    }

    let menu = prompt_text("Menu name (e.g. Spicy pork stir-fry)", workflow.single_menu())?;
    let head_count = prompt_head_count("Head count", workflow.single_head_count())?;

    loading_notice();
    workflow.single_query(&menu, head_count)
}

fn archive_list<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    let reports = workflow.archive().list().to_vec();
    display_report_list(&reports);

    let labels: Vec<String> = reports
        .iter()
        .map(|r| format!("{} ({} menus)", r.title, r.meal_count()))
        .collect();
    let mut items: Vec<&str> = labels.iter().map(String::as_str).collect();
    items.push("Back to home");

    let selection = prompt_action("Saved reports", &items)?;
    let Some(report) = reports.get(selection) else {
        workflow.go_home();
        return Ok(());
    };

    match prompt_action(&report.title, &["Open", "Delete", "Cancel"])? {
        0 => workflow.view_report(&report.id)?,
        1 => {
            if confirm_delete(&report.title)? {
                workflow.delete_report(&report.id)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn report_screen<S: MenuService>(workflow: &mut Workflow<S>) -> Result<()> {
    let title = workflow.report_title();
    let summaries = workflow.summary();
    display_report(
        &title,
        workflow.results(),
        &summaries,
        workflow.fallback_head_count(),
    );

    let viewing_saved = match workflow.screen() {
        Screen::Archive(ArchiveStep::ViewReport(id)) => Some(id.clone()),
        _ => None,
    };
    let first = if viewing_saved.is_some() { "Delete report" } else { "Save report" };

    let choice = prompt_action(
        "Report",
        &[first, "Export CSV", "Export HTML", "Print", "Back", "Back to home"],
    )?;

    match choice {
        0 => match viewing_saved {
            Some(id) => {
                if confirm_delete(&title)? {
                    workflow.delete_report(&id)?;
                }
            }
            None => {
                if let Some(report) = workflow.save_report()? {
                    println!("Report saved as '{}'.", report.title);
                }
            }
        },
        1 => {
            let path = prompt_text("CSV file", &default_csv_name(today()))?;
            export_csv(PathBuf::from(&path), &summaries)?;
            println!("Wrote {}", path);
        }
        2 => {
            let path = prompt_text("HTML file", &default_html_name(today()))?;
            let markup =
                render_report_markup(workflow.results(), &summaries, workflow.fallback_head_count())?;
            export_html(PathBuf::from(&path), &title, &markup)?;
            println!("Wrote {}", path);
        }
        // printed again on the next pass
        3 => {}
        4 => workflow.back(),
        _ => workflow.go_home(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_keeps_session_alive_on_action_errors() {
        assert!(surface(Err(PlannerError::validation("Enter a whole number of people"))).is_ok());
        assert!(surface(Err(PlannerError::service("quota exceeded"))).is_ok());
        assert!(surface(Err(PlannerError::Interpretation)).is_ok());
        assert!(surface(Err(PlannerError::ReportNotFound("x".to_string()))).is_ok());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(surface(Err(PlannerError::Io(io))).is_ok());
    }

    #[test]
    fn test_surface_passes_terminal_failures_on() {
        let closed = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let err = surface(Err(PlannerError::Prompt(dialoguer::Error::IO(closed))));
        assert!(matches!(err, Err(PlannerError::Prompt(_))));
    }
}
