use std::path::Path;

use clap::Parser;

use catering_planner_rs::cli::{Cli, Command, ReportsCommand};
use catering_planner_rs::error::{PlannerError, Result};
use catering_planner_rs::export::{export_csv, export_html, render_report_markup};
use catering_planner_rs::interface::{
    confirm_delete, display_report, display_report_list, run_interactive,
};
use catering_planner_rs::planner::{Mode, Workflow};
use catering_planner_rs::service::{GeminiService, MenuService};
use catering_planner_rs::state::Store;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store = Store::open(&cli.data_dir);
    let service = GeminiService::new(cli.service_config())?;
    let mut workflow = Workflow::open(store, service)?;

    tracing::debug!(data_dir = %cli.data_dir.display(), "session opened");

    match cli.command.unwrap_or_default() {
        Command::Interactive => run_interactive(&mut workflow),
        Command::Query {
            menu,
            head_count,
            save,
            csv,
            html,
        } => cmd_query(&mut workflow, &menu, head_count, save, csv.as_deref(), html.as_deref()),
        Command::Reports { action } => cmd_reports(&mut workflow, action),
    }
}

/// Look up one menu, print it, and optionally save and export it.
fn cmd_query<S: MenuService>(
    workflow: &mut Workflow<S>,
    menu: &str,
    head_count: u32,
    save: bool,
    csv: Option<&Path>,
    html: Option<&Path>,
) -> Result<()> {
    workflow.enter(Mode::SingleQuery);
    println!("Calculating ingredients for '{}' ({} people)...", menu, head_count);
    workflow.single_query(menu, head_count)?;

    print_current(workflow);

    if save {
        if let Some(report) = workflow.save_report()? {
            println!("Report saved as '{}' (id {}).", report.title, report.id);
        }
    }
    export_current(workflow, csv, html)
}

fn cmd_reports<S: MenuService>(workflow: &mut Workflow<S>, action: ReportsCommand) -> Result<()> {
    match action {
        ReportsCommand::List => display_report_list(workflow.archive().list()),
        ReportsCommand::Show { report } => {
            open_saved(workflow, &report)?;
            print_current(workflow);
        }
        ReportsCommand::Delete { report, yes } => {
            let (id, title) = open_saved(workflow, &report)?;
            if yes || confirm_delete(&title)? {
                workflow.delete_report(&id)?;
                println!("Deleted '{}'.", title);
            } else {
                println!("Kept '{}'.", title);
            }
        }
        ReportsCommand::Export { report, csv, html } => {
            if csv.is_none() && html.is_none() {
                return Err(PlannerError::validation("Pass --csv and/or --html."));
            }
            open_saved(workflow, &report)?;
            export_current(workflow, csv.as_deref(), html.as_deref())?;
        }
    }
    Ok(())
}

/// Resolve a report by id or title and put it on display.
fn open_saved<S: MenuService>(workflow: &mut Workflow<S>, query: &str) -> Result<(String, String)> {
    let (id, title) = workflow
        .archive()
        .find(query)
        .map(|r| (r.id.clone(), r.title.clone()))
        .ok_or_else(|| PlannerError::ReportNotFound(query.to_string()))?;

    workflow.enter(Mode::Archive);
    workflow.view_report(&id)?;
    Ok((id, title))
}

fn print_current<S: MenuService>(workflow: &Workflow<S>) {
    display_report(
        &workflow.report_title(),
        workflow.results(),
        &workflow.summary(),
        workflow.fallback_head_count(),
    );
}

fn export_current<S: MenuService>(
    workflow: &Workflow<S>,
    csv: Option<&Path>,
    html: Option<&Path>,
) -> Result<()> {
    let summaries = workflow.summary();

    if let Some(path) = csv {
        export_csv(path, &summaries)?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = html {
        let markup =
            render_report_markup(workflow.results(), &summaries, workflow.fallback_head_count())?;
        export_html(path, &workflow.report_title(), &markup)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
