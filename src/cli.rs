use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{
    DEFAULT_DATA_DIR, DEFAULT_ENDPOINT, DEFAULT_MENU_MODEL, DEFAULT_RECIPE_MODEL, ServiceConfig,
};

/// Catering planner: menu recommendations and combined ingredient orders for bulk kitchens.
#[derive(Parser, Debug)]
#[command(name = "catering_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the plan, custom rows, menu options and saved reports.
    #[arg(short, long, env = "CATERING_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// API key for the generative model service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the model service.
    #[arg(long, default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Model used for menu recommendations.
    #[arg(long, default_value = DEFAULT_MENU_MODEL, global = true)]
    pub menu_model: String,

    /// Model used for ingredient and recipe calculation.
    #[arg(long, default_value = DEFAULT_RECIPE_MODEL, global = true)]
    pub recipe_model: String,

    /// Give up on a service call after this many seconds (waits indefinitely if unset).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            menu_model: self.menu_model.clone(),
            recipe_model: self.recipe_model.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Plan interactively: event menus, custom plans, lookups and saved reports.
    #[default]
    Interactive,

    /// Calculate ingredients and steps for a single menu.
    Query {
        /// Menu name, e.g. "Spicy pork stir-fry".
        #[arg(short, long)]
        menu: String,

        /// Number of people to cook for.
        #[arg(short = 'n', long, default_value_t = crate::models::plan::DEFAULT_HEAD_COUNT)]
        head_count: u32,

        /// Save the result to the report archive.
        #[arg(long)]
        save: bool,

        /// Write the combined order list as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the report as a standalone HTML file.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Manage saved reports.
    Reports {
        #[command(subcommand)]
        action: ReportsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List saved reports, newest first.
    List,

    /// Print a saved report.
    Show {
        /// Report id or title.
        report: String,
    },

    /// Delete a saved report.
    Delete {
        /// Report id or title.
        report: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a saved report.
    Export {
        /// Report id or title.
        report: String,

        /// Write the combined order list as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the report as a standalone HTML file.
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["catering_planner"]).unwrap();
        assert!(matches!(cli.command.unwrap_or_default(), Command::Interactive));
    }

    #[test]
    fn test_query_arguments() {
        let cli = Cli::try_parse_from([
            "catering_planner",
            "query",
            "--menu",
            "Bibimbap",
            "-n",
            "120",
            "--csv",
            "out.csv",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Query {
                menu,
                head_count,
                save,
                csv,
                html,
            }) => {
                assert_eq!(menu, "Bibimbap");
                assert_eq!(head_count, 120);
                assert!(!save);
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(html.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_timeout_maps_to_service_config() {
        let cli = Cli::try_parse_from(["catering_planner", "--timeout-secs", "90", "reports", "list"])
            .unwrap();
        let config = cli.service_config();
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.menu_model, DEFAULT_MENU_MODEL);
    }
}
