use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::plan::default_custom_entries;
use crate::models::{CustomMealEntry, MenuOptions, PlanConfiguration, SavedReport};
use crate::state::persistence::{load_document, save_document};

const PLAN_FILE: &str = "plan.json";
const CUSTOM_ENTRIES_FILE: &str = "custom_entries.json";
const MENU_OPTIONS_FILE: &str = "menu_options.json";
const REPORTS_FILE: &str = "reports.json";

/// The four independently persisted documents, kept in one directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_plan(&self) -> Result<PlanConfiguration> {
        load_document(self.dir.join(PLAN_FILE))
    }

    pub fn save_plan(&self, plan: &PlanConfiguration) -> Result<()> {
        save_document(self.dir.join(PLAN_FILE), plan)
    }

    /// Saved custom rows; a fresh store starts with one empty row.
    pub fn load_custom_entries(&self) -> Result<Vec<CustomMealEntry>> {
        let path = self.dir.join(CUSTOM_ENTRIES_FILE);
        if !path.exists() {
            return Ok(default_custom_entries());
        }
        load_document(path)
    }

    pub fn save_custom_entries(&self, entries: &[CustomMealEntry]) -> Result<()> {
        save_document(self.dir.join(CUSTOM_ENTRIES_FILE), entries)
    }

    pub fn load_menu_options(&self) -> Result<MenuOptions> {
        load_document(self.dir.join(MENU_OPTIONS_FILE))
    }

    pub fn save_menu_options(&self, options: &MenuOptions) -> Result<()> {
        save_document(self.dir.join(MENU_OPTIONS_FILE), options)
    }

    pub fn load_reports(&self) -> Result<Vec<SavedReport>> {
        load_document(self.dir.join(REPORTS_FILE))
    }

    pub fn save_reports(&self, reports: &[SavedReport]) -> Result<()> {
        save_document(self.dir.join(REPORTS_FILE), reports)
    }
}
