//! The planning session: which screen the user is on and what each
//! transition does to the persisted documents.
//!
//! ```text
//! Home ─┬─ EventPlan:   Configure ─fetch menus─▶ SelectMenus ─fetch recipes─▶ Report
//!       ├─ CustomPlan:  EditRows ─fetch recipes─▶ Report
//!       ├─ SingleQuery: Enter ─fetch recipe─▶ Report
//!       └─ Archive:     List ─▶ ViewReport(id)
//! ```
//!
//! A failed fetch leaves the screen where it was and hands the error back
//! to the caller.

use chrono::NaiveDate;

use crate::error::{PlannerError, Result};
use crate::models::{
    CustomField, CustomMealEntry, MealTime, MenuOptions, PlanConfiguration, RecipeDetail,
    RecipeRequest, SavedReport, today,
};
use crate::planner::aggregation::{IngredientSummary, aggregate};
use crate::planner::selection::SelectionTracker;
use crate::service::MenuService;
use crate::state::{ReportArchive, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    EventPlan,
    CustomPlan,
    SingleQuery,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    EventPlan(EventStep),
    CustomPlan(CustomStep),
    SingleQuery(QueryStep),
    Archive(ArchiveStep),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStep {
    Configure,
    SelectMenus,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomStep {
    EditRows,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStep {
    Enter,
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveStep {
    List,
    /// Read-only view of the saved report with this id.
    ViewReport(String),
}

/// Drives one planning session against a [`MenuService`].
pub struct Workflow<S: MenuService> {
    service: S,
    store: Store,
    archive: ReportArchive,
    plan: PlanConfiguration,
    custom_entries: Vec<CustomMealEntry>,
    menu_options: MenuOptions,
    selections: SelectionTracker,
    single_menu: String,
    single_head_count: u32,
    results: Vec<RecipeDetail>,
    screen: Screen,
}

impl<S: MenuService> Workflow<S> {
    /// Restore the persisted documents and start on the home screen.
    pub fn open(store: Store, service: S) -> Result<Self> {
        let plan = store.load_plan()?;
        let custom_entries = store.load_custom_entries()?;
        let menu_options = store.load_menu_options()?;
        let archive = ReportArchive::open(store.clone())?;
        let single_head_count = plan.head_count;

        Ok(Self {
            service,
            store,
            archive,
            plan,
            custom_entries,
            menu_options,
            selections: SelectionTracker::new(),
            single_menu: String::new(),
            single_head_count,
            results: Vec::new(),
            screen: Screen::Home,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn plan(&self) -> &PlanConfiguration {
        &self.plan
    }

    pub fn custom_entries(&self) -> &[CustomMealEntry] {
        &self.custom_entries
    }

    pub fn menu_options(&self) -> &MenuOptions {
        &self.menu_options
    }

    pub fn selections(&self) -> &SelectionTracker {
        &self.selections
    }

    pub fn archive(&self) -> &ReportArchive {
        &self.archive
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn single_menu(&self) -> &str {
        &self.single_menu
    }

    pub fn single_head_count(&self) -> u32 {
        self.single_head_count
    }

    /// The meals currently on display.
    pub fn results(&self) -> &[RecipeDetail] {
        &self.results
    }

    /// Aggregated order list for the meals on display.
    pub fn summary(&self) -> Vec<IngredientSummary> {
        aggregate(&self.results)
    }

    /// Head count shown for meals that did not report their own.
    pub fn fallback_head_count(&self) -> u32 {
        self.plan.head_count
    }

    // ── navigation ──────────────────────────────────────────────────────

    /// Open the first step of a mode.
    pub fn enter(&mut self, mode: Mode) {
        self.screen = match mode {
            Mode::EventPlan => Screen::EventPlan(EventStep::Configure),
            Mode::CustomPlan => Screen::CustomPlan(CustomStep::EditRows),
            Mode::SingleQuery => Screen::SingleQuery(QueryStep::Enter),
            Mode::Archive => Screen::Archive(ArchiveStep::List),
        };
        tracing::debug!(screen = ?self.screen, "entered mode");
    }

    /// Return to the dashboard, discarding the displayed result.
    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.results.clear();
    }

    /// One step back: a saved report returns to the archive list, menu
    /// selection returns to configuration, everything else goes home.
    pub fn back(&mut self) {
        match self.screen {
            Screen::Archive(ArchiveStep::ViewReport(_)) => {
                self.results.clear();
                self.screen = Screen::Archive(ArchiveStep::List);
            }
            Screen::EventPlan(EventStep::SelectMenus) => {
                self.screen = Screen::EventPlan(EventStep::Configure);
            }
            _ => self.go_home(),
        }
    }

    // ── event plan ──────────────────────────────────────────────────────

    /// Edit the plan configuration and persist it. A failed write leaves
    /// the plan as it was.
    pub fn update_plan(&mut self, edit: impl FnOnce(&mut PlanConfiguration)) -> Result<()> {
        let mut plan = self.plan.clone();
        edit(&mut plan);
        self.store.save_plan(&plan)?;
        self.plan = plan;
        Ok(())
    }

    pub fn toggle_plan_meal_time(&mut self, meal_time: MealTime) -> Result<()> {
        self.update_plan(|plan| plan.toggle_meal_time(meal_time))
    }

    /// Fetch menu options for the configured event and move on to selection.
    pub fn start_planning(&mut self) -> Result<()> {
        self.require(Screen::EventPlan(EventStep::Configure))?;

        if self.plan.event_name.trim().is_empty() {
            return Err(PlannerError::validation("Please enter the event name."));
        }
        if self.plan.start_date > self.plan.end_date {
            return Err(PlannerError::validation(
                "The start date must not be after the end date.",
            ));
        }
        if self.plan.meal_times.is_empty() {
            return Err(PlannerError::validation("Please choose at least one meal time."));
        }

        let options = {
            let _span = tracing::info_span!("menu_recommendation", event = %self.plan.event_name)
                .entered();
            self.service.generate_menu_options(&self.plan)?
        };
        tracing::info!(dates = options.len(), "menu options received");

        self.store.save_menu_options(&options)?;
        self.menu_options = options;
        self.selections.clear();
        self.screen = Screen::EventPlan(EventStep::SelectMenus);
        Ok(())
    }

    /// Pick `menu_name` for a slot, replacing any earlier pick.
    pub fn toggle_selection(&mut self, date: NaiveDate, meal_time: MealTime, menu_name: &str) {
        self.selections.toggle(date, meal_time, menu_name);
    }

    /// Calculate ingredients for every selected menu at the plan head count.
    pub fn calculate_event(&mut self) -> Result<()> {
        self.require(Screen::EventPlan(EventStep::SelectMenus))?;

        if self.selections.is_empty() {
            return Err(PlannerError::validation("Please choose a menu."));
        }

        let requests: Vec<RecipeRequest> = self
            .selections
            .iter()
            .map(|s| RecipeRequest::slotted(s.date, s.meal_time, &s.menu_name, self.plan.head_count))
            .collect();

        self.results = self.fetch_recipes(&requests)?;
        self.screen = Screen::EventPlan(EventStep::Report);
        Ok(())
    }

    // ── custom plan ─────────────────────────────────────────────────────

    /// Append a blank row continuing from the last one. Returns its id.
    pub fn add_custom_row(&mut self) -> Result<String> {
        let entry = CustomMealEntry::following(self.custom_entries.last());
        let id = entry.id.clone();
        let mut entries = self.custom_entries.clone();
        entries.push(entry);
        self.commit_custom_entries(entries)?;
        Ok(id)
    }

    /// Change one field of a row. Returns whether the row exists.
    pub fn update_custom_row(&mut self, id: &str, field: CustomField) -> Result<bool> {
        let mut entries = self.custom_entries.clone();
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.apply(field);
        self.commit_custom_entries(entries)?;
        Ok(true)
    }

    pub fn remove_custom_row(&mut self, id: &str) -> Result<bool> {
        let mut entries = self.custom_entries.clone();
        entries.retain(|e| e.id != id);
        if entries.len() == self.custom_entries.len() {
            return Ok(false);
        }
        self.commit_custom_entries(entries)?;
        Ok(true)
    }

    /// Persist `entries`, then make them current.
    fn commit_custom_entries(&mut self, entries: Vec<CustomMealEntry>) -> Result<()> {
        self.store.save_custom_entries(&entries)?;
        self.custom_entries = entries;
        Ok(())
    }

    /// Calculate every row that names a menu; the result is ordered by date.
    pub fn calculate_custom(&mut self) -> Result<()> {
        self.require(Screen::CustomPlan(CustomStep::EditRows))?;

        let requests: Vec<RecipeRequest> = self
            .custom_entries
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| RecipeRequest::slotted(e.date, e.meal_time, e.menu_name.trim(), e.head_count))
            .collect();
        if requests.is_empty() {
            return Err(PlannerError::validation("Please enter a menu name."));
        }

        let mut results = self.fetch_recipes(&requests)?;
        results.sort_by_key(|r| r.date);
        self.results = results;
        self.screen = Screen::CustomPlan(CustomStep::Report);
        Ok(())
    }

    // ── single query ────────────────────────────────────────────────────

    /// Look up one menu for `head_count` people.
    pub fn single_query(&mut self, menu_name: &str, head_count: u32) -> Result<()> {
        self.require(Screen::SingleQuery(QueryStep::Enter))?;

        let menu_name = menu_name.trim();
        if menu_name.is_empty() {
            return Err(PlannerError::validation("Please enter a menu name."));
        }
        self.single_menu = menu_name.to_string();
        self.single_head_count = head_count;

        self.results = self.fetch_recipes(&[RecipeRequest::unslotted(menu_name, head_count)])?;
        self.screen = Screen::SingleQuery(QueryStep::Report);
        Ok(())
    }

    // ── archive ─────────────────────────────────────────────────────────

    /// Snapshot the displayed result into the archive.
    ///
    /// Does nothing when there is no result or when the result is itself a
    /// saved report.
    pub fn save_report(&mut self) -> Result<Option<SavedReport>> {
        if self.results.is_empty() || matches!(self.screen, Screen::Archive(_)) {
            return Ok(None);
        }

        let title = format!("{} ({})", self.base_title(), today());
        let report = self.archive.save(&title, &self.results)?;
        Ok(Some(report.clone()))
    }

    /// Show a saved report.
    pub fn view_report(&mut self, id: &str) -> Result<()> {
        let data = self
            .archive
            .load(id)
            .ok_or_else(|| PlannerError::ReportNotFound(id.to_string()))?;
        self.results = data;
        self.screen = Screen::Archive(ArchiveStep::ViewReport(id.to_string()));
        Ok(())
    }

    /// Delete a saved report. Deleting the report on display goes home.
    ///
    /// Callers confirm with the user first.
    pub fn delete_report(&mut self, id: &str) -> Result<bool> {
        let removed = self.archive.delete(id)?;
        if removed && self.screen == Screen::Archive(ArchiveStep::ViewReport(id.to_string())) {
            self.go_home();
        }
        Ok(removed)
    }

    /// Title for the displayed result, used by the exporters.
    pub fn report_title(&self) -> String {
        match &self.screen {
            Screen::Archive(ArchiveStep::ViewReport(id)) => self
                .archive
                .get(id)
                .map(|r| r.title.clone())
                .unwrap_or_else(|| self.base_title()),
            _ => self.base_title(),
        }
    }

    fn base_title(&self) -> String {
        match self.screen {
            Screen::EventPlan(_) if !self.plan.event_name.trim().is_empty() => {
                self.plan.event_name.trim().to_string()
            }
            Screen::EventPlan(_) => "Event menu report".to_string(),
            Screen::SingleQuery(_) if !self.single_menu.is_empty() => self.single_menu.clone(),
            Screen::SingleQuery(_) => "Menu query report".to_string(),
            Screen::CustomPlan(_) => "Custom plan report".to_string(),
            _ => "Calculation report".to_string(),
        }
    }

    fn fetch_recipes(&self, requests: &[RecipeRequest]) -> Result<Vec<RecipeDetail>> {
        let _span = tracing::info_span!("ingredient_calculation", items = requests.len()).entered();
        let details = self.service.calculate_recipes(requests)?;
        tracing::info!(meals = details.len(), "recipes received");
        Ok(details)
    }

    fn require(&self, expected: Screen) -> Result<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(PlannerError::validation(format!(
                "That action is not available from {:?}.",
                self.screen
            )))
        }
    }
}
