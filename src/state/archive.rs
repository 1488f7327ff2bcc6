use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{RecipeDetail, SavedReport};
use crate::state::Store;

/// Minimum title similarity for a fuzzy report lookup.
const TITLE_MATCH_THRESHOLD: f64 = 0.7;

/// Saved report snapshots, most recent first.
///
/// Every change is written through to the store as a whole list.
pub struct ReportArchive {
    store: Store,
    reports: Vec<SavedReport>,
}

impl ReportArchive {
    /// Load the archive from the store.
    pub fn open(store: Store) -> Result<Self> {
        let reports = store.load_reports()?;
        tracing::debug!(count = reports.len(), "report archive loaded");
        Ok(Self { store, reports })
    }

    /// Snapshot `data` under `title` and put it at the front of the archive.
    pub fn save(&mut self, title: &str, data: &[RecipeDetail]) -> Result<&SavedReport> {
        let report = SavedReport::new(title, data);
        tracing::info!(id = %report.id, %title, meals = data.len(), "saving report");

        self.reports.insert(0, report);
        if let Err(e) = self.store.save_reports(&self.reports) {
            self.reports.remove(0);
            return Err(e);
        }
        Ok(&self.reports[0])
    }

    /// Remove a report. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.reports.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let removed = self.reports.remove(pos);
        if let Err(e) = self.store.save_reports(&self.reports) {
            self.reports.insert(pos, removed);
            return Err(e);
        }
        tracing::info!(%id, "report deleted");
        Ok(true)
    }

    /// A copy of a saved report's meals.
    pub fn load(&self, id: &str) -> Option<Vec<RecipeDetail>> {
        self.get(id).map(|r| r.data.clone())
    }

    pub fn get(&self, id: &str) -> Option<&SavedReport> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Look a report up by id, exact title, or closest title.
    pub fn find(&self, query: &str) -> Option<&SavedReport> {
        let query = query.trim();
        if let Some(report) = self.get(query) {
            return Some(report);
        }

        let lowered = query.to_lowercase();
        if let Some(report) = self
            .reports
            .iter()
            .find(|r| r.title.to_lowercase() == lowered)
        {
            return Some(report);
        }

        self.reports
            .iter()
            .map(|r| (r, jaro_winkler(&r.title.to_lowercase(), &lowered)))
            .filter(|(_, score)| *score > TITLE_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(r, _)| r)
    }

    pub fn list(&self) -> &[SavedReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealTime};
    use tempfile::TempDir;

    fn sample_data(menu: &str) -> Vec<RecipeDetail> {
        vec![RecipeDetail {
            date: "2024-08-15".parse().unwrap(),
            meal_time: MealTime::Lunch,
            menu_name: menu.to_string(),
            head_count: Some(60),
            ingredients: vec![Ingredient::new("rice", "6", "kg")],
            steps: vec!["Wash rice".to_string()],
            recipe_link: String::new(),
        }]
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut archive = ReportArchive::open(Store::open(dir.path())).unwrap();

        let data = sample_data("Bibimbap");
        let id = archive.save("Seminar", &data).unwrap().id.clone();

        assert_eq!(archive.load(&id), Some(data));
    }

    #[test]
    fn test_newest_first_and_persisted() {
        let dir = TempDir::new().unwrap();
        let mut archive = ReportArchive::open(Store::open(dir.path())).unwrap();

        archive.save("First", &sample_data("A")).unwrap();
        archive.save("Second", &sample_data("B")).unwrap();

        let titles: Vec<&str> = archive.list().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);

        let reopened = ReportArchive::open(Store::open(dir.path())).unwrap();
        assert_eq!(reopened.list(), archive.list());
    }

    #[test]
    fn test_delete_removes_from_listing() {
        let dir = TempDir::new().unwrap();
        let mut archive = ReportArchive::open(Store::open(dir.path())).unwrap();

        let keep = archive.save("Keep", &sample_data("A")).unwrap().id.clone();
        let drop = archive.save("Drop", &sample_data("B")).unwrap().id.clone();

        assert!(archive.delete(&drop).unwrap());
        assert!(!archive.delete(&drop).unwrap());
        assert!(archive.get(&drop).is_none());
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.list()[0].id, keep);

        let reopened = ReportArchive::open(Store::open(dir.path())).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_saved_data_is_a_copy() {
        let dir = TempDir::new().unwrap();
        let mut archive = ReportArchive::open(Store::open(dir.path())).unwrap();

        let mut live = sample_data("Bibimbap");
        let id = archive.save("Snapshot", &live).unwrap().id.clone();
        live[0].ingredients.push(Ingredient::new("egg", "60", "ea"));
        live[0].menu_name = "Changed".to_string();

        let saved = archive.load(&id).unwrap();
        assert_eq!(saved[0].menu_name, "Bibimbap");
        assert_eq!(saved[0].ingredients.len(), 1);
    }

    #[test]
    fn test_find_by_id_title_and_fuzzy() {
        let dir = TempDir::new().unwrap();
        let mut archive = ReportArchive::open(Store::open(dir.path())).unwrap();

        let id = archive
            .save("Autumn Symposium (2024-10-01)", &sample_data("A"))
            .unwrap()
            .id
            .clone();
        archive.save("Custom plan report", &sample_data("B")).unwrap();

        assert_eq!(archive.find(&id).unwrap().id, id);
        assert_eq!(
            archive.find("custom plan report").unwrap().title,
            "Custom plan report"
        );
        assert_eq!(archive.find("Autumn Symposium").unwrap().id, id);
        assert!(archive.find("zzzz").is_none());
    }
}
