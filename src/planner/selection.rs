use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MealTime;

/// The menu picked for one meal slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub menu_name: String,
}

/// Chosen menus, at most one per (date, meal time).
///
/// Picking a menu for a slot that already has one replaces it in place, so
/// the order of first selection is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selections: Vec<Selection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection for a slot, replacing any earlier pick.
    pub fn toggle(&mut self, date: NaiveDate, meal_time: MealTime, menu_name: &str) {
        let selection = Selection {
            date,
            meal_time,
            menu_name: menu_name.to_string(),
        };

        match self
            .selections
            .iter_mut()
            .find(|s| s.date == date && s.meal_time == meal_time)
        {
            Some(existing) => *existing = selection,
            None => self.selections.push(selection),
        }
    }

    /// Menu currently selected for a slot.
    pub fn selected(&self, date: NaiveDate, meal_time: MealTime) -> Option<&str> {
        self.selections
            .iter()
            .find(|s| s.date == date && s.meal_time == meal_time)
            .map(|s| s.menu_name.as_str())
    }

    pub fn is_selected(&self, date: NaiveDate, meal_time: MealTime, menu_name: &str) -> bool {
        self.selected(date, meal_time) == Some(menu_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.selections.iter()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_toggle_replaces_same_slot() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(date("2024-07-01"), MealTime::Lunch, "Bibimbap");
        tracker.toggle(date("2024-07-01"), MealTime::Lunch, "Bulgogi");

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.selected(date("2024-07-01"), MealTime::Lunch), Some("Bulgogi"));
        assert!(!tracker.is_selected(date("2024-07-01"), MealTime::Lunch, "Bibimbap"));
    }

    #[test]
    fn test_replacement_keeps_position() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(date("2024-07-01"), MealTime::Lunch, "A");
        tracker.toggle(date("2024-07-01"), MealTime::Dinner, "B");
        tracker.toggle(date("2024-07-02"), MealTime::Lunch, "C");
        tracker.toggle(date("2024-07-01"), MealTime::Lunch, "D");

        let menus: Vec<&str> = tracker.iter().map(|s| s.menu_name.as_str()).collect();
        assert_eq!(menus, vec!["D", "B", "C"]);
    }

    #[test]
    fn test_distinct_slots_append() {
        let mut tracker = SelectionTracker::new();
        tracker.toggle(date("2024-07-01"), MealTime::Lunch, "A");
        tracker.toggle(date("2024-07-02"), MealTime::Lunch, "A");
        tracker.toggle(date("2024-07-01"), MealTime::Dinner, "A");
        assert_eq!(tracker.len(), 3);
    }
}
