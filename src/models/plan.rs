use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::new_id;
use crate::models::today;

/// Head count used when nothing else has been entered.
pub const DEFAULT_HEAD_COUNT: u32 = 50;

/// A meal slot within a day.
///
/// Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealTime {
    #[serde(alias = "breakfast", alias = "Morning", alias = "Breakfast", alias = "아침")]
    Morning,

    #[serde(alias = "Lunch", alias = "점심")]
    Lunch,

    #[serde(alias = "Dinner", alias = "supper", alias = "저녁")]
    Dinner,

    #[serde(
        alias = "late night",
        alias = "Late-night",
        alias = "Late night",
        alias = "midnight snack",
        alias = "야식"
    )]
    LateNight,
}

impl MealTime {
    pub const ALL: [MealTime; 4] = [
        MealTime::Morning,
        MealTime::Lunch,
        MealTime::Dinner,
        MealTime::LateNight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealTime::Morning => "morning",
            MealTime::Lunch => "lunch",
            MealTime::Dinner => "dinner",
            MealTime::LateNight => "late-night",
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event-level settings for the menu recommendation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConfiguration {
    pub event_name: String,
    pub head_count: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub meal_times: BTreeSet<MealTime>,
}

impl Default for PlanConfiguration {
    fn default() -> Self {
        let today = today();
        Self {
            event_name: String::new(),
            head_count: DEFAULT_HEAD_COUNT,
            start_date: today,
            end_date: today,
            meal_times: [MealTime::Lunch, MealTime::Dinner].into_iter().collect(),
        }
    }
}

impl PlanConfiguration {
    /// Add the meal time if absent, remove it if present.
    pub fn toggle_meal_time(&mut self, meal_time: MealTime) {
        if !self.meal_times.remove(&meal_time) {
            self.meal_times.insert(meal_time);
        }
    }

    /// Every date from start to end, inclusive. Empty when the range is inverted.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .collect()
    }
}

/// One row of the manually entered plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMealEntry {
    pub id: String,
    pub date: NaiveDate,
    pub meal_time: MealTime,
    pub head_count: u32,
    pub menu_name: String,
}

impl CustomMealEntry {
    /// A blank row that continues after `previous` (same date and head count).
    pub fn following(previous: Option<&CustomMealEntry>) -> Self {
        let (date, head_count) = previous
            .map(|p| (p.date, p.head_count))
            .unwrap_or_else(|| (today(), DEFAULT_HEAD_COUNT));
        Self {
            id: new_id(),
            date,
            meal_time: MealTime::Lunch,
            head_count,
            menu_name: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.menu_name.trim().is_empty()
    }

    pub fn apply(&mut self, field: CustomField) {
        match field {
            CustomField::Date(date) => self.date = date,
            CustomField::MealTime(meal_time) => self.meal_time = meal_time,
            CustomField::HeadCount(head_count) => self.head_count = head_count,
            CustomField::MenuName(menu_name) => self.menu_name = menu_name,
        }
    }
}

/// Starting contents of the custom plan: a single empty lunch row.
pub fn default_custom_entries() -> Vec<CustomMealEntry> {
    vec![CustomMealEntry {
        id: "1".to_string(),
        date: today(),
        meal_time: MealTime::Lunch,
        head_count: DEFAULT_HEAD_COUNT,
        menu_name: String::new(),
    }]
}

/// A single edit to a custom row.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomField {
    Date(NaiveDate),
    MealTime(MealTime),
    HeadCount(u32),
    MenuName(String),
}
