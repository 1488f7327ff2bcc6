use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{PlannerError, Result};
use crate::models::{
    Ingredient, MealTime, MenuOption, MenuOptions, PlanConfiguration, RecipeDetail,
    RecipeRequest, today,
};
use crate::service::MenuService;
use crate::service::response::parse_recipe_details;

/// Options offered per meal slot.
const OPTIONS_PER_SLOT: usize = 3;

/// Deterministic in-process [`MenuService`].
///
/// Menus are named `"<meal time> menu <n>"`. Recipes come from
/// [`StubService::with_recipe`] when registered, otherwise a rice dish
/// scaled at 100 g per person.
#[derive(Debug, Default)]
pub struct StubService {
    recipes: HashMap<String, Vec<Ingredient>>,
    failure: Option<String>,
    recipe_failure: Option<String>,
    recipe_answer: Option<String>,
    menu_calls: Cell<usize>,
    recipe_calls: RefCell<Vec<Vec<RecipeRequest>>>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Menus are recommended as usual but every recipe call fails.
    pub fn failing_recipes(message: &str) -> Self {
        Self {
            recipe_failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Answer recipe calls with this raw model text, read the same way as
    /// a hosted model's reply.
    pub fn with_recipe_answer(mut self, text: &str) -> Self {
        self.recipe_answer = Some(text.to_string());
        self
    }

    /// Answer `menu_name` with exactly these ingredients.
    pub fn with_recipe(mut self, menu_name: &str, ingredients: Vec<Ingredient>) -> Self {
        self.recipes.insert(menu_name.to_string(), ingredients);
        self
    }

    pub fn menu_calls(&self) -> usize {
        self.menu_calls.get()
    }

    /// Every batch passed to `calculate_recipes`, in call order.
    pub fn recipe_calls(&self) -> Vec<Vec<RecipeRequest>> {
        self.recipe_calls.borrow().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(PlannerError::service(message.clone())),
            None => Ok(()),
        }
    }
}

impl MenuService for StubService {
    fn generate_menu_options(&self, plan: &PlanConfiguration) -> Result<MenuOptions> {
        self.menu_calls.set(self.menu_calls.get() + 1);
        self.check_failure()?;

        let mut options = MenuOptions::new();
        for date in plan.dates() {
            let slots = options.entry(date).or_default();
            for meal_time in &plan.meal_times {
                let menus = (1..=OPTIONS_PER_SLOT)
                    .map(|n| MenuOption {
                        menu_name: format!("{} menu {}", meal_time, n),
                        description: format!("Option {} for {}", n, plan.event_name),
                        category: "Korean".to_string(),
                    })
                    .collect();
                slots.insert(*meal_time, menus);
            }
        }
        Ok(options)
    }

    fn calculate_recipes(&self, requests: &[RecipeRequest]) -> Result<Vec<RecipeDetail>> {
        self.recipe_calls.borrow_mut().push(requests.to_vec());
        self.check_failure()?;
        if let Some(message) = &self.recipe_failure {
            return Err(PlannerError::service(message.clone()));
        }
        if let Some(text) = &self.recipe_answer {
            return parse_recipe_details(text, today());
        }

        Ok(requests
            .iter()
            .map(|request| {
                let ingredients = self
                    .recipes
                    .get(&request.menu_name)
                    .cloned()
                    .unwrap_or_else(|| {
                        let grams = request.head_count.saturating_mul(100).to_string();
                        vec![
                            Ingredient::new("rice", &grams, "g"),
                            Ingredient::new("salt", "to taste", ""),
                        ]
                    });

                RecipeDetail {
                    date: request.date.unwrap_or_else(today),
                    meal_time: request.meal_time.unwrap_or(MealTime::Lunch),
                    menu_name: request.menu_name.clone(),
                    head_count: Some(request.head_count),
                    ingredients,
                    steps: vec![
                        format!("Prepare {} for {} servings", request.menu_name, request.head_count),
                        "Cook in batches and hold warm".to_string(),
                    ],
                    recipe_link: String::new(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recipe_scales_with_head_count() {
        let details = StubService::new()
            .calculate_recipes(&[RecipeRequest::unslotted("Bibimbap", 30)])
            .unwrap();
        assert_eq!(details[0].ingredients[0].amount, "3000");
    }

    #[test]
    fn test_huge_head_count_saturates() {
        let details = StubService::new()
            .calculate_recipes(&[RecipeRequest::unslotted("Bibimbap", u32::MAX / 10)])
            .unwrap();
        assert_eq!(details[0].ingredients[0].amount, u32::MAX.to_string());
    }

    #[test]
    fn test_recipe_failure_spares_menus() {
        let service = StubService::failing_recipes("quota exceeded");
        assert!(service.generate_menu_options(&PlanConfiguration::default()).is_ok());
        let err = service
            .calculate_recipes(&[RecipeRequest::unslotted("Bibimbap", 10)])
            .unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
