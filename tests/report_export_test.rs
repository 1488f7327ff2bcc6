use catering_planner_rs::export::{csv_string, render_document, render_report_markup};
use catering_planner_rs::models::{Ingredient, MealTime, RecipeDetail};
use catering_planner_rs::planner::aggregate;

fn meal(menu: &str, date: &str, meal_time: MealTime, ingredients: Vec<Ingredient>) -> RecipeDetail {
    RecipeDetail {
        date: date.parse().unwrap(),
        meal_time,
        menu_name: menu.to_string(),
        head_count: Some(150),
        ingredients,
        steps: vec!["Prep".to_string(), "Cook".to_string()],
        recipe_link: String::new(),
    }
}

fn three_day_event() -> Vec<RecipeDetail> {
    vec![
        meal(
            "Bibimbap",
            "2024-10-01",
            MealTime::Lunch,
            vec![
                Ingredient::new("rice", "15", "kg"),
                Ingredient::new("sesame oil", "적당량", ""),
                Ingredient::new("beef", "4.5", "kg"),
            ],
        ),
        meal(
            "Bulgogi",
            "2024-10-01",
            MealTime::Dinner,
            vec![
                Ingredient::new("beef", "18", "kg"),
                Ingredient::new("rice", "15", "kg"),
                Ingredient::new("onion", "2~3", "kg"),
            ],
        ),
        meal(
            "Kimchi stew",
            "2024-10-02",
            MealTime::Lunch,
            vec![
                Ingredient::new("kimchi", "12", "kg"),
                Ingredient::new("rice", "15", "kg"),
                Ingredient::new("onion", "1500", "g"),
            ],
        ),
    ]
}

#[test]
fn test_event_aggregation() {
    let summaries = aggregate(&three_day_event());

    let keys: Vec<(&str, &str)> = summaries
        .iter()
        .map(|s| (s.name.as_str(), s.unit.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("rice", "kg"),
            ("sesame oil", ""),
            ("beef", "kg"),
            ("onion", "kg"),
            ("kimchi", "kg"),
            ("onion", "g"),
        ]
    );

    assert_eq!(summaries[0].total_amount, 45.0);
    assert_eq!(summaries[0].breakdown.len(), 3);
    assert_eq!(summaries[1].total_amount, 0.0);
    assert_eq!(summaries[2].total_amount, 22.5);
    assert_eq!(summaries[3].total_amount, 2.0);
    assert_eq!(summaries[3].breakdown[0].amount, "2~3");
}

#[test]
fn test_csv_for_event() {
    let csv = csv_string(&aggregate(&three_day_event())).unwrap();
    let body = csv.strip_prefix('\u{FEFF}').unwrap();
    let lines: Vec<&str> = body.lines().collect();

    assert_eq!(lines[0], "item name,total amount,unit,detail breakdown");
    assert!(lines[1].starts_with("rice,45,kg,2024-10-01(lunch) Bibimbap:15 | "));
    assert_eq!(lines[2], "sesame oil,0,,2024-10-01(lunch) Bibimbap:적당량");
    assert!(lines[3].starts_with("beef,22.5,kg,"));
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_html_document_for_event() {
    let meals = three_day_event();
    let markup = render_report_markup(&meals, &aggregate(&meals), 50).unwrap();
    let doc = render_document("Autumn Symposium (2024-10-01)", &markup).unwrap();

    assert!(doc.contains("<title>Autumn Symposium (2024-10-01)</title>"));
    assert_eq!(doc.matches("class=\"meal-card\"").count(), 3);
    assert!(doc.contains("150 people"));
    assert!(doc.contains("<td>rice</td><td>45</td><td>kg</td>"));
}
