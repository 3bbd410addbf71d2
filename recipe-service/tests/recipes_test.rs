//! Recipe browsing endpoints against a seeded SQLite database.

mod common;

use axum::http::StatusCode;
use common::TestApp;

fn names(body: &serde_json::Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn lists_complete_recipes_by_name() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/recipes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 4);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
    assert_eq!(
        names(&body),
        vec!["Apple Pie", "Beef Tacos", "Chicken Alfredo", "Garlic Bread"]
    );

    let first = &body["data"][0];
    assert_eq!(first["id"], 5);
    assert_eq!(first["total_time"], "90 minutes");
    assert!(first.get("ingredients").is_none());
}

#[tokio::test]
async fn column_values_keep_their_sqlite_types() {
    let app = TestApp::new().await;

    let (_, body) = app.get("/api/recipes").await;
    let tacos = &body["data"][1];
    assert_eq!(tacos["name"], "Beef Tacos");
    assert_eq!(tacos["id"], 2);
    assert_eq!(tacos["total_time"], 20);
    assert_eq!(tacos["servings"], 4);

    let bread = &body["data"][3];
    assert_eq!(bread["servings"], "6 slices");

    let (_, body) = app.get("/api/recipes/1").await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["ingredients"][2]["amount"], 1.5);
    assert_eq!(body["data"]["ingredients"][1]["amount"], 12);

    let (status, body) = app.get("/api/recipes/3").await;
    assert_eq!(status, StatusCode::OK);
    let garlic = body["data"]["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["name"] == "garlic")
        .unwrap();
    assert_eq!(garlic["amount"], "3-4");
}

#[tokio::test]
async fn paginates_and_runs_past_the_end() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/recipes?page=2&limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Garlic Bread"]);
    assert_eq!(body["total"], 4);

    let (status, body) = app.get("/api/recipes?page=5&limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn rejects_out_of_range_paging() {
    let app = TestApp::new().await;

    for uri in [
        "/api/recipes?page=0",
        "/api/recipes?limit=0",
        "/api/recipes?limit=101",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["error"], "Validation error");
    }

    let (status, _) = app.get("/api/recipes?limit=100").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unparsable_paging_is_a_json_validation_error() {
    let app = TestApp::new().await;

    for uri in ["/api/recipes?page=-1", "/api/recipes?limit=ten"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["error"], "Validation error");
        assert!(body["details"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn missing_database_is_service_unavailable() {
    let app = TestApp::without_database(None).await;

    for uri in ["/api/recipes", "/api/recipes/1", "/api/search?q=pie", "/api/categories"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(body["error"], "Service unavailable");
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains(app.database_path.to_str().unwrap()));
    }
}

#[tokio::test]
async fn recipe_detail_orders_ingredients_and_steps() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/recipes/1").await;

    assert_eq!(status, StatusCode::OK);
    let recipe = &body["data"];
    assert_eq!(recipe["name"], "Chicken Alfredo");

    let ingredients: Vec<&str> = recipe["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(ingredients, vec!["chicken breast", "fettuccine", "heavy cream"]);
    assert_eq!(recipe["ingredients"][0]["unit"], serde_json::Value::Null);
    assert_eq!(recipe["ingredients"][2]["unit"], "cup");

    assert_eq!(recipe["instructions"][0]["step_number"], 1);
    assert_eq!(
        recipe["instructions"][1]["instruction"],
        "Toss the pasta in the sauce."
    );

    let mut categories: Vec<&str> = recipe["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    categories.sort();
    assert_eq!(categories, vec!["dinner", "italian"]);
}

#[tokio::test]
async fn incomplete_recipes_are_still_addressable() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/recipes/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Unfinished Soup");

    let (status, body) = app.get("/api/recipes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn search_matches_ingredients_case_insensitively() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/search?q=CREAM").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "CREAM");
    assert_eq!(body["total"], 1);
    assert_eq!(names(&body), vec!["Chicken Alfredo"]);

    // Description match; the incomplete soup never shows up.
    let (_, body) = app.get("/api/search?q=b").await;
    assert!(!names(&body).contains(&"Unfinished Soup"));
    assert!(names(&body).contains(&"Garlic Bread"));
}

#[tokio::test]
async fn search_requires_a_query() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/search").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.get("/api/search?q=%20%20").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn categories_count_complete_recipes() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        serde_json::json!([
            {"name": "dinner", "count": 2},
            {"name": "italian", "count": 2},
            {"name": "dessert", "count": 1},
            {"name": "mexican", "count": 1},
            {"name": "side", "count": 1}
        ])
    );
}
