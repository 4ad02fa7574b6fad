//! Integration tests for the catalogue resources: restaurants, menus, foods,
//! categories and tables.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, register_admin};
use serde_json::{json, Value};

/// POST as admin, assert 201, return the created document.
async fn create(app: &axum::Router, token: &str, uri: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

fn id_of(doc: &Value) -> String {
    doc["_id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_returns_the_page_envelope() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 1).await;
    for title in ["Starters", "Mains", "Desserts"] {
        create(&app, &admin.token, "/categories", json!({ "title": title })).await;
    }

    let response = get(app, "/categories?page=2&recordPerPage=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["page"], 2);
    assert_eq!(json["record_per_page"], 2);
    assert_eq!(json["start_index"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Desserts");
}

#[tokio::test]
async fn unusable_page_parameters_fall_back_to_defaults() {
    let (app, _stores) = common::build_test_app();

    let json = body_json(get(app, "/tables?page=abc&recordPerPage=-4").await).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["record_per_page"], 10);
    assert_eq!(json["start_index"], 0);
}

// ---------------------------------------------------------------------------
// Restaurants and menus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn restaurant_lists_its_menus() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 2).await;
    let lunch = create(&app, &admin.token, "/menus", json!({ "name": "Lunch" })).await;
    create(&app, &admin.token, "/menus", json!({ "name": "Unrelated" })).await;

    let restaurant = create(
        &app,
        &admin.token,
        "/restaurants",
        json!({
            "title": "Chez Rust",
            "rating": 4.5,
            "ratingCount": 12,
            "pickup": true,
            "menu_ids": [id_of(&lunch)],
        }),
    )
    .await;
    assert_eq!(restaurant["ratingCount"], 12);

    let json = body_json(get(app, &format!("/restaurants/{}/menus", id_of(&restaurant))).await).await;
    let menus = json["data"].as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["name"], "Lunch");
}

#[tokio::test]
async fn restaurant_rejects_bad_rating_and_unknown_menu() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 3).await;

    let response = post_json_auth(
        app.clone(),
        "/restaurants",
        json!({ "title": "Too Good", "rating": 6.0 }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/restaurants",
        json!({ "title": "Ghost Kitchen", "menu_ids": ["000000000000000000000000"] }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn menu_dates_must_be_ordered() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 4).await;

    let response = post_json_auth(
        app,
        "/menus",
        json!({
            "name": "Summer",
            "start_date": "2026-09-01T00:00:00Z",
            "end_date": "2026-06-01T00:00:00Z",
        }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Foods
// ---------------------------------------------------------------------------

#[tokio::test]
async fn food_price_is_rounded_and_menu_must_exist() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 5).await;
    let menu = create(&app, &admin.token, "/menus", json!({ "name": "Dinner" })).await;

    let food = create(
        &app,
        &admin.token,
        "/foods",
        json!({ "name": "Risotto", "price": 9.999, "menu_id": id_of(&menu) }),
    )
    .await;
    assert_eq!(food["price"], 10.0);

    let response = post_json_auth(
        app.clone(),
        "/foods",
        json!({ "name": "Orphan", "price": 3.0, "menu_id": "000000000000000000000000" }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/foods",
        json!({ "name": "Free Lunch", "price": 0.0, "menu_id": id_of(&menu) }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn foods_can_be_filtered_by_menu() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 6).await;
    let breakfast = create(&app, &admin.token, "/menus", json!({ "name": "Breakfast" })).await;
    let dinner = create(&app, &admin.token, "/menus", json!({ "name": "Dinner" })).await;

    create(
        &app,
        &admin.token,
        "/foods",
        json!({ "name": "Pancakes", "price": 6.5, "menu_id": id_of(&breakfast) }),
    )
    .await;
    create(
        &app,
        &admin.token,
        "/foods",
        json!({ "name": "Steak", "price": 24.0, "menu_id": id_of(&dinner) }),
    )
    .await;

    let json = body_json(get(app.clone(), "/foods").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, &format!("/foods?menu_id={}", id_of(&breakfast))).await).await;
    let foods = json["data"].as_array().unwrap();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["name"], "Pancakes");
}

#[tokio::test]
async fn food_update_patches_fields() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 7).await;
    let menu = create(&app, &admin.token, "/menus", json!({ "name": "Dinner" })).await;
    let food = create(
        &app,
        &admin.token,
        "/foods",
        json!({ "name": "Soup", "price": 5.0, "menu_id": id_of(&menu) }),
    )
    .await;

    let response = put_json_auth(
        app.clone(),
        &format!("/foods/{}", id_of(&food)),
        json!({ "price": 5.5 }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["price"], 5.5);
    assert_eq!(updated["data"]["name"], "Soup");

    let response = put_json_auth(
        app,
        "/foods/000000000000000000000000",
        json!({ "price": 5.5 }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tables and categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn table_defaults_and_validation() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 8).await;

    let table = create(
        &app,
        &admin.token,
        "/tables",
        json!({ "table_number": 4, "number_of_guests": 2 }),
    )
    .await;
    assert_eq!(table["table_status"], "available");

    let response = post_json_auth(
        app,
        "/tables",
        json!({ "table_number": 0, "number_of_guests": 2 }),
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_category_is_gone() {
    let (app, stores) = common::build_test_app();
    let admin = register_admin(&app, &stores, 9).await;
    let category = create(&app, &admin.token, "/categories", json!({ "title": "Drinks" })).await;
    let uri = format!("/categories/{}", id_of(&category));

    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::OK);
    assert_eq!(
        delete_auth(app.clone(), &uri, &admin.token).await.status(),
        StatusCode::NO_CONTENT
    );

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    assert_eq!(
        delete_auth(app, &uri, &admin.token).await.status(),
        StatusCode::NOT_FOUND
    );
}
