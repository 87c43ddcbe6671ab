use crate::config::test_helpers::{
    seed_address, seed_farm, seed_farm_plant, seed_plant, seed_plant_category, seed_working_hour,
    setup_test_app,
};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Local, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;
use upick_entity::working_hours::DayOfWeek;

async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({"error": "Invalid JSON response"}));
    (status, body)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    extract_response_body(response).await
}

fn today() -> DayOfWeek {
    DayOfWeek::from_weekday(Local::now().date_naive().weekday())
}

fn tomorrow() -> DayOfWeek {
    DayOfWeek::from_weekday(Local::now().date_naive().weekday().succ())
}

fn all_day() -> (Option<NaiveTime>, Option<NaiveTime>) {
    (
        NaiveTime::from_hms_opt(0, 0, 0),
        NaiveTime::from_hms_opt(23, 59, 59),
    )
}

fn result_titles(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|farm| farm["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_farm_list_geo_filter() {
    let (app, db) = setup_test_app().await;

    let near = seed_farm(&db, "Castlemont Berries", None).await;
    seed_address(&db, &near, 37.3, -121.9).await;
    let far = seed_farm(&db, "Northern Orchard", None).await;
    seed_address(&db, &far, 40.0, -121.9).await;

    // No filter returns both
    let (status, body) = get(&app, "/api/farms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["count"], 2);

    // Search around the near farm's own coordinates finds only it
    let (status, body) = get(
        &app,
        "/api/farms?radius=5&address__lat=37.3&address__long=-121.9",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_titles(&body), vec!["Castlemont Berries"]);

    // The address is flattened with a nested geo point
    let address = &body["results"][0]["address"];
    assert_eq!(address["zip_code"], "95128");
    assert!((address["geo_location"]["lat"].as_f64().unwrap() - 37.3).abs() < 1e-9);
    assert!((address["geo_location"]["long"].as_f64().unwrap() + 121.9).abs() < 1e-9);

    // A search centred far away excludes it
    let (status, body) = get(
        &app,
        "/api/farms?radius=5&address__lat=40.0&address__long=-121.9",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_titles(&body), vec!["Northern Orchard"]);
}

#[tokio::test]
async fn test_partial_radius_triple_is_rejected() {
    let (app, _db) = setup_test_app().await;

    for uri in [
        "/api/farms?radius=5",
        "/api/farms?address__lat=37.3",
        "/api/farms?radius=5&address__lat=37.3",
        "/api/farms?address__lat=37.3&address__long=-121.9",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {uri}");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("together"),
            "unexpected error body for {uri}: {body:?}"
        );
    }
}

#[tokio::test]
async fn test_malformed_numeric_parameter_is_rejected() {
    let (app, _db) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/farms?radius=five&address__lat=37.3&address__long=-121.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_is_open_filter() {
    let (app, db) = setup_test_app().await;
    let (open_at, close_at) = all_day();

    let open_farm = seed_farm(&db, "Open Farm", None).await;
    seed_working_hour(&db, &open_farm, today(), open_at, close_at).await;

    let closed_farm = seed_farm(&db, "Closed Farm", None).await;
    seed_working_hour(&db, &closed_farm, today(), open_at, open_at).await;

    let unknown_farm = seed_farm(&db, "Unknown Farm", None).await;
    seed_working_hour(&db, &unknown_farm, today(), None, None).await;

    let other_day_farm = seed_farm(&db, "Other Day Farm", None).await;
    seed_working_hour(&db, &other_day_farm, tomorrow(), open_at, close_at).await;

    let (status, body) = get(&app, "/api/farms?is_open=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_titles(&body), vec!["Open Farm"]);
    let hours = body["results"][0]["working_hours"].as_array().unwrap();
    assert_eq!(hours.len(), 1);
    assert_eq!(hours[0]["is_open"], true);

    let (status, body) = get(&app, "/api/farms?is_open=false").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_titles(&body), vec!["Closed Farm"]);

    // Entries with null times surface a null flag and match neither value
    let (_, body) = get(&app, "/api/farms").await;
    let unknown = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|farm| farm["title"] == "Unknown Farm")
        .unwrap();
    assert_eq!(unknown["working_hours"][0]["is_open"], Value::Null);
}

#[tokio::test]
async fn test_entrance_fee_filter() {
    let (app, db) = setup_test_app().await;

    seed_farm(&db, "Free Farm", None).await;
    seed_farm(&db, "Cheap Farm", Some(Decimal::new(999, 2))).await; // 9.99
    seed_farm(&db, "Mid Farm", Some(Decimal::new(5000, 2))).await; // 50.00
    seed_farm(&db, "Pricey Farm", Some(Decimal::new(12000, 2))).await; // 120.00

    // No bounds: everything, including the null fee
    let (status, body) = get(&app, "/api/farms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["count"], 4);

    // [10, 50]: 9.99 is out, exactly 50.00 is in
    let (status, body) = get(&app, "/api/farms?entrance_fee_min=10&entrance_fee_max=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_titles(&body), vec!["Mid Farm"]);

    // Max only: null fees coalesce to 0 and pass
    let (_, body) = get(&app, "/api/farms?entrance_fee_max=10").await;
    let mut titles = result_titles(&body);
    titles.sort();
    assert_eq!(titles, vec!["Cheap Farm", "Free Farm"]);

    // Min only: unbounded above
    let (_, body) = get(&app, "/api/farms?entrance_fee_min=10").await;
    let mut titles = result_titles(&body);
    titles.sort();
    assert_eq!(titles, vec!["Mid Farm", "Pricey Farm"]);
}

#[tokio::test]
async fn test_list_mode_keeps_only_todays_hours_and_no_plants() {
    let (app, db) = setup_test_app().await;
    let (open_at, close_at) = all_day();

    let farm = seed_farm(&db, "Week Farm", None).await;
    for day in [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ] {
        seed_working_hour(&db, &farm, day, open_at, close_at).await;
    }
    let category = seed_plant_category(&db, "Fruit").await;
    let plant = seed_plant(&db, &category, "Strawberry", Some("Fragaria ananassa")).await;
    seed_farm_plant(&db, &farm, &plant, true).await;

    let (status, body) = get(&app, "/api/farms").await;
    assert_eq!(status, StatusCode::OK);
    let result = &body["results"][0];
    assert_eq!(result["working_hours"].as_array().unwrap().len(), 1);
    assert_eq!(result["farm_plants"], json!([]));
}

#[tokio::test]
async fn test_farm_detail_shape() {
    let (app, db) = setup_test_app().await;
    let (open_at, close_at) = all_day();

    let farm = seed_farm(&db, "Detail Farm", Some(Decimal::new(2000, 2))).await;
    seed_address(&db, &farm, 37.3, -121.9).await;
    for day in [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ] {
        seed_working_hour(&db, &farm, day, open_at, close_at).await;
    }
    let category = seed_plant_category(&db, "Fruit").await;
    let strawberry = seed_plant(&db, &category, "Strawberry", Some("Fragaria ananassa")).await;
    let blueberry = seed_plant(&db, &category, "Blueberry", None).await;
    seed_farm_plant(&db, &farm, &strawberry, true).await;
    seed_farm_plant(&db, &farm, &blueberry, false).await;

    let (status, body) = get(&app, &format!("/api/farms/{}", farm.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Detail Farm");

    // Detail mode keeps the whole week; only today's entry carries a flag
    let hours = body["working_hours"].as_array().unwrap();
    assert_eq!(hours.len(), 7);
    let flagged: Vec<_> = hours
        .iter()
        .filter(|entry| !entry["is_open"].is_null())
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["is_open"], true);

    // Plant associations are flattened with the plant's fields on top
    let plants = body["farm_plants"].as_array().unwrap();
    assert_eq!(plants.len(), 2);
    let shaped = plants
        .iter()
        .find(|entry| entry["title"] == "Strawberry")
        .unwrap();
    assert_eq!(shaped["category"]["name"], "Fruit");
    assert_eq!(shaped["organic"], true);
    assert_eq!(shaped["scientific_name"], "Fragaria ananassa");
    assert_eq!(shaped["country_of_origin"], "USA");
    assert!(shaped["season_start"].is_string());
}

#[tokio::test]
async fn test_farm_detail_without_plants_has_empty_list() {
    let (app, db) = setup_test_app().await;

    let farm = seed_farm(&db, "Plantless Farm", None).await;
    let (status, body) = get(&app, &format!("/api/farms/{}", farm.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["farm_plants"], json!([]));
    assert_eq!(body["working_hours"], json!([]));
}

#[tokio::test]
async fn test_farm_detail_unknown_id_is_not_found() {
    let (app, _db) = setup_test_app().await;

    let (status, body) = get(&app, &format!("/api/farms/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_pagination_envelope() {
    let (app, db) = setup_test_app().await;

    for i in 0..25 {
        seed_farm(&db, &format!("Farm {i:02}"), None).await;
    }

    // Default page size is 20
    let (status, body) = get(&app, "/api/farms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["count"], 25);
    assert_eq!(body["info"]["results_per_page"], 20);
    assert_eq!(body["results"].as_array().unwrap().len(), 20);
    assert!(
        body["info"]["next"]
            .as_str()
            .unwrap()
            .contains("page=2")
    );
    assert_eq!(body["info"]["previous"], Value::Null);

    // Last page
    let (_, body) = get(&app, "/api/farms?page=2").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert_eq!(body["info"]["next"], Value::Null);
    assert!(
        body["info"]["previous"]
            .as_str()
            .unwrap()
            .contains("page=1")
    );

    // Page past the end: empty results, no next
    let (status, body) = get(&app, "/api/farms?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["info"]["next"], Value::Null);

    // Oversized page size is capped, not rejected
    let (status, body) = get(&app, "/api/farms?page_size=150").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 25);

    // Explicit page size
    let (_, body) = get(&app, "/api/farms?page_size=10&page=2").await;
    assert_eq!(body["info"]["results_per_page"], 10);
    assert!(
        body["info"]["next"]
            .as_str()
            .unwrap()
            .contains("page_size=10")
    );
}

#[tokio::test]
async fn test_non_get_methods_are_rejected() {
    let (app, _db) = setup_test_app().await;

    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/farms")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"title": "Nope"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "expected 405 for {method}"
        );
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/farms/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
