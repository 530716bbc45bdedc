//! Integration tests for the category endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use wh_api::create_app;

use common::{bearer, test_config, test_state};

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_list_ordered_by_name_and_filtered_by_active() {
    let config = test_config();
    let state = test_state(&config);
    let auth = bearer(&state, &config);
    let app = test::init_service(create_app(state.clone(), &config)).await;

    for (name, active) in [("Zeta cables", true), ("alpha chargers", true), ("Mid cases", false)] {
        let req = test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "name": name, "isActive": active }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(names(&body), vec!["alpha chargers", "Mid cases", "Zeta cables"]);

    let req = test::TestRequest::get()
        .uri("/api/categories?isActive=true")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["alpha chargers", "Zeta cables"]);

    let req = test::TestRequest::get()
        .uri("/api/categories?isActive=false")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Mid cases"]);
}

#[actix_web::test]
async fn test_create_returns_row_then_rejects_duplicate() {
    let config = test_config();
    let state = test_state(&config);
    let auth = bearer(&state, &config);
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "name": "USB-C cables", "description": "1m and 2m" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Category created");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["name"], "USB-C cables");
    assert_eq!(body["data"]["description"], "1m and 2m");
    assert_eq!(body["data"]["isActive"], true);

    // Same name in a different case
    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "name": "usb-c cables" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Category name already exists");
}

#[actix_web::test]
async fn test_update_and_delete() {
    let config = test_config();
    let state = test_state(&config);
    let auth = bearer(&state, &config);
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "name": "Chargers" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/categories/{}", id))
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "isActive": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["name"], "Chargers");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{}", id))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/categories/{}", id))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Category not found");
}

#[actix_web::test]
async fn test_delete_refused_while_batches_exist() {
    let config = test_config();
    let state = test_state(&config);
    let auth = bearer(&state, &config);
    let batch = common::seed_batch(&state).await;
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{}", batch.category_id))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Cannot delete category with 1 existing batches");
}

#[actix_web::test]
async fn test_malformed_input_is_a_400_envelope() {
    let config = test_config();
    let state = test_state(&config);
    let auth = bearer(&state, &config);
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::get()
        .uri("/api/categories?isActive=sometimes")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/categories/abc")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let long_name = "x".repeat(101);
    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "name": long_name }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["message"], "Category name must be at most 100 characters");
}
