mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn track_visit_records_row() {
    let app = TestApp::new().await;
    let (user_id, token) = app.create_user("Ada").await;

    let resp = app
        .post_json("/visits", &json!({ "hotelId": 42 }), Some(&token))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp).await;
    let visit_id = json["visitId"].as_str().unwrap().to_string();

    let (stored_user, hotel_id): (String, i64) =
        sqlx::query_as("SELECT user_id, hotel_id FROM visits WHERE id = ?")
            .bind(&visit_id)
            .fetch_one(&app.db)
            .await
            .unwrap();
    assert_eq!(stored_user, user_id);
    assert_eq!(hotel_id, 42);
}

#[tokio::test]
async fn every_call_appends_a_visit() {
    let app = TestApp::new().await;
    let (_user_id, token) = app.create_user("Ada").await;

    for _ in 0..3 {
        let resp = app
            .post_json("/visits", &json!({ "hotelId": 7 }), Some(&token))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    assert_eq!(app.count("SELECT COUNT(*) FROM visits").await, 3);
}

#[tokio::test]
async fn missing_hotel_id_is_rejected() {
    let app = TestApp::new().await;
    let (_user_id, token) = app.create_user("Ada").await;

    let resp = app.post_json("/visits", &json!({}), Some(&token)).await;
    let message = assert_error(resp, StatusCode::BAD_REQUEST).await;
    assert_eq!(message, "Hotel ID is required.");

    let resp = app
        .post_json("/visits", &json!({ "hotelId": 0 }), Some(&token))
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST).await;

    assert_eq!(app.count("SELECT COUNT(*) FROM visits").await, 0);
}

#[tokio::test]
async fn unauthenticated_visit_changes_nothing() {
    let app = TestApp::new().await;

    let resp = app.post_json("/visits", &json!({ "hotelId": 42 }), None).await;
    assert_error(resp, StatusCode::UNAUTHORIZED).await;

    let resp = app
        .post_json("/visits", &json!({ "hotelId": 42 }), Some("garbage"))
        .await;
    assert_error(resp, StatusCode::FORBIDDEN).await;

    assert_eq!(app.count("SELECT COUNT(*) FROM visits").await, 0);
}
