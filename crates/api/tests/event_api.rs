//! Integration tests for the `/events` resource.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_list_events(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/events",
        json!({
            "Title": "Maintenance window",
            "Start": "2026-09-01T22:00:00Z",
            "End": "2026-09-02T02:00:00Z",
            "Location": "DC-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["Title"], "Maintenance window");
    assert_eq!(created["Start"], "2026-09-01T22:00:00+00:00");

    let listed = body_json(get(app, "/api/v1/events").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_tolerates_malformed_timestamps(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/events",
        json!({"Title": "Kickoff", "Start": "next tuesday"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created["Start"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn next_returns_earliest_future_event(pool: PgPool) {
    let app = common::build_test_app(pool);

    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let soon = (Utc::now() + Duration::days(1)).to_rfc3339();
    let later = (Utc::now() + Duration::days(7)).to_rfc3339();

    post_json(app.clone(), "/api/v1/events", json!({"Title": "Past", "Start": past})).await;
    post_json(app.clone(), "/api/v1/events", json!({"Title": "Later", "Start": later})).await;
    post_json(app.clone(), "/api/v1/events", json!({"Title": "Soon", "Start": soon})).await;

    let next = body_json(get(app, "/api/v1/events/next").await).await;
    assert_eq!(next["Title"], "Soon");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn next_is_404_when_nothing_upcoming(pool: PgPool) {
    let app = common::build_test_app(pool);

    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    post_json(app.clone(), "/api/v1/events", json!({"Title": "Past", "Start": past})).await;

    let response = get(app, "/api/v1/events/next").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No upcoming events");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_and_delete_event(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json(app.clone(), "/api/v1/events", json!({"Title": "Review"})).await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/events/{id}"),
        json!({"Title": "Quarterly review", "Responsible": "ops"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["Title"], "Quarterly review");
    assert_eq!(updated["Responsible"], "ops");

    let response = delete(app.clone(), &format!("/api/v1/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_unknown_event_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(app, "/api/v1/events/999", json!({"Title": "x"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
