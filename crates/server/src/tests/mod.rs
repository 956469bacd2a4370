// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod router_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use shiftboard_persistence::SqlitePersistence;
use std::time::Duration;
use tower::ServiceExt;

use crate::AppState;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, 16)
}

/// Sends one request through the router and decodes the JSON body.
async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request: Request<Body> = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Ids of the rows created by `seed`.
struct Seeded {
    mission_id: i64,
    shift_id: i64,
    volunteers: Vec<i64>,
}

/// Creates one visible mission with a shift of `max_slots` seats and
/// `volunteers` volunteers without a quota.
async fn seed(router: &Router, max_slots: i64, volunteers: usize) -> Seeded {
    let (status, mission) = send(
        router,
        "POST",
        "/missions",
        Some(json!({
            "title": "Park restoration",
            "date": "2026-11-21",
            "location": "East gate",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{mission}");
    let mission_id: i64 = mission["id"].as_i64().unwrap();

    let (status, shift) = send(
        router,
        "POST",
        "/shifts",
        Some(json!({
            "missionId": mission_id,
            "startTime": "09:00:00",
            "endTime": "12:00:00",
            "maxSlots": max_slots,
            "hoursValue": 3.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{shift}");

    let mut ids: Vec<i64> = Vec::new();
    for index in 0..volunteers {
        let (status, volunteer) = send(
            router,
            "POST",
            "/volunteers",
            Some(json!({ "displayName": format!("Volunteer {index}") })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{volunteer}");
        ids.push(volunteer["volunteerId"].as_i64().unwrap());
    }

    Seeded {
        mission_id,
        shift_id: shift["id"].as_i64().unwrap(),
        volunteers: ids,
    }
}

/// Polls `condition` until it holds, failing the test after two seconds.
async fn wait_until(mut condition: impl AsyncFnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition().await {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within two seconds"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
