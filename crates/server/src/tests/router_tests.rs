// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::json;
use shiftboard_domain::ShiftSnapshot;
use tokio::sync::broadcast;

use super::{Seeded, create_test_app_state, seed, send};
use crate::{AppState, build_router};

#[tokio::test]
async fn test_listing_shows_seeded_shift() {
    let router: Router = build_router(create_test_app_state());
    let seeded: Seeded = seed(&router, 3, 1).await;

    let (status, body) = send(
        &router,
        "GET",
        &format!("/shifts?volunteer_id={}", seeded.volunteers[0]),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let shifts = body["shifts"].as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["mission"]["id"], seeded.mission_id);
    assert_eq!(shifts[0]["snapshot"]["maxSlots"], 3);
    assert!(shifts[0]["registration"].is_null());
}

#[tokio::test]
async fn test_register_broadcasts_fresh_snapshot() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<ShiftSnapshot> = app_state.broadcaster.subscribe();
    let router: Router = build_router(app_state);
    let seeded: Seeded = seed(&router, 3, 1).await;
    // Shift creation is broadcast as well.
    assert_eq!(rx.recv().await.unwrap().total_registrations, 0);

    let (status, body) = send(
        &router,
        "POST",
        "/registrations",
        Some(json!({
            "shiftId": seeded.shift_id,
            "volunteerId": seeded.volunteers[0],
            "note": "first time",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["snapshot"]["totalRegistrations"], 1);
    let pushed: ShiftSnapshot = rx.recv().await.unwrap();
    assert_eq!(pushed.id.value(), seeded.shift_id);
    assert_eq!(pushed.total_registrations, 1);
}

#[tokio::test]
async fn test_full_shift_rejection_is_unprocessable_with_verbatim_message() {
    let app_state: AppState = create_test_app_state();
    let router: Router = build_router(app_state.clone());
    let seeded: Seeded = seed(&router, 1, 2).await;
    send(
        &router,
        "POST",
        "/registrations",
        Some(json!({ "shiftId": seeded.shift_id, "volunteerId": seeded.volunteers[0] })),
    )
    .await;
    let mut rx: broadcast::Receiver<ShiftSnapshot> = app_state.broadcaster.subscribe();

    let (status, body) = send(
        &router,
        "POST",
        "/registrations",
        Some(json!({ "shiftId": seeded.shift_id, "volunteerId": seeded.volunteers[1] })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "shift_full");
    assert_eq!(body["message"], "This shift is already full");
    assert!(rx.try_recv().is_err(), "rejections are not broadcast");
}

#[tokio::test]
async fn test_cancel_and_attendance_endpoints() {
    let router: Router = build_router(create_test_app_state());
    let seeded: Seeded = seed(&router, 2, 1).await;
    let ids = json!({ "shiftId": seeded.shift_id, "volunteerId": seeded.volunteers[0] });

    let (status, _) = send(&router, "POST", "/registrations", Some(ids.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, "POST", "/attendance", Some(ids.clone())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["hoursCredited"], 3.0);

    let (status, body) = send(&router, "POST", "/registrations/cancel", Some(ids.clone())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["snapshot"]["totalRegistrations"], 0);

    let (status, body) = send(&router, "POST", "/registrations/cancel", Some(ids)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "You are not registered for this shift");
}

#[tokio::test]
async fn test_missing_and_invalid_resources() {
    let router: Router = build_router(create_test_app_state());

    let (status, body) = send(&router, "GET", "/shifts/12", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = send(&router, "GET", "/shifts/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, _) = send(
        &router,
        "POST",
        "/volunteers",
        Some(json!({ "displayName": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shift_detail_returns_mission() {
    let router: Router = build_router(create_test_app_state());
    let seeded: Seeded = seed(&router, 2, 0).await;

    let (status, body) = send(&router, "GET", &format!("/shifts/{}", seeded.shift_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mission"]["title"], "Park restoration");
    assert_eq!(body["snapshot"]["startTime"], "09:00:00");
}
