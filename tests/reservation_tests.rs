mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{admin_session, client_session, create_room, send, spawn_app, spawn_app_with};

fn booking(room_id: &str, user_id: &str, start: &str, end: &str) -> Value {
    json!({
        "roomId": room_id,
        "userId": user_id,
        "date": "2030-05-01",
        "startTime": start,
        "endTime": end,
    })
}

#[tokio::test]
async fn test_reservation_is_priced_from_room_rate() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Meeting Pod B", 40.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    let mut body = booking(&room_id, &client_id, "10:00", "12:00");
    // Client supplied price and status are ignored.
    body["totalPrice"] = json!(1);
    body["status"] = json!("confirmed");

    let (status, body) = send(&app, "POST", "/api/reservations", Some(&client), Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let reservation = &body["data"];
    assert_eq!(reservation["totalPrice"], 80.0);
    assert_eq!(reservation["status"], "pending");
    assert_eq!(reservation["startTime"], "10:00");
    assert_eq!(reservation["endTime"], "12:00");
    assert_eq!(reservation["date"], "2030-05-01");
}

#[tokio::test]
async fn test_reservation_rejects_bad_windows() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Meeting Pod B", 40.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    for (start, end) in [("12:00", "12:00"), ("14:00", "10:00"), ("10:30", "12:00")] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/reservations",
            Some(&client),
            Some(booking(&room_id, &client_id, start, end)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{start}-{end}: {body}");
    }

    let mut bad_date = booking(&room_id, &client_id, "10:00", "11:00");
    bad_date["date"] = json!("2030-02-30");
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(bad_date),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut missing = booking(&room_id, &client_id, "10:00", "11:00");
    missing.as_object_mut().unwrap().remove("roomId");
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(missing),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reservation_for_unknown_room() {
    let app = spawn_app().await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking("no-such-room", &client_id, "10:00", "11:00")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room not found");

    // The room is looked up before the times are parsed.
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking("no-such-room", &client_id, "10:30", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_books_only_for_self() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (alice_id, _) = client_session(&app, "Alice", "alice@example.com").await;
    let (_, bob) = client_session(&app, "Bob", "bob@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&bob),
        Some(booking(&room_id, &alice_id, "09:00", "10:00")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reservation_ownership() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (alice_id, alice) = client_session(&app, "Alice", "alice@example.com").await;
    let (bob_id, bob) = client_session(&app, "Bob", "bob@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&alice),
        Some(booking(&room_id, &alice_id, "09:00", "10:00")),
    )
    .await;
    let reservation_id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/reservations/{reservation_id}");

    let (status, body) = send(&app, "GET", &path, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only access your own reservations");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/reservations/user/{alice_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", &path, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roomName"], "Studio");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/reservations/user/{alice_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["roomName"], "Studio");
    assert!(mine[0].get("userName").is_none());

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/reservations/user/{bob_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, "GET", "/api/reservations", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/reservations", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["userName"], "Alice");
    assert_eq!(body["data"][0]["roomName"], "Studio");
}

#[tokio::test]
async fn test_overlaps_are_accepted_by_default() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    for (start, end) in [("10:00", "12:00"), ("11:00", "13:00")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/reservations",
            Some(&client),
            Some(booking(&room_id, &client_id, start, end)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_overlap_rejection_when_enabled() {
    let mut config = common::test_config();
    config.bookings.reject_overlaps = true;
    let app = spawn_app_with(config).await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "10:00", "12:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "11:00", "13:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Room is already booked for this time slot");

    // Back to back is fine.
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "12:00", "13:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Cancelling frees the slot.
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/reservations/{first_id}/cancel"),
        Some(&client),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "10:00", "11:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Reinstating the cancelled booking would take the slot back.
    let first_path = format!("/api/reservations/{first_id}");
    let (status, body) = send(
        &app,
        "PUT",
        &first_path,
        Some(&admin),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Room is already booked for this time slot");

    let (_, body) = send(&app, "GET", &first_path, Some(&admin), None).await;
    assert_eq!(body["data"]["status"], "cancelled");

    // Moving it to a free slot while reinstating is allowed.
    let (status, body) = send(
        &app,
        "PUT",
        &first_path,
        Some(&admin),
        Some(json!({ "startTime": "15:00", "endTime": "16:00", "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["totalPrice"], 20.0);
}

#[tokio::test]
async fn test_cancel_is_idempotent_and_owner_only() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (alice_id, alice) = client_session(&app, "Alice", "alice@example.com").await;
    let (_, bob) = client_session(&app, "Bob", "bob@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&alice),
        Some(booking(&room_id, &alice_id, "09:00", "10:00")),
    )
    .await;
    let cancel_path = format!(
        "/api/reservations/{}/cancel",
        body["data"]["id"].as_str().unwrap()
    );

    let (status, _) = send(&app, "POST", &cancel_path, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let (status, body) = send(&app, "POST", &cancel_path, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "cancelled");
    }
}

#[tokio::test]
async fn test_admin_update_reprices_and_delete() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "09:00", "10:00")),
    )
    .await;
    let path = format!("/api/reservations/{}", body["data"]["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &path,
        Some(&client),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &path,
        Some(&admin),
        Some(json!({ "endTime": "12:00", "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalPrice"], 60.0);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, _) = send(
        &app,
        "PUT",
        &path,
        Some(&admin),
        Some(json!({ "startTime": "13:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &path, Some(&client), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &path, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &path, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_stats() {
    let app = spawn_app().await;
    let admin = admin_session(&app).await;
    let room_id = create_room(&app, &admin, "Studio", 20.0).await;
    let (client_id, client) = client_session(&app, "Cli", "cli@example.com").await;

    let mut confirmed = booking(&room_id, &client_id, "09:00", "11:00");
    confirmed["status"] = json!("confirmed");
    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&admin),
        Some(confirmed),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/reservations",
        Some(&client),
        Some(booking(&room_id, &client_id, "14:00", "15:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "GET", "/api/admin/stats", Some(&client), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["data"];
    assert_eq!(stats["totalRooms"], 7);
    assert_eq!(stats["totalUsers"], 2);
    assert_eq!(stats["reservations"]["total"], 2);
    assert_eq!(stats["reservations"]["pending"], 1);
    assert_eq!(stats["reservations"]["confirmed"], 1);
    assert_eq!(stats["revenue"], 40.0);
    assert_eq!(stats["currency"], "USD");
}
