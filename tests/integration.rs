use std::sync::Arc;
use std::time::Duration;

use aero_taxi::api::rest::router;
use aero_taxi::config::Timings;
use aero_taxi::state::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup() -> axum::Router {
    setup_with(Timings::default())
}

fn setup_with(timings: Timings) -> axum::Router {
    let state = AppState::new(1024, timings).unwrap();
    router(Arc::new(state))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn select(
    app: &axum::Router,
    booking_id: &str,
    location_id: &str,
) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/bookings/{booking_id}/select"),
            json!({ "location_id": location_id }),
        ))
        .await
        .unwrap()
}

async fn new_booking(app: &axum::Router) -> String {
    let response = app.clone().oneshot(post_request("/bookings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["bookings"], 0);
    assert_eq!(body["payments"], 0);
    assert_eq!(body["rides"], 0);
}

#[tokio::test]
async fn metrics_returns_prometheus_format() {
    let app = setup();
    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = body_string(response).await;
    assert!(body.contains("active_rides"));
    assert!(body.contains("routes_computed_total"));
}

#[tokio::test]
async fn search_kor_finds_koramangala_only() {
    let app = setup();
    let response = app.oneshot(get_request("/locations?q=kor")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Koramangala"]);
}

#[tokio::test]
async fn locations_can_be_filtered_by_category() {
    let app = setup();
    let response = app
        .oneshot(get_request("/locations?category=dropoff"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "airport");
    assert_eq!(body[0]["coordinates"]["lng"], 77.7064);
}

#[tokio::test]
async fn unknown_location_returns_404() {
    let app = setup();
    let response = app.oneshot(get_request("/locations/atlantis")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("atlantis"));
}

#[tokio::test]
async fn velipots_and_drones_are_listed() {
    let app = setup();

    let velipots = body_json(app.clone().oneshot(get_request("/velipots")).await.unwrap()).await;
    assert_eq!(velipots.as_array().unwrap().len(), 4);
    assert_eq!(velipots[0]["category"], "velipot");

    let drones = body_json(app.oneshot(get_request("/drones")).await.unwrap()).await;
    assert_eq!(drones.as_array().unwrap().len(), 3);
    assert_eq!(drones[2]["status"], "in_transit");
}

#[tokio::test]
async fn route_estimate_for_koramangala_to_airport() {
    let app = setup();
    let response = app
        .oneshot(get_request("/routes/koramangala/airport"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "route_koramangala_airport");
    assert_eq!(body["distance_km"], 31.19);
    assert_eq!(body["duration_minutes"], 31);
    assert_eq!(body["price"], 930);
    assert_eq!(body["velipot"]["id"], "velipot_south");
}

#[tokio::test]
async fn booking_flow_reaches_payment() {
    let app = setup();
    let booking_id = new_booking(&app).await;

    let response = select(&app, &booking_id, "indiranagar").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["step"], "select_destination");
    assert_eq!(body["origin"]["id"], "indiranagar");

    let response = select(&app, &booking_id, "whitefield").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["step"], "confirm");
    assert_eq!(body["route"]["price"], 447);

    let response = app
        .clone()
        .oneshot(post_request(&format!("/bookings/{booking_id}/confirm")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let payment = body_json(response).await;
    assert_eq!(payment["status"], "pending");
    assert_eq!(payment["method"], "upi");
    assert_eq!(payment["amount"], 447);
    assert_eq!(payment["route"]["id"], "route_indiranagar_whitefield");
}

#[tokio::test]
async fn same_destination_as_origin_is_rejected_without_state_change() {
    let app = setup();
    let booking_id = new_booking(&app).await;
    select(&app, &booking_id, "hebbal").await;

    let before = body_json(
        app.clone()
            .oneshot(get_request(&format!("/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;

    let response = select(&app, &booking_id, "hebbal").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let after = body_json(
        app.oneshot(get_request(&format!("/bookings/{booking_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(before, after);
    assert_eq!(after["step"], "select_destination");
}

#[tokio::test]
async fn confirm_before_choosing_a_route_is_a_conflict() {
    let app = setup();
    let booking_id = new_booking(&app).await;

    let response = app
        .oneshot(post_request(&format!("/bookings/{booking_id}/confirm")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reset_clears_the_booking() {
    let app = setup();
    let booking_id = new_booking(&app).await;
    select(&app, &booking_id, "mg_road").await;
    select(&app, &booking_id, "airport").await;

    let response = app
        .oneshot(post_request(&format!("/bookings/{booking_id}/reset")))
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["step"], "select_origin");
    assert!(body["origin"].is_null());
    assert!(body["destination"].is_null());
    assert!(body["route"].is_null());
}

#[tokio::test]
async fn booking_query_narrows_candidates() {
    let app = setup();
    let booking_id = new_booking(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/bookings/{booking_id}/query"),
            json!({ "query": "SOUTH" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["location"]["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec!["koramangala", "electronic_city", "jayanagar", "btm_layout"]);
}

#[tokio::test]
async fn unknown_booking_returns_404() {
    let app = setup();
    let response = app
        .oneshot(get_request(&format!("/bookings/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ride_history_filters_by_status() {
    let app = setup();

    let all = body_json(app.clone().oneshot(get_request("/rides/history")).await.unwrap()).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["id"], "ride_001");
    assert_eq!(all[0]["status"], "completed");

    let cancelled = body_json(
        app.oneshot(get_request("/rides/history?status=cancelled"))
            .await
            .unwrap(),
    )
    .await;
    assert!(cancelled.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn profile_can_be_updated() {
    let app = setup();

    let profile = body_json(app.clone().oneshot(get_request("/profile")).await.unwrap()).await;
    assert_eq!(profile["name"], "Sumiyya Kareem");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/profile",
            json!({
                "name": "Asha Rao",
                "email": "asha@example.com",
                "phone": "+91 90000 00000",
                "address": "Hebbal, Bangalore"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(app.oneshot(get_request("/profile")).await.unwrap()).await;
    assert_eq!(profile["name"], "Asha Rao");
}

#[tokio::test]
async fn profile_with_blank_name_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "PUT",
            "/profile",
            json!({ "name": " ", "email": "", "phone": "", "address": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn demo_ride_runs_to_completion() {
    let app = setup();

    let response = app.clone().oneshot(post_request("/rides/demo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ride = body_json(response).await;
    assert_eq!(ride["status"], "confirmed");
    assert_eq!(ride["drone_id"], "AERO_001");
    assert_eq!(ride["route"]["velipot"]["id"], "velipot_central");
    let ride_id = ride["id"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_secs(60)).await;

    let ride = body_json(
        app.oneshot(get_request(&format!("/rides/{ride_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ride["status"], "completed");
    assert_eq!(ride["passenger_verified"], true);
    assert_eq!(ride["position"]["lat"], 13.1986);
}

#[tokio::test(start_paused = true)]
async fn manual_verification_when_auto_verify_is_off() {
    let app = setup_with(Timings {
        auto_verify_delay: None,
        ..Timings::default()
    });

    let ride = body_json(app.clone().oneshot(post_request("/rides/demo")).await.unwrap()).await;
    let ride_id = ride["id"].as_str().unwrap().to_string();

    let early = app
        .clone()
        .oneshot(post_request(&format!("/rides/{ride_id}/verify")))
        .await
        .unwrap();
    assert_eq!(early.status(), StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_secs(30)).await;

    let ride = body_json(
        app.clone()
            .oneshot(get_request(&format!("/rides/{ride_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ride["status"], "passenger_pickup");
    assert_eq!(ride["verification_code"], "AX-7429");

    let response = app
        .clone()
        .oneshot(post_request(&format!("/rides/{ride_id}/verify")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let update = body_json(response).await;
    assert_eq!(update["status"], "passenger_verified");

    tokio::time::sleep(Duration::from_secs(30)).await;

    let ride = body_json(
        app.oneshot(get_request(&format!("/rides/{ride_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ride["status"], "completed");
}

#[tokio::test(start_paused = true)]
async fn paid_booking_is_tracked_on_its_own_route() {
    let app = setup();
    let booking_id = new_booking(&app).await;
    select(&app, &booking_id, "jayanagar").await;
    select(&app, &booking_id, "marathahalli").await;

    let payment = body_json(
        app.clone()
            .oneshot(post_request(&format!("/bookings/{booking_id}/confirm")))
            .await
            .unwrap(),
    )
    .await;
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/payments/{payment_id}/method"),
            json!({ "method": "wallet" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_request(&format!("/payments/{payment_id}/pay")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "processing");

    let again = app
        .clone()
        .oneshot(post_request(&format!("/payments/{payment_id}/pay")))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_secs(3)).await;

    let payment = body_json(
        app.clone()
            .oneshot(get_request(&format!("/payments/{payment_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(payment["status"], "completed");
    assert_eq!(payment["method"], "wallet");
    let ride_id = payment["ride_id"].as_str().unwrap().to_string();

    let ride = body_json(
        app.oneshot(get_request(&format!("/rides/{ride_id}")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ride["route"]["id"], "route_jayanagar_marathahalli");
    assert_eq!(ride["route"]["origin"]["name"], "Jayanagar");
}

#[tokio::test]
async fn unknown_history_filter_returns_json_400() {
    let app = setup();
    let response = app
        .oneshot(get_request("/rides/history?status=booked"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("booked"));
}

#[tokio::test]
async fn history_stats_total_the_seed_rides() {
    let app = setup();
    let response = app
        .oneshot(get_request("/rides/history/stats"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_rides"], 2);
    assert_eq!(body["distance_km"], 43.1);
    assert_eq!(body["total_spent"], 1377);
}
