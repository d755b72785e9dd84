use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::locations::lookup;
use crate::engine::booking::{BookingFlow, Candidate, SelectOutcome};
use crate::engine::payment::open_payment;
use crate::error::AppError;
use crate::models::payment::Payment;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/query", put(update_query))
        .route("/bookings/:id/candidates", get(list_candidates))
        .route("/bookings/:id/select", post(select_location))
        .route("/bookings/:id/reset", post(reset_booking))
        .route("/bookings/:id/confirm", post(confirm_booking))
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub flow: BookingFlow,
}

#[derive(Deserialize)]
pub struct UpdateQueryRequest {
    pub query: String,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub location_id: String,
}

async fn create_booking(State(state): State<Arc<AppState>>) -> Json<BookingResponse> {
    let id = Uuid::new_v4();
    let flow = BookingFlow::new();
    state.bookings.insert(id, flow.clone());

    info!(booking_id = %id, "booking started");
    Json(BookingResponse { id, flow })
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let flow = state
        .bookings
        .get(&id)
        .ok_or_else(|| not_found(id))?
        .clone();

    Ok(Json(BookingResponse { id, flow }))
}

async fn update_query(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQueryRequest>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let mut flow = state.bookings.get_mut(&id).ok_or_else(|| not_found(id))?;
    flow.set_query(payload.query);

    Ok(Json(flow.candidates()))
}

async fn list_candidates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let flow = state.bookings.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(flow.candidates()))
}

async fn select_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let location = lookup(&payload.location_id)?;

    let mut flow = state.bookings.get_mut(&id).ok_or_else(|| not_found(id))?;
    let outcome = flow.select(location);

    match outcome {
        SelectOutcome::OriginChosen => {
            state.metrics.bookings_total.with_label_values(&["origin"]).inc();
            info!(booking_id = %id, origin = location.id, "origin chosen");
        }
        SelectOutcome::DestinationChosen(route) => {
            state.metrics.bookings_total.with_label_values(&["route"]).inc();
            state.metrics.routes_computed_total.inc();
            info!(
                booking_id = %id,
                route_id = %route.id,
                distance_km = route.distance_km,
                price = route.price,
                "route chosen"
            );
        }
        SelectOutcome::Rejected(rejection) => {
            state.metrics.bookings_total.with_label_values(&["rejected"]).inc();
            return Err(AppError::Conflict(rejection.message().to_string()));
        }
    }

    Ok(Json(BookingResponse {
        id,
        flow: flow.clone(),
    }))
}

async fn reset_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let mut flow = state.bookings.get_mut(&id).ok_or_else(|| not_found(id))?;
    flow.reset();

    Ok(Json(BookingResponse {
        id,
        flow: flow.clone(),
    }))
}

async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let route = state
        .bookings
        .get(&id)
        .ok_or_else(|| not_found(id))?
        .confirm()
        .ok_or_else(|| {
            AppError::Conflict("choose an origin and a destination first".to_string())
        })?;

    let payment = open_payment(route, Utc::now());
    state.payments.insert(payment.id, payment.clone());
    state.metrics.bookings_total.with_label_values(&["confirmed"]).inc();

    info!(
        booking_id = %id,
        payment_id = %payment.id,
        amount = payment.amount,
        "booking confirmed"
    );
    Ok(Json(payment))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("booking {} not found", id))
}
