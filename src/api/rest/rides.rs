use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::history::{filter, stats, HistoryFilter, HistoryStats};
use crate::engine::runner::{demo_route, start_ride, verify_ride, DEMO_DRONE_ID};
use crate::engine::tracking::{TrackingSimulator, TrackingUpdate};
use crate::error::AppError;
use crate::models::ride::RideRecord;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rides/demo", post(start_demo_ride))
        .route("/rides/history", get(list_history))
        .route("/rides/history/stats", get(history_stats))
        .route("/rides/:id", get(get_ride))
        .route("/rides/:id/verify", post(verify))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct RideResponse {
    pub id: Uuid,
    pub verification_code: Option<&'static str>,
    #[serde(flatten)]
    pub ride: TrackingSimulator,
}

async fn start_demo_ride(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RideResponse>, AppError> {
    let id = start_ride(&state, demo_route()?, DEMO_DRONE_ID);
    ride_response(&state, id).map(Json)
}

async fn get_ride(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>, AppError> {
    ride_response(&state, id).map(Json)
}

async fn verify(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrackingUpdate>, AppError> {
    verify_ride(&state, id).map(Json)
}

async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<RideRecord>>, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => HistoryFilter::parse(raw)?,
        None => HistoryFilter::default(),
    };

    Ok(Json(filter(&state.history, status)))
}

async fn history_stats(State(state): State<Arc<AppState>>) -> Json<HistoryStats> {
    Json(stats(&state.history))
}

fn ride_response(state: &AppState, id: Uuid) -> Result<RideResponse, AppError> {
    let ride = state
        .rides
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("ride {} not found", id)))?;

    Ok(RideResponse {
        id,
        verification_code: ride.verification_code(),
        ride: ride.clone(),
    })
}
