use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{self, DRONES, VELIPOTS};
use crate::engine::pricing::compute_route;
use crate::error::AppError;
use crate::models::drone::Drone;
use crate::models::location::{Location, LocationCategory};
use crate::models::route::Route;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/locations/:id", get(get_location))
        .route("/velipots", get(list_velipots))
        .route("/drones", get(list_drones))
        .route("/routes/:origin/:destination", get(get_route))
}

#[derive(Deserialize, Default)]
pub struct LocationQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<LocationCategory>,
}

async fn list_locations(Query(query): Query<LocationQuery>) -> Json<Vec<Location>> {
    let locations = catalog::search(&query.q, query.category)
        .into_iter()
        .cloned()
        .collect();
    Json(locations)
}

async fn get_location(Path(id): Path<String>) -> Result<Json<Location>, AppError> {
    lookup(&id).map(|location| Json(location.clone()))
}

async fn list_velipots() -> Json<Vec<Location>> {
    Json(VELIPOTS.to_vec())
}

async fn list_drones() -> Json<Vec<Drone>> {
    Json(DRONES.to_vec())
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path((origin, destination)): Path<(String, String)>,
) -> Result<Json<Route>, AppError> {
    let route = compute_route(lookup(&origin)?, lookup(&destination)?);
    state.metrics.routes_computed_total.inc();

    debug!(
        route_id = %route.id,
        distance_km = route.distance_km,
        price = route.price,
        "route computed"
    );
    Ok(Json(route))
}

pub(crate) fn lookup(id: &str) -> Result<&'static Location, AppError> {
    catalog::find(id).ok_or_else(|| AppError::NotFound(format!("location {} not found", id)))
}
