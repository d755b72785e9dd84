use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::payment::select_method;
use crate::engine::runner::pay;
use crate::error::AppError;
use crate::models::payment::{Payment, PaymentMethod};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments/:id", get(get_payment))
        .route("/payments/:id/method", put(update_method))
        .route("/payments/:id/pay", post(start_payment))
}

#[derive(Deserialize)]
pub struct UpdateMethodRequest {
    pub method: PaymentMethod,
}

async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let payment = state.payments.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(payment.value().clone()))
}

async fn update_method(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMethodRequest>,
) -> Result<Json<Payment>, AppError> {
    let mut payment = state.payments.get_mut(&id).ok_or_else(|| not_found(id))?;
    select_method(&mut payment, payload.method, Utc::now())?;

    Ok(Json(payment.clone()))
}

async fn start_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    pay(&state, id).map(Json)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("payment {} not found", id))
}
