//! Drives tracking simulators and the payment stage on tokio timers.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{available_drone, find};
use crate::engine::payment::{complete, start_processing};
use crate::engine::pricing::compute_route;
use crate::engine::tracking::{TrackingSimulator, TrackingUpdate};
use crate::error::AppError;
use crate::models::payment::Payment;
use crate::models::route::Route;
use crate::state::{AppState, RideEvent};

pub const DEMO_DRONE_ID: &str = "AERO_001";

/// Koramangala to the airport, picked up at Cubbon Park. Used when tracking is
/// opened without a booking.
pub fn demo_route() -> Result<Route, AppError> {
    let origin = find("koramangala").ok_or_else(|| missing("koramangala"))?;
    let destination = find("airport").ok_or_else(|| missing("airport"))?;
    let velipot = find("velipot_central").ok_or_else(|| missing("velipot_central"))?;

    let mut route = compute_route(origin, destination);
    route.velipot = velipot.clone();
    Ok(route)
}

/// Registers a simulator for `route` and spawns its timer task.
pub fn start_ride(state: &Arc<AppState>, route: Route, drone_id: &str) -> Uuid {
    let ride_id = Uuid::new_v4();
    let simulator =
        TrackingSimulator::new(route, drone_id, state.timings.step_minutes, Utc::now());

    info!(
        ride_id = %ride_id,
        route_id = %simulator.route().id,
        drone_id,
        "ride started"
    );

    state.rides.insert(ride_id, simulator);
    state.metrics.active_rides.inc();
    tokio::spawn(run_ride(state.clone(), ride_id));

    ride_id
}

pub async fn run_ride(state: Arc<AppState>, ride_id: Uuid) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = interval(state.timings.step_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let (update, finished) = {
            let Some(mut simulator) = state.rides.get_mut(&ride_id) else {
                warn!(ride_id = %ride_id, "ride vanished; stopping simulation");
                break;
            };
            let update = simulator.tick(Utc::now(), &mut rng);
            (update, simulator.is_finished())
        };

        if let Some(update) = update {
            let opens_verification = update.verification_pending;
            publish(&state, ride_id, update);

            if opens_verification {
                if let Some(delay) = state.timings.auto_verify_delay {
                    tokio::spawn(auto_verify(state.clone(), ride_id, delay));
                }
            }
        }

        if finished {
            break;
        }
    }

    state.metrics.active_rides.dec();
    info!(ride_id = %ride_id, "ride simulation finished");
}

/// Passenger showed the code to the drone camera.
pub fn verify_ride(state: &AppState, ride_id: Uuid) -> Result<TrackingUpdate, AppError> {
    let update = {
        let mut simulator = state
            .rides
            .get_mut(&ride_id)
            .ok_or_else(|| AppError::NotFound(format!("ride {} not found", ride_id)))?;
        simulator.verify(Utc::now(), &mut rand::thread_rng())?
    };

    info!(ride_id = %ride_id, "passenger verified");
    publish(state, ride_id, update.clone());
    Ok(update)
}

async fn auto_verify(state: Arc<AppState>, ride_id: Uuid, delay: std::time::Duration) {
    sleep(delay).await;

    if let Err(err) = verify_ride(&state, ride_id) {
        debug!(ride_id = %ride_id, error = %err, "auto-verification skipped");
    }
}

/// Moves a pending payment into processing and schedules its settlement.
pub fn pay(state: &Arc<AppState>, payment_id: Uuid) -> Result<Payment, AppError> {
    let payment = {
        let mut payment = state
            .payments
            .get_mut(&payment_id)
            .ok_or_else(|| AppError::NotFound(format!("payment {} not found", payment_id)))?;
        start_processing(&mut payment, Utc::now())?;
        payment.clone()
    };

    state
        .metrics
        .payments_total
        .with_label_values(&[payment.method.as_str()])
        .inc();
    info!(
        payment_id = %payment_id,
        amount = payment.amount,
        method = payment.method.as_str(),
        "payment processing"
    );

    tokio::spawn(settle_payment(state.clone(), payment_id));
    Ok(payment)
}

async fn settle_payment(state: Arc<AppState>, payment_id: Uuid) {
    sleep(state.timings.payment_processing).await;

    let Some(route) = state.payments.get(&payment_id).map(|p| p.route.clone()) else {
        warn!(payment_id = %payment_id, "payment vanished before settlement");
        return;
    };

    let drone_id = available_drone().map_or(DEMO_DRONE_ID, |drone| drone.id);
    let ride_id = start_ride(&state, route, drone_id);

    if let Some(mut payment) = state.payments.get_mut(&payment_id) {
        match complete(&mut payment, ride_id, Utc::now()) {
            Ok(()) => info!(payment_id = %payment_id, ride_id = %ride_id, "payment completed"),
            Err(err) => {
                warn!(payment_id = %payment_id, error = %err, "failed to complete payment")
            }
        }
    }
}

fn publish(state: &AppState, ride_id: Uuid, update: TrackingUpdate) {
    state
        .metrics
        .tracking_transitions_total
        .with_label_values(&[update.status.as_str()])
        .inc();

    info!(
        ride_id = %ride_id,
        status = update.status.as_str(),
        lng = update.position.lng,
        lat = update.position.lat,
        "ride status changed"
    );

    let _ = state.ride_events_tx.send(RideEvent { ride_id, update });
}

fn missing(id: &str) -> AppError {
    AppError::Internal(format!("catalog is missing {id}"))
}
