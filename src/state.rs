use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::config::Timings;
use crate::engine::booking::BookingFlow;
use crate::engine::history::seed_history;
use crate::engine::tracking::{TrackingSimulator, TrackingUpdate};
use crate::error::AppError;
use crate::models::payment::Payment;
use crate::models::profile::Profile;
use crate::models::ride::RideRecord;
use crate::observability::metrics::Metrics;

/// A tracking update tagged with the ride it belongs to, as sent to subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct RideEvent {
    pub ride_id: Uuid,
    #[serde(flatten)]
    pub update: TrackingUpdate,
}

pub struct AppState {
    pub bookings: DashMap<Uuid, BookingFlow>,
    pub payments: DashMap<Uuid, Payment>,
    pub rides: DashMap<Uuid, TrackingSimulator>,
    pub history: Vec<RideRecord>,
    pub profile: RwLock<Profile>,
    pub ride_events_tx: broadcast::Sender<RideEvent>,
    pub timings: Timings,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, timings: Timings) -> Result<Self, AppError> {
        timings.validate()?;
        let (ride_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Ok(Self {
            bookings: DashMap::new(),
            payments: DashMap::new(),
            rides: DashMap::new(),
            history: seed_history(Utc::now())?,
            profile: RwLock::new(Profile::default()),
            ride_events_tx,
            timings,
            metrics: Metrics::new(),
        })
    }
}
