//! Scripted flight of a single ride: a fixed status sequence, one position
//! rule per status and a verification hold at pickup.
//!
//! Nothing here reads the wall clock or a global RNG. Callers pass `now` and an
//! `Rng` into every step, so the simulation can be replayed exactly in tests.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::error::AppError;
use crate::geo::lerp;
use crate::models::drone::Telemetry;
use crate::models::location::GeoPoint;
use crate::models::ride::RideStatus;
use crate::models::route::Route;

pub const VERIFICATION_CODE: &str = "AX-7429";
pub const INITIAL_ETA_MINUTES: i64 = 12;
/// Half-width of the square the drone wanders in while dispatched, in degrees.
pub const DISPATCH_JITTER_DEG: f64 = 0.005;
pub const PICKUP_APPROACH_FRACTION: f64 = 0.6;
pub const TRANSIT_FRACTION: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionRule {
    /// Uniform jitter around the velipot.
    NearVelipot,
    AtVelipot,
    /// Straight-line fraction from velipot to pickup.
    TowardPickup(f64),
    AtPickup,
    /// Straight-line fraction from pickup to destination.
    TowardDestination(f64),
    AtDestination,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub status: RideStatus,
    pub rule: PositionRule,
}

#[rustfmt::skip]
pub const SEQUENCE: [Stage; 8] = [
    Stage { status: RideStatus::Confirmed, rule: PositionRule::AtVelipot },
    Stage { status: RideStatus::DroneDispatched, rule: PositionRule::NearVelipot },
    Stage { status: RideStatus::AtVelipot, rule: PositionRule::AtVelipot },
    Stage { status: RideStatus::EnRouteToPickup, rule: PositionRule::TowardPickup(PICKUP_APPROACH_FRACTION) },
    Stage { status: RideStatus::PassengerPickup, rule: PositionRule::AtPickup },
    Stage { status: RideStatus::PassengerVerified, rule: PositionRule::AtPickup },
    Stage { status: RideStatus::InTransit, rule: PositionRule::TowardDestination(TRANSIT_FRACTION) },
    Stage { status: RideStatus::Completed, rule: PositionRule::AtDestination },
];

/// Status that opens the verification prompt.
pub const VERIFICATION_STATUS: RideStatus = RideStatus::PassengerPickup;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackingUpdate {
    pub status: RideStatus,
    pub label: &'static str,
    pub position: GeoPoint,
    pub estimated_arrival: DateTime<Utc>,
    pub verification_pending: bool,
    pub passenger_verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingSimulator {
    route: Route,
    drone_id: String,
    telemetry: Telemetry,
    #[serde(skip)]
    cursor: usize,
    status: RideStatus,
    position: GeoPoint,
    estimated_arrival: DateTime<Utc>,
    step_minutes: i64,
    verification_pending: bool,
    passenger_verified: bool,
}

impl TrackingSimulator {
    pub fn new(
        route: Route,
        drone_id: impl Into<String>,
        step_minutes: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let position = route.velipot.coordinates;

        Self {
            route,
            drone_id: drone_id.into(),
            telemetry: Telemetry::default(),
            cursor: 0,
            status: SEQUENCE[0].status,
            position,
            estimated_arrival: now + Duration::minutes(INITIAL_ETA_MINUTES),
            step_minutes,
            verification_pending: false,
            passenger_verified: false,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn drone_id(&self) -> &str {
        &self.drone_id
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn estimated_arrival(&self) -> DateTime<Utc> {
        self.estimated_arrival
    }

    pub fn verification_pending(&self) -> bool {
        self.verification_pending
    }

    pub fn passenger_verified(&self) -> bool {
        self.passenger_verified
    }

    pub fn verification_code(&self) -> Option<&'static str> {
        self.verification_pending.then_some(VERIFICATION_CODE)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == SEQUENCE.len() - 1
    }

    pub fn snapshot(&self) -> TrackingUpdate {
        TrackingUpdate {
            status: self.status,
            label: self.status.label(),
            position: self.position,
            estimated_arrival: self.estimated_arrival,
            verification_pending: self.verification_pending,
            passenger_verified: self.passenger_verified,
        }
    }

    /// One timer step. Returns `None` once completed, and while the passenger
    /// has not yet confirmed the verification code.
    pub fn tick<R: Rng>(&mut self, now: DateTime<Utc>, rng: &mut R) -> Option<TrackingUpdate> {
        if self.is_finished() || self.verification_pending {
            return None;
        }

        self.enter(self.cursor + 1, now, rng);
        Some(self.snapshot())
    }

    /// Accepts the verification code and jumps straight to the verified stage.
    pub fn verify<R: Rng>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<TrackingUpdate, AppError> {
        if !self.verification_pending {
            return Err(AppError::Conflict(format!(
                "no verification pending while {}",
                self.status.as_str()
            )));
        }

        self.verification_pending = false;
        self.passenger_verified = true;
        self.enter(self.cursor + 1, now, rng);
        Ok(self.snapshot())
    }

    fn enter<R: Rng>(&mut self, cursor: usize, now: DateTime<Utc>, rng: &mut R) {
        let stage = SEQUENCE[cursor];
        let remaining = (SEQUENCE.len() - cursor - 1) as i64;

        self.cursor = cursor;
        self.status = stage.status;
        self.position = self.position_for(stage.rule, rng);
        self.estimated_arrival = now + Duration::minutes(remaining * self.step_minutes);
        self.verification_pending = stage.status == VERIFICATION_STATUS;
    }

    fn position_for<R: Rng>(&self, rule: PositionRule, rng: &mut R) -> GeoPoint {
        let velipot = self.route.velipot.coordinates;
        let pickup = self.route.origin.coordinates;
        let destination = self.route.destination.coordinates;

        match rule {
            PositionRule::NearVelipot => GeoPoint {
                lng: velipot.lng + rng.gen_range(-DISPATCH_JITTER_DEG..DISPATCH_JITTER_DEG),
                lat: velipot.lat + rng.gen_range(-DISPATCH_JITTER_DEG..DISPATCH_JITTER_DEG),
            },
            PositionRule::AtVelipot => velipot,
            PositionRule::TowardPickup(fraction) => lerp(&velipot, &pickup, fraction),
            PositionRule::AtPickup => pickup,
            PositionRule::TowardDestination(fraction) => lerp(&pickup, &destination, fraction),
            PositionRule::AtDestination => destination,
        }
    }
}
