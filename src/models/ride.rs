use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::route::Route;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Booked,
    Confirmed,
    DroneDispatched,
    AtVelipot,
    EnRouteToPickup,
    PassengerPickup,
    PassengerVerified,
    InTransit,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Booked => "booked",
            RideStatus::Confirmed => "confirmed",
            RideStatus::DroneDispatched => "drone_dispatched",
            RideStatus::AtVelipot => "at_velipot",
            RideStatus::EnRouteToPickup => "en_route_to_pickup",
            RideStatus::PassengerPickup => "passenger_pickup",
            RideStatus::PassengerVerified => "passenger_verified",
            RideStatus::InTransit => "in_transit",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label shown next to the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            RideStatus::Booked => "Booked",
            RideStatus::Confirmed => "Ride Confirmed",
            RideStatus::DroneDispatched => "Drone Dispatched",
            RideStatus::AtVelipot => "Drone at Velipot",
            RideStatus::EnRouteToPickup => "Flying to Pickup",
            RideStatus::PassengerPickup => "Arrived for Pickup",
            RideStatus::PassengerVerified => "Passenger Verified",
            RideStatus::InTransit => "Flying to Destination",
            RideStatus::Completed => "Ride Completed",
            RideStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RideRecord {
    pub id: String,
    pub route: Route,
    pub status: RideStatus,
    pub booked_at: DateTime<Utc>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub passenger_verified: Option<bool>,
    pub drone_id: String,
}
