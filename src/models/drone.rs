use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    Available,
    InTransit,
    Maintenance,
}

#[derive(Debug, Clone, Serialize)]
pub struct Drone {
    pub id: &'static str,
    pub model: &'static str,
    pub status: DroneStatus,
    pub location: GeoPoint,
    pub battery_level: u8,
    pub capacity: u8,
}

/// Flight telemetry reported next to the tracked position. Fixed for the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Telemetry {
    pub heading_deg: f64,
    pub altitude_m: f64,
    pub speed_kmh: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            heading_deg: 45.0,
            altitude_m: 150.0,
            speed_kmh: 65.0,
        }
    }
}
