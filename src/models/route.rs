use serde::Serialize;

use crate::models::location::Location;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Route {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub price: u32,
    pub velipot: Location,
}
