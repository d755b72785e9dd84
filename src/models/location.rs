use serde::{Deserialize, Serialize};

/// A WGS84 coordinate. Longitude comes first, matching how map clients take it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Pickup,
    Dropoff,
    Velipot,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub area: &'static str,
    pub coordinates: GeoPoint,
    pub category: LocationCategory,
}

impl Location {
    /// Case-insensitive substring match against name or area. An empty query matches.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query) || self.area.to_lowercase().contains(&query)
    }
}
