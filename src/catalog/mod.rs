//! Fixed Bangalore catalog: bookable locations, velipots and the drone fleet.

use crate::models::drone::{Drone, DroneStatus};
use crate::models::location::{GeoPoint, Location, LocationCategory};

const fn location(
    id: &'static str,
    name: &'static str,
    area: &'static str,
    lng: f64,
    lat: f64,
    category: LocationCategory,
) -> Location {
    Location {
        id,
        name,
        area,
        coordinates: GeoPoint::new(lng, lat),
        category,
    }
}

#[rustfmt::skip]
pub static LOCATIONS: [Location; 10] = [
    location("koramangala", "Koramangala", "South Bangalore", 77.6309, 12.9279, LocationCategory::Pickup),
    location("indiranagar", "Indiranagar", "East Bangalore", 77.6408, 12.9784, LocationCategory::Pickup),
    location("whitefield", "Whitefield", "East Bangalore", 77.7500, 12.9698, LocationCategory::Pickup),
    location("electronic_city", "Electronic City", "South Bangalore", 77.6648, 12.8456, LocationCategory::Pickup),
    location("mg_road", "MG Road", "Central Bangalore", 77.6033, 12.9762, LocationCategory::Pickup),
    location("airport", "Kempegowda International Airport", "North Bangalore", 77.7064, 13.1986, LocationCategory::Dropoff),
    location("hebbal", "Hebbal", "North Bangalore", 77.5946, 13.0358, LocationCategory::Pickup),
    location("jayanagar", "Jayanagar", "South Bangalore", 77.5833, 12.9254, LocationCategory::Pickup),
    location("btm_layout", "BTM Layout", "South Bangalore", 77.6100, 12.9166, LocationCategory::Pickup),
    location("marathahalli", "Marathahalli", "East Bangalore", 77.6973, 12.9591, LocationCategory::Pickup),
];

/// Relay stations. Order matters: nearest-station ties go to the earlier entry.
#[rustfmt::skip]
pub static VELIPOTS: [Location; 4] = [
    location("velipot_central", "Central Velipot", "Cubbon Park", 77.5946, 12.9716, LocationCategory::Velipot),
    location("velipot_south", "South Velipot", "Bannerghatta Road", 77.5946, 12.8969, LocationCategory::Velipot),
    location("velipot_east", "East Velipot", "Sarjapur Road", 77.6973, 12.9298, LocationCategory::Velipot),
    location("velipot_north", "North Velipot", "Yelahanka", 77.5946, 13.1007, LocationCategory::Velipot),
];

pub static DRONES: [Drone; 3] = [
    Drone {
        id: "AERO_001",
        model: "AeroTaxi Pro X1",
        status: DroneStatus::Available,
        location: GeoPoint::new(77.5946, 12.9716),
        battery_level: 95,
        capacity: 2,
    },
    Drone {
        id: "AERO_002",
        model: "AeroTaxi Pro X1",
        status: DroneStatus::Available,
        location: GeoPoint::new(77.6973, 12.9298),
        battery_level: 87,
        capacity: 2,
    },
    Drone {
        id: "AERO_003",
        model: "AeroTaxi Max X2",
        status: DroneStatus::InTransit,
        location: GeoPoint::new(77.6408, 12.9784),
        battery_level: 72,
        capacity: 4,
    },
];

/// Looks up a bookable location or a velipot by id.
pub fn find(id: &str) -> Option<&'static Location> {
    LOCATIONS
        .iter()
        .chain(VELIPOTS.iter())
        .find(|location| location.id == id)
}

pub fn search(query: &str, category: Option<LocationCategory>) -> Vec<&'static Location> {
    LOCATIONS
        .iter()
        .filter(|location| category.is_none_or(|category| location.category == category))
        .filter(|location| location.matches(query))
        .collect()
}

/// First available drone in fleet order.
pub fn available_drone() -> Option<&'static Drone> {
    DRONES
        .iter()
        .find(|drone| drone.status == DroneStatus::Available)
}
