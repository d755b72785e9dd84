use crate::catalog::VELIPOTS;
use crate::geo::{haversine_km, planar_distance};
use crate::models::location::Location;
use crate::models::route::Route;

pub const BASE_FARE_INR: f64 = 150.0;
pub const PER_KM_RATE_INR: f64 = 25.0;
pub const AVERAGE_SPEED_KMH: f64 = 60.0;

/// Distance, duration, price and pickup velipot for a pair of locations.
///
/// Pure: the same pair always yields the same route. Duration and price are
/// derived from the unrounded distance; only the reported distance is rounded
/// to two decimals.
pub fn compute_route(origin: &Location, destination: &Location) -> Route {
    let distance_km = haversine_km(&origin.coordinates, &destination.coordinates);

    Route {
        id: format!("route_{}_{}", origin.id, destination.id),
        origin: origin.clone(),
        destination: destination.clone(),
        distance_km: round_to_cents(distance_km),
        duration_minutes: duration_minutes(distance_km),
        price: price(distance_km),
        velipot: nearest_velipot(origin).clone(),
    }
}

/// Velipot closest to `origin` by planar distance in degrees. Ties keep the
/// earlier station.
pub fn nearest_velipot(origin: &Location) -> &'static Location {
    let mut nearest = &VELIPOTS[0];
    let mut best = planar_distance(&origin.coordinates, &nearest.coordinates);

    for velipot in &VELIPOTS[1..] {
        let candidate = planar_distance(&origin.coordinates, &velipot.coordinates);
        if candidate < best {
            nearest = velipot;
            best = candidate;
        }
    }

    nearest
}

// km / (km/h) gives hours, times 60 for minutes. At 60 km/h that is one minute per km.
fn duration_minutes(distance_km: f64) -> u32 {
    ((distance_km / AVERAGE_SPEED_KMH) * 60.0).round() as u32
}

fn price(distance_km: f64) -> u32 {
    (BASE_FARE_INR + distance_km * PER_KM_RATE_INR).round() as u32
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
