use crate::models::location::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Euclidean distance in raw degrees. Only good for ranking nearby points.
pub fn planar_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lng = a.lng - b.lng;
    let d_lat = a.lat - b.lat;
    (d_lng * d_lng + d_lat * d_lat).sqrt()
}

/// Point at `fraction` of the straight segment from `from` to `to`.
pub fn lerp(from: &GeoPoint, to: &GeoPoint, fraction: f64) -> GeoPoint {
    GeoPoint {
        lng: from.lng + (to.lng - from.lng) * fraction,
        lat: from.lat + (to.lat - from.lat) * fraction,
    }
}
