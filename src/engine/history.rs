use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::catalog::find;
use crate::engine::pricing::compute_route;
use crate::error::AppError;
use crate::models::ride::{RideRecord, RideStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Completed,
    Cancelled,
}

impl HistoryFilter {
    pub fn admits(&self, status: RideStatus) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Completed => status == RideStatus::Completed,
            HistoryFilter::Cancelled => status == RideStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HistoryStats {
    pub total_rides: usize,
    /// Sum of route distances, to one decimal.
    pub distance_km: f64,
    pub total_spent: u32,
}

impl HistoryFilter {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "all" => Ok(HistoryFilter::All),
            "completed" => Ok(HistoryFilter::Completed),
            "cancelled" => Ok(HistoryFilter::Cancelled),
            other => Err(AppError::BadRequest(format!(
                "unknown status filter: {other}, expected all/completed/cancelled"
            ))),
        }
    }
}

/// Past rides shown on the history screen, dated relative to `now`.
pub fn seed_history(now: DateTime<Utc>) -> Result<Vec<RideRecord>, AppError> {
    Ok(vec![
        past_ride(
            "ride_001",
            "koramangala",
            "airport",
            now - Duration::days(2),
            45,
            "AERO_001",
        )?,
        past_ride(
            "ride_002",
            "indiranagar",
            "whitefield",
            now - Duration::days(7),
            30,
            "AERO_002",
        )?,
    ])
}

pub fn filter(records: &[RideRecord], filter: HistoryFilter) -> Vec<RideRecord> {
    records
        .iter()
        .filter(|record| filter.admits(record.status))
        .cloned()
        .collect()
}

pub fn stats(records: &[RideRecord]) -> HistoryStats {
    let distance_km: f64 = records.iter().map(|record| record.route.distance_km).sum();

    HistoryStats {
        total_rides: records.len(),
        distance_km: (distance_km * 10.0).round() / 10.0,
        total_spent: records.iter().map(|record| record.route.price).sum(),
    }
}

fn past_ride(
    id: &str,
    origin: &str,
    destination: &str,
    booked_at: DateTime<Utc>,
    flight_minutes: i64,
    drone_id: &str,
) -> Result<RideRecord, AppError> {
    let origin =
        find(origin).ok_or_else(|| AppError::Internal(format!("unknown location {origin}")))?;
    let destination = find(destination)
        .ok_or_else(|| AppError::Internal(format!("unknown location {destination}")))?;

    Ok(RideRecord {
        id: id.to_string(),
        route: compute_route(origin, destination),
        status: RideStatus::Completed,
        booked_at,
        estimated_arrival: None,
        actual_arrival: Some(booked_at + Duration::minutes(flight_minutes)),
        passenger_verified: Some(true),
        drone_id: drone_id.to_string(),
    })
}
