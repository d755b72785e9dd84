use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub routes_computed_total: IntCounter,
    pub bookings_total: IntCounterVec,
    pub payments_total: IntCounterVec,
    pub active_rides: IntGauge,
    pub tracking_transitions_total: IntCounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let routes_computed_total =
            IntCounter::new("routes_computed_total", "Route estimates computed")
                .expect("valid routes_computed_total metric");

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Booking selections by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let payments_total = IntCounterVec::new(
            Opts::new("payments_total", "Payments started by method"),
            &["method"],
        )
        .expect("valid payments_total metric");

        let active_rides =
            IntGauge::new("active_rides", "Rides whose simulation is still running")
                .expect("valid active_rides metric");

        let tracking_transitions_total = IntCounterVec::new(
            Opts::new("tracking_transitions_total", "Ride status transitions by target status"),
            &["status"],
        )
        .expect("valid tracking_transitions_total metric");

        registry
            .register(Box::new(routes_computed_total.clone()))
            .expect("register routes_computed_total");
        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(payments_total.clone()))
            .expect("register payments_total");
        registry
            .register(Box::new(active_rides.clone()))
            .expect("register active_rides");
        registry
            .register(Box::new(tracking_transitions_total.clone()))
            .expect("register tracking_transitions_total");

        Self {
            registry,
            routes_computed_total,
            bookings_total,
            payments_total,
            active_rides,
            tracking_transitions_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
