use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub timings: Timings,
}

/// Pacing of the scripted payment and tracking stages.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub step_interval: Duration,
    /// Minutes of estimated flight time each remaining stage adds to the ETA.
    pub step_minutes: i64,
    /// `None` leaves verification to the passenger.
    pub auto_verify_delay: Option<Duration>,
    pub payment_processing: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(4_000),
            step_minutes: 2,
            auto_verify_delay: Some(Duration::from_millis(3_000)),
            payment_processing: Duration::from_millis(2_000),
        }
    }
}

impl Timings {
    /// Rejects pacing the ride timer cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.step_interval.is_zero() {
            return Err(AppError::Internal(
                "invalid TRACKING_STEP_INTERVAL_MS: must be > 0".to_string(),
            ));
        }

        if self.step_minutes < 0 {
            return Err(AppError::Internal(
                "invalid TRACKING_STEP_MINUTES: must be >= 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        let defaults = Timings::default();

        let auto_verify_ms: u64 = parse_or_default("AUTO_VERIFY_DELAY_MS", 3_000)?;
        let step_minutes: u32 =
            parse_or_default("TRACKING_STEP_MINUTES", defaults.step_minutes as u32)?;

        let config = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            timings: Timings {
                step_interval: Duration::from_millis(parse_or_default(
                    "TRACKING_STEP_INTERVAL_MS",
                    defaults.step_interval.as_millis() as u64,
                )?),
                step_minutes: i64::from(step_minutes),
                auto_verify_delay: (auto_verify_ms > 0)
                    .then(|| Duration::from_millis(auto_verify_ms)),
                payment_processing: Duration::from_millis(parse_or_default(
                    "PAYMENT_PROCESSING_MS",
                    defaults.payment_processing.as_millis() as u64,
                )?),
            },
        };

        config.timings.validate()?;
        Ok(config)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
