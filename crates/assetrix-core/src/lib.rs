//! Core domain types for the Assetrix demo service.
//!
//! This crate provides the types shared by the HTTP layer:
//!
//! - [`GreetingResponse`], [`HealthResponse`], [`VersionResponse`]: JSON bodies
//! - [`Clock`] with [`SystemClock`] and [`ManualClock`]: time source for handlers
//! - [`format_timestamp`]: ISO-8601 rendering used by every body
//!
//! # Example
//!
//! ```rust
//! use assetrix_core::{HealthResponse, ManualClock};
//!
//! let clock = ManualClock::default();
//! let body = HealthResponse::healthy(&clock);
//! assert_eq!(body.timestamp, "1970-01-01T00:00:00.000000000Z");
//! assert_eq!(body.uptime, 0.0);
//! ```

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Greeting returned from the root route.
pub const GREETING_MESSAGE: &str = "Hello World from Assetrix DevOps Demo!";

/// Application version reported by `/api/version`.
pub const APP_VERSION: &str = "1.0.0";

/// Application name reported by `/api/version`.
pub const APP_NAME: &str = "assetrix-demo-app";

/// Environment label used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Renders a timestamp as ISO-8601 UTC with nanosecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreetingResponse {
    pub message: String,
    pub timestamp: String,
    pub environment: String,
}

impl GreetingResponse {
    pub fn new(clock: &dyn Clock, environment: impl Into<String>) -> Self {
        Self {
            message: GREETING_MESSAGE.to_string(),
            timestamp: format_timestamp(clock.next_timestamp()),
            environment: environment.into(),
        }
    }
}

/// Reported service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The process is up and answering requests.
    Healthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Seconds since process start.
    pub uptime: f64,
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds a healthy report from the clock's uptime and current time.
    pub fn healthy(clock: &dyn Clock) -> Self {
        Self {
            status: HealthStatus::Healthy,
            uptime: clock.uptime().as_secs_f64(),
            timestamp: format_timestamp(clock.now()),
        }
    }
}

/// Body of `GET /api/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub name: String,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            version: APP_VERSION.to_string(),
            name: APP_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_timestamp_nanos_utc() {
        let at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00.5+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(at), "2023-12-31T22:00:00.500000000Z");
    }

    #[test]
    fn test_greeting_response() {
        let clock = ManualClock::default();
        clock.advance(Duration::from_millis(1_250));

        let body = GreetingResponse::new(&clock, "staging");
        assert!(body.message.contains("Hello World from Assetrix DevOps Demo"));
        assert_eq!(body.timestamp, "1970-01-01T00:00:01.250000000Z");
        assert_eq!(body.environment, "staging");
    }

    #[test]
    fn test_health_response_serializes_lowercase_status() {
        let clock = ManualClock::default();
        clock.advance(Duration::from_secs(3));

        let body = HealthResponse::healthy(&clock);
        assert_eq!(body.status.as_str(), "healthy");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptime"], 3.0);
        assert_eq!(json["timestamp"], "1970-01-01T00:00:03.000000000Z");
    }

    #[test]
    fn test_version_response_constants() {
        let body = VersionResponse::default();
        assert_eq!(body.version, "1.0.0");
        assert_eq!(body.name, "assetrix-demo-app");
    }
}
