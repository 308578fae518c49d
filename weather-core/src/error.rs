use std::path::PathBuf;

use crate::category::WeatherCategory;

/// Failures while building a calendar from user input.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Unknown time zone '{0}'. Use an IANA name such as \"Europe/Rome\" or \"UTC\".")]
    UnknownZone(String),
    #[error("UTC offset of {0} seconds is out of range")]
    OffsetOutOfRange(i32),
}

/// Failures while decoding an upstream forecast payload.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Failed to parse forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Forecast entry #{index} has no weather condition")]
    MissingCondition { index: usize },
    #[error("Forecast entry #{index} has an unrepresentable timestamp ({dt})")]
    InvalidTimestamp { index: usize, dt: f64 },
}

/// Failures while loading or querying the display scheme table.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("Failed to read scheme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse scheme JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No display scheme configured for '{0}'")]
    Missing(WeatherCategory),
}
