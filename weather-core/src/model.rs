use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{WeatherCategory, classify};

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    /// Kelvin in upstream data.
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Code of the primary weather entry for the interval.
    pub condition_code: i32,
}

impl ForecastSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature_min: f64,
        temperature_max: f64,
        condition_code: i32,
    ) -> Self {
        Self { timestamp, temperature_min, temperature_max, condition_code }
    }
}

/// Reduction of all samples that fall on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Start-of-day instant in the calendar used for aggregation.
    pub day: DateTime<Utc>,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub dominant_condition_code: i32,
    /// Number of samples reduced into this day.
    pub sample_count: usize,
}

impl DailySummary {
    pub fn category(&self) -> WeatherCategory {
        classify(self.dominant_condition_code)
    }
}

/// City metadata carried by the forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    /// Shift in seconds from UTC.
    pub timezone_offset_secs: Option<i32>,
}

impl City {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Decoded forecast: the samples plus whatever location info came with them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub city: Option<City>,
    pub samples: Vec<ForecastSample>,
}
