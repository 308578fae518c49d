//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Classification of provider condition codes into display categories
//! - Calendar policies that decide where one day ends and the next begins
//! - The daily aggregation of 3-hour forecast samples
//! - Decoding of forecast payloads and the sources that supply them
//! - Display schemes and configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod calendar;
pub mod category;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod scheme;
pub mod source;
pub mod units;

pub use aggregate::{aggregate, temperature_range};
pub use calendar::{CalendarPolicy, LocalCalendar, ZonedCalendar, calendar_for};
pub use category::{WeatherCategory, classify};
pub use config::Config;
pub use error::{CalendarError, ForecastError, SchemeError};
pub use forecast::decode_forecast;
pub use model::{City, DailySummary, ForecastPayload, ForecastSample};
pub use scheme::{ImageVariant, SchemeInfo, SchemeTable};
pub use source::{FileSource, ForecastSource};
pub use units::TemperatureUnit;
