//! Decoding of the OpenWeather 5-day / 3-hour forecast payload.
//!
//! Only the fields the daily aggregation needs are read; everything else in
//! the payload (wind, humidity, pressure, ...) is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::ForecastError,
    model::{City, ForecastPayload, ForecastSample},
};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: f64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
    city: Option<OwCity>,
}

/// Decode a forecast payload into samples.
pub fn decode_forecast(json: &str) -> Result<ForecastPayload, ForecastError> {
    let parsed: OwForecastResponse = serde_json::from_str(json)?;

    let samples = parsed
        .list
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<ForecastSample, ForecastError> {
            // Only the primary weather entry counts.
            let code = entry
                .weather
                .first()
                .map(|w| w.id)
                .ok_or(ForecastError::MissingCondition { index })?;
            let timestamp = timestamp_from_secs_f64(entry.dt)
                .ok_or(ForecastError::InvalidTimestamp { index, dt: entry.dt })?;

            Ok(ForecastSample::new(timestamp, entry.main.temp_min, entry.main.temp_max, code))
        })
        .collect::<Result<Vec<_>, ForecastError>>()?;

    let city = parsed.city.map(|c| City {
        name: c.name,
        country: c.country,
        timezone_offset_secs: c.timezone,
    });

    tracing::debug!(samples = samples.len(), "decoded forecast payload");

    Ok(ForecastPayload { city, samples })
}

/// Convert fractional Unix seconds to an instant.
pub fn timestamp_from_secs_f64(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAYLOAD: &str = r#"{
        "cod": "200",
        "message": 0,
        "cnt": 3,
        "list": [
            {
                "dt": 1661871600,
                "main": { "temp": 296.76, "temp_min": 296.76, "temp_max": 297.87, "humidity": 69 },
                "weather": [
                    { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" },
                    { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
                ],
                "wind": { "speed": 0.62, "deg": 349, "gust": 1.18 },
                "dt_txt": "2022-08-30 15:00:00"
            },
            {
                "dt": 1661882400.5,
                "main": { "temp": 295.45, "temp_min": 292.84, "temp_max": 295.45 },
                "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10n" }]
            },
            {
                "dt": 1662292800,
                "main": { "temp": 294.93, "temp_min": 294.93, "temp_max": 294.93 },
                "weather": [{ "id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d" }]
            }
        ],
        "city": { "id": 3163858, "name": "Zocca", "country": "IT", "timezone": 7200 }
    }"#;

    #[test]
    fn decodes_samples_and_city() {
        let payload = decode_forecast(PAYLOAD).expect("payload should decode");

        assert_eq!(payload.samples.len(), 3);
        let first = &payload.samples[0];
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2022, 8, 30, 15, 0, 0).unwrap());
        assert_eq!(first.temperature_min, 296.76);
        assert_eq!(first.temperature_max, 297.87);
        // secondary weather entries are ignored
        assert_eq!(first.condition_code, 500);

        let city = payload.city.expect("city present");
        assert_eq!(city.display_name(), "Zocca, IT");
        assert_eq!(city.timezone_offset_secs, Some(7200));
    }

    #[test]
    fn fractional_timestamps_keep_subseconds() {
        let payload = decode_forecast(PAYLOAD).unwrap();
        assert_eq!(payload.samples[1].timestamp.timestamp(), 1661882400);
        assert_eq!(payload.samples[1].timestamp.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn empty_weather_array_is_an_error() {
        let json = r#"{ "list": [
            { "dt": 1, "main": { "temp_min": 1.0, "temp_max": 2.0 }, "weather": [{ "id": 800 }] },
            { "dt": 2, "main": { "temp_min": 1.0, "temp_max": 2.0 }, "weather": [] }
        ] }"#;
        let err = decode_forecast(json).unwrap_err();
        assert!(matches!(err, ForecastError::MissingCondition { index: 1 }));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_forecast("{ \"list\": [ ").unwrap_err();
        assert!(matches!(err, ForecastError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to parse forecast JSON"));
    }

    #[test]
    fn city_is_optional() {
        let payload = decode_forecast(r#"{ "list": [] }"#).unwrap();
        assert!(payload.city.is_none());
        assert!(payload.samples.is_empty());
    }

    #[test]
    fn timestamp_conversion_edges() {
        assert_eq!(timestamp_from_secs_f64(0.0), DateTime::from_timestamp(0, 0));
        assert_eq!(timestamp_from_secs_f64(-1.5), DateTime::from_timestamp(-2, 500_000_000));
        assert_eq!(timestamp_from_secs_f64(f64::NAN), None);
        assert_eq!(timestamp_from_secs_f64(f64::INFINITY), None);
        assert_eq!(timestamp_from_secs_f64(1e300), None);
    }
}
