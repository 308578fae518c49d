use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse weather family derived from an OpenWeather condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    DustHaze,
    Fog,
    Wind,
    ClearSun,
    ClearCloudless,
    PartlyCloudy,
}

impl WeatherCategory {
    pub const fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Thunderstorm,
            WeatherCategory::Drizzle,
            WeatherCategory::Rain,
            WeatherCategory::Snow,
            WeatherCategory::DustHaze,
            WeatherCategory::Fog,
            WeatherCategory::Wind,
            WeatherCategory::ClearSun,
            WeatherCategory::ClearCloudless,
            WeatherCategory::PartlyCloudy,
        ]
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Thunderstorm => "Thunderstorm",
            WeatherCategory::Drizzle => "Drizzle",
            WeatherCategory::Rain => "Rain",
            WeatherCategory::Snow => "Snow",
            WeatherCategory::DustHaze => "Dust",
            WeatherCategory::Fog => "Fog",
            WeatherCategory::Wind => "Wind",
            WeatherCategory::ClearSun => "Sun",
            WeatherCategory::ClearCloudless => "Cloudless",
            WeatherCategory::PartlyCloudy => "Cloud",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<i32> for WeatherCategory {
    fn from(code: i32) -> Self {
        classify(code)
    }
}

/// Map a provider condition code to its category.
///
/// Total over `i32`: codes outside the published taxonomy fall back to
/// [`WeatherCategory::ClearSun`].
pub fn classify(code: i32) -> WeatherCategory {
    match code / 100 {
        2 => WeatherCategory::Thunderstorm,
        3 => WeatherCategory::Drizzle,
        5 => WeatherCategory::Rain,
        6 => WeatherCategory::Snow,
        7 => match code {
            701 | 711 | 721 | 741 => WeatherCategory::Fog,
            731 | 751 | 761 | 762 => WeatherCategory::DustHaze,
            771 | 781 => WeatherCategory::Wind,
            _ => WeatherCategory::Fog,
        },
        8 => match code {
            800 => WeatherCategory::ClearSun,
            801 | 802 => WeatherCategory::ClearCloudless,
            803 | 804 => WeatherCategory::PartlyCloudy,
            _ => WeatherCategory::ClearSun,
        },
        _ => WeatherCategory::ClearSun,
    }
}
