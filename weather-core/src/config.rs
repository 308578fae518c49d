use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    calendar::{CalendarPolicy, calendar_for},
    scheme::SchemeTable,
    units::TemperatureUnit,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timezone = "Europe/Rome"
/// units = "celsius"
/// forecast_path = "/home/me/forecast.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// IANA zone used to split days; host local time when absent.
    pub timezone: Option<String>,

    pub units: TemperatureUnit,

    /// Display scheme JSON file.
    pub scheme_path: Option<PathBuf>,

    /// Forecast payload used when none is given on the command line.
    pub forecast_path: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Calendar for day bucketing. `zone_override` wins over the stored zone.
    pub fn calendar(&self, zone_override: Option<&str>) -> Result<Box<dyn CalendarPolicy>> {
        let zone = zone_override.or(self.timezone.as_deref());
        calendar_for(zone).with_context(|| {
            "Invalid time zone.\n\
             Hint: run `weather configure` or pass `--tz <IANA name>`."
        })
    }

    /// Load the display scheme table, if one is configured.
    pub fn scheme_table(&self) -> Result<Option<SchemeTable>> {
        self.scheme_path
            .as_deref()
            .map(|path| SchemeTable::load(path).context("Failed to load display schemes"))
            .transpose()
    }

    /// Forecast file to read: `explicit` if given, else the configured one.
    pub fn forecast_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit.or_else(|| self.forecast_path.clone()).ok_or_else(|| {
            anyhow!(
                "No forecast file given.\n\
                 Hint: pass a path, or run `weather configure` to set a default."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.units, TemperatureUnit::Celsius);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            timezone: Some("Asia/Tokyo".into()),
            units: TemperatureUnit::Fahrenheit,
            scheme_path: None,
            forecast_path: Some(PathBuf::from("/tmp/forecast.json")),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_uses_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "units = \"kelvin\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.units, TemperatureUnit::Kelvin);
        assert!(cfg.timezone.is_none());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "units = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn override_zone_wins() {
        let cfg = Config { timezone: Some("Asia/Tokyo".into()), ..Config::default() };
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();

        // 20:00 UTC is 05:00 next day in Tokyo
        let tokyo = cfg.calendar(None).unwrap();
        assert_eq!(tokyo.start_of_day(at), Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap());

        let utc = cfg.calendar(Some("UTC")).unwrap();
        assert_eq!(utc.start_of_day(at), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn bad_zone_has_hint() {
        let cfg = Config { timezone: Some("Nowhere/Land".into()), ..Config::default() };
        let err = cfg.calendar(None).err().expect("zone must be rejected");
        assert!(err.to_string().contains("Hint"));
        assert!(format!("{err:#}").contains("Nowhere/Land"));
    }

    #[test]
    fn forecast_path_resolution() {
        let cfg = Config::default();
        assert!(cfg.forecast_path(None).is_err());
        assert_eq!(cfg.forecast_path(Some("a.json".into())).unwrap(), PathBuf::from("a.json"));

        let cfg = Config { forecast_path: Some("b.json".into()), ..Config::default() };
        assert_eq!(cfg.forecast_path(None).unwrap(), PathBuf::from("b.json"));
        assert_eq!(cfg.forecast_path(Some("a.json".into())).unwrap(), PathBuf::from("a.json"));
    }

    #[test]
    fn no_scheme_path_means_no_table() {
        assert!(Config::default().scheme_table().unwrap().is_none());
    }
}
