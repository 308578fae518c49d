use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use weather_core::{
    Config, FileSource, ForecastSource, ImageVariant, TemperatureUnit, WeatherCategory, aggregate,
    classify,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Daily forecast summaries")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set time zone, units and default files.
    Configure,

    /// Summarise a 3-hour forecast file into one line per day.
    Daily {
        /// Forecast JSON file; falls back to the configured one.
        file: Option<PathBuf>,

        /// IANA time zone used to split days, e.g. "Europe/Rome".
        #[arg(long)]
        tz: Option<String>,

        /// kelvin, celsius or fahrenheit.
        #[arg(long)]
        units: Option<String>,
    },

    /// Show the category for one or more condition codes.
    Classify {
        #[arg(required = true, allow_negative_numbers = true)]
        codes: Vec<i32>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Daily { file, tz, units } => daily(file, tz, units).await?,
            Command::Classify { codes } => {
                for code in codes {
                    let category: WeatherCategory = classify(code);
                    println!("{code}\t{category}");
                }
            }
        }

        Ok(())
    }
}

async fn daily(file: Option<PathBuf>, tz: Option<String>, units: Option<String>) -> Result<()> {
    let config = Config::load()?;

    let unit = match units.as_deref() {
        Some(u) => TemperatureUnit::try_from(u)?,
        None => config.units,
    };
    let calendar = config.calendar(tz.as_deref())?;
    let schemes = config.scheme_table()?;

    let source = FileSource::new(config.forecast_path(file)?);
    let payload = source.fetch().await?;

    let days = aggregate(&payload.samples, calendar.as_ref());

    let now = Utc::now();
    let variant = ImageVariant::at(calendar.as_ref(), now);

    let location = payload.city.as_ref().map(|c| c.display_name());
    println!("{}", render::header(location.as_deref(), now));
    if days.is_empty() {
        println!("(no forecast samples)");
    }
    let lines = render::daily_lines(&days, calendar.as_ref(), unit, schemes.as_ref(), variant);
    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let zone = Text::new("Time zone (IANA name, empty for system local):")
        .with_default(config.timezone.as_deref().unwrap_or(""))
        .prompt()
        .context("Time zone prompt cancelled")?;
    let zone = zone.trim();
    config.timezone = if zone.is_empty() { None } else { Some(zone.to_string()) };
    // fail early on a typo
    config.calendar(None)?;

    let units = TemperatureUnit::all().to_vec();
    let start = units.iter().position(|u| *u == config.units).unwrap_or_default();
    config.units = Select::new("Temperature units:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Units prompt cancelled")?;

    config.forecast_path = optional_path("Default forecast file:", config.forecast_path.as_ref())?;
    config.scheme_path = optional_path("Display scheme file:", config.scheme_path.as_ref())?;
    config.scheme_table()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn optional_path(prompt: &str, current: Option<&PathBuf>) -> Result<Option<PathBuf>> {
    let current = current.map(|p| p.display().to_string()).unwrap_or_default();
    let answer = Text::new(prompt)
        .with_default(&current)
        .with_help_message("leave empty for none")
        .prompt()
        .with_context(|| format!("Prompt cancelled: {prompt}"))?;

    let answer = answer.trim();
    Ok(if answer.is_empty() { None } else { Some(PathBuf::from(answer)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daily_with_options() {
        let cli = Cli::try_parse_from(["weather", "daily", "f.json", "--tz", "UTC", "--units", "f"])
            .unwrap();
        match cli.command {
            Command::Daily { file, tz, units } => {
                assert_eq!(file, Some(PathBuf::from("f.json")));
                assert_eq!(tz.as_deref(), Some("UTC"));
                assert_eq!(units.as_deref(), Some("f"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_classify_codes() {
        let cli = Cli::try_parse_from(["weather", "-v", "classify", "800", "-5"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Classify { codes } => assert_eq!(codes, vec![800, -5]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_requires_a_code() {
        assert!(Cli::try_parse_from(["weather", "classify"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
