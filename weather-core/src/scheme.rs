//! Per-category display scheme (colours and image names).
//!
//! The table is a plain value: load it once with [`SchemeTable::load`] or
//! [`SchemeTable::from_json_str`] and pass it to whatever renders summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

use crate::{calendar::CalendarPolicy, category::WeatherCategory, error::SchemeError};

/// Which image of a scheme to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageVariant {
    #[default]
    Auto,
    Day,
    Night,
}

impl ImageVariant {
    /// Night from 18:00 until 06:00 local time.
    pub fn at_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) { ImageVariant::Day } else { ImageVariant::Night }
    }

    /// Variant for the local hour of `at` in `calendar`.
    pub fn at<C: CalendarPolicy + ?Sized>(calendar: &C, at: DateTime<Utc>) -> Self {
        let hour = (at - calendar.start_of_day(at)).num_hours();
        Self::at_hour(u32::try_from(hour).unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeInfo {
    pub primary_color: String,
    pub secondary_color: String,
    pub image_auto: String,
    pub image_day: String,
    pub image_night: String,
    // upstream files spell it "backgound"
    #[serde(alias = "backgound")]
    pub background: String,
}

impl SchemeInfo {
    pub fn image(&self, variant: ImageVariant) -> &str {
        match variant {
            ImageVariant::Auto => &self.image_auto,
            ImageVariant::Day => &self.image_day,
            ImageVariant::Night => &self.image_night,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SchemeEntry {
    #[serde(rename = "type")]
    category: WeatherCategory,
    #[serde(flatten)]
    info: SchemeInfo,
}

#[derive(Debug, Clone, Default)]
pub struct SchemeTable {
    entries: HashMap<WeatherCategory, SchemeInfo>,
}

impl SchemeTable {
    /// Parse a JSON array of `{ "type": ..., "primary_color": ..., ... }`.
    /// Later entries for the same category replace earlier ones.
    pub fn from_json_str(json: &str) -> Result<Self, SchemeError> {
        let entries: Vec<SchemeEntry> = serde_json::from_str(json)?;
        Ok(Self {
            entries: entries.into_iter().map(|e| (e.category, e.info)).collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, SchemeError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| SchemeError::Io { path: path.to_path_buf(), source })?;
        let table = Self::from_json_str(&contents)?;

        tracing::info!(path = %path.display(), categories = table.len(), "loaded display schemes");
        Ok(table)
    }

    pub fn get(&self, category: WeatherCategory) -> Result<&SchemeInfo, SchemeError> {
        self.entries.get(&category).ok_or(SchemeError::Missing(category))
    }

    pub fn image(
        &self,
        category: WeatherCategory,
        variant: ImageVariant,
    ) -> Result<&str, SchemeError> {
        self.get(category).map(|info| info.image(variant))
    }

    /// Categories with no entry in the table.
    pub fn missing(&self) -> Vec<WeatherCategory> {
        WeatherCategory::all()
            .iter()
            .copied()
            .filter(|c| !self.entries.contains_key(c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
