use anyhow::{Context, Result};
use async_trait::async_trait;
use std::{fmt::Debug, path::PathBuf};

use crate::{forecast::decode_forecast, model::ForecastPayload};

/// Supplies forecast payloads to the aggregation pipeline.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<ForecastPayload>;
}

/// Reads a saved OpenWeather forecast JSON document from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastSource for FileSource {
    async fn fetch(&self) -> Result<ForecastPayload> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read forecast file: {}", self.path.display()))?;

        let payload = decode_forecast(&body)
            .with_context(|| format!("Invalid forecast file: {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            samples = payload.samples.len(),
            "loaded forecast"
        );
        Ok(payload)
    }
}
