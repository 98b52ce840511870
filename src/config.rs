use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::scoring::SensoryWeights;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    /// JSON snapshot location; memory-only when unset.
    pub data_file: Option<PathBuf>,
    pub sensory_weights: SensoryWeights,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            api_prefix: "/api/v1".into(),
            data_file: None,
            sensory_weights: SensoryWeights::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a port: {raw}"))?,
            None => defaults.port,
        };
        let sensory_weights = match lookup("BARISENSE_SENSORY_WEIGHTS") {
            Some(raw) => parse_weights(&raw).context("BARISENSE_SENSORY_WEIGHTS")?,
            None => defaults.sensory_weights,
        };
        Ok(Self {
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port,
            api_prefix: lookup("BARISENSE_API_PREFIX").unwrap_or(defaults.api_prefix),
            data_file: lookup("BARISENSE_DATA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            sensory_weights,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Seven comma-separated weights in axis order:
/// acidity, bitterness, body, aroma, balance, finish, overall.
pub fn parse_weights(raw: &str) -> anyhow::Result<SensoryWeights> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("not a number: {:?}", part.trim()))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;
    let weights: [f64; 7] = values
        .as_slice()
        .try_into()
        .with_context(|| format!("expected 7 weights, got {}", values.len()))?;
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        bail!("weights must be finite and non-negative");
    }
    if weights.iter().all(|w| *w == 0.0) {
        bail!("at least one weight must be positive");
    }
    Ok(SensoryWeights::from_array(weights))
}
