use crate::error::{Result, TranzrError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tranzr_common::QuoteParams;

/// Simulated round-trip time of each mock service call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub auth_ms: u64,
    pub submit_ms: u64,
    pub note_ms: u64,
    pub upload_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            auth_ms: 1500,
            submit_ms: 2000,
            note_ms: 1000,
            upload_ms: 0,
        }
    }
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self {
            auth_ms: 0,
            submit_ms: 0,
            note_ms: 0,
            upload_ms: 0,
        }
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn submit(&self) -> Duration {
        Duration::from_millis(self.submit_ms)
    }

    pub fn note(&self) -> Duration {
        Duration::from_millis(self.note_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whole pounds per hour
    pub hourly_rate: u32,
    pub insurance_note: String,
    pub job_id_prefix: String,
    /// Proceed after a failed sign-in (prototype behavior)
    pub allow_failed_login: bool,
    pub latency: LatencyConfig,
}

impl Default for Config {
    fn default() -> Self {
        let quote = QuoteParams::default();
        Self {
            hourly_rate: quote.hourly_rate,
            insurance_note: quote.insurance_note,
            job_id_prefix: "TRZ".into(),
            allow_failed_login: false,
            latency: LatencyConfig::default(),
        }
    }
}

impl Config {
    pub const HOURLY_RATE_ENV: &'static str = "TRANZR_HOURLY_RATE";

    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        // Environment overrides the file
        if let Ok(rate) = std::env::var(Self::HOURLY_RATE_ENV) {
            config.hourly_rate = rate.trim().parse().map_err(|_| {
                TranzrError::Config(format!("{} must be a whole number, got '{}'", Self::HOURLY_RATE_ENV, rate))
            })?;
            config.validate()?;
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TranzrError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("tranzr").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.hourly_rate == 0 {
            return Err(TranzrError::Config("hourly_rate must be greater than zero".into()));
        }
        if self.job_id_prefix.trim().is_empty() {
            return Err(TranzrError::Config("job_id_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn set_hourly_rate(&mut self, rate: u32) -> Result<()> {
        self.hourly_rate = rate;
        self.validate()?;
        self.save()
    }

    pub fn quote_params(&self) -> QuoteParams {
        QuoteParams {
            hourly_rate: self.hourly_rate,
            insurance_note: self.insurance_note.clone(),
        }
    }
}
