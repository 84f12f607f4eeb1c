//! Configuration for the speechwire client runtime.
//!
//! Configuration can come from a YAML file, environment variables (with .env
//! support), or plain defaults. Priority: explicit YAML > environment
//! variables > defaults.
//!
//! # Example
//! ```rust,no_run
//! use speechwire::config::ClientConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::audio::{CAPTURE_SAMPLE_RATE, TRANSPORT_SAMPLE_RATE};
use crate::core::buffer::{DEFAULT_FLUSH_THRESHOLD, WriterConfig};

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An environment variable held an unparseable value
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },

    /// A setting failed validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Capture-side buffer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BufferSettings {
    /// Maximum number of flushed chunks held at once (`None` = unbounded)
    pub capacity: Option<usize>,
    /// Flush automatically when pending bytes reach `flush_threshold`
    pub auto_flush: bool,
    /// Pending byte count that triggers an auto-flush
    pub flush_threshold: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            capacity: None,
            auto_flush: true,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

impl BufferSettings {
    /// Build the writer configuration these settings describe.
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig {
            capacity: self.capacity,
            auto_flush: self.auto_flush,
            flush_threshold: self.flush_threshold,
        }
    }
}

/// Audio pipeline settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Sample rate of microphone capture (Hz)
    pub capture_sample_rate: u32,
    /// Sample rate of the transport stage (Hz)
    pub transport_sample_rate: u32,
    /// Capture channel count (1 = mono, 2 = stereo)
    pub channels: u16,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            capture_sample_rate: CAPTURE_SAMPLE_RATE,
            transport_sample_rate: TRANSPORT_SAMPLE_RATE,
            channels: 1,
        }
    }
}

/// Client runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Capture-side buffer settings
    pub buffer: BufferSettings,
    /// Audio pipeline settings
    pub audio: AudioSettings,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults. A `.env` file in the working directory is honored.
    ///
    /// Recognized variables: `SPEECHWIRE_BUFFER_CAPACITY`,
    /// `SPEECHWIRE_FLUSH_THRESHOLD`, `SPEECHWIRE_AUTO_FLUSH`,
    /// `SPEECHWIRE_CAPTURE_SAMPLE_RATE`, `SPEECHWIRE_TRANSPORT_SAMPLE_RATE`,
    /// `SPEECHWIRE_CHANNELS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Some(capacity) = read_env("SPEECHWIRE_BUFFER_CAPACITY")? {
            config.buffer.capacity = Some(capacity);
        }
        if let Some(threshold) = read_env("SPEECHWIRE_FLUSH_THRESHOLD")? {
            config.buffer.flush_threshold = threshold;
        }
        if let Some(auto_flush) = read_env("SPEECHWIRE_AUTO_FLUSH")? {
            config.buffer.auto_flush = auto_flush;
        }
        if let Some(rate) = read_env("SPEECHWIRE_CAPTURE_SAMPLE_RATE")? {
            config.audio.capture_sample_rate = rate;
        }
        if let Some(rate) = read_env("SPEECHWIRE_TRANSPORT_SAMPLE_RATE")? {
            config.audio.transport_sample_rate = rate;
        }
        if let Some(channels) = read_env("SPEECHWIRE_CHANNELS")? {
            config.audio.channels = channels;
        }
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Check that the settings are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer.capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "buffer.capacity must be at least 1 chunk".to_string(),
            ));
        }
        if self.buffer.auto_flush && self.buffer.flush_threshold == 0 {
            return Err(ConfigError::Invalid(
                "buffer.flush_threshold must be positive when auto_flush is enabled".to_string(),
            ));
        }
        if self.audio.capture_sample_rate == 0 || self.audio.transport_sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "audio sample rates must be positive".to_string(),
            ));
        }
        if !(1..=2).contains(&self.audio.channels) {
            return Err(ConfigError::Invalid(format!(
                "audio.channels must be 1 or 2, got {}",
                self.audio.channels
            )));
        }
        Ok(())
    }
}

/// Read and parse an optional environment variable.
fn read_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
