//! Configuration layer
//!
//! Strongly-typed, serializable configuration for the simulation core and
//! its host application, with builder methods, validation, and TOML parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed configuration holds an invalid value
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation tick configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed tick duration in microseconds
    pub step_us: u64,

    /// Upper bound on ticks drained per main-loop iteration, guarding
    /// against spiral-of-death catch-up after a long stall
    pub max_ticks_per_frame: u32,
}

impl SimulationConfig {
    /// Create a simulation configuration with the given step
    pub fn new(step_us: u64) -> Self {
        Self {
            step_us,
            max_ticks_per_frame: 8,
        }
    }

    /// Set the catch-up bound
    pub fn with_max_ticks_per_frame(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_us == 0 {
            return Err(ConfigError::Invalid("step_us must be non-zero".to_string()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "max_ticks_per_frame must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // 60 Hz
        Self::new(16_667)
    }
}

/// Core engine behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level filter for the engine
    pub log_level: String,

    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine core configuration
    pub engine: EngineConfig,

    /// Simulation tick configuration
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        Ok(())
    }
}
