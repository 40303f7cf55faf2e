//! Demo configuration
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! device = "/dev/ttyUSB0"
//! port = "D"             # port driven by the demos
//! iomask = 0             # its direction mask (0 = all outputs)
//! loop_count = 20        # operations per measurement
//! read_port = "B"
//! adc_channel = 0
//! adc_reference = 2.5    # volts at full scale
//! # cycles = 100         # stop after this many measurements
//! # read_timeout_ms = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use avt414::{Channel, Port};
use avt414_hal::UartConfig;
use serde::Deserialize;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("{key}: unknown port {value:?} (expected B, C or D)")]
    InvalidPort { key: &'static str, value: char },

    #[error("adc_channel: {0} is not an ADC line (0-7)")]
    InvalidChannel(u8),

    #[error("loop_count must be at least 1")]
    EmptyLoop,
}

/// Settings shared by the demo programs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Serial device path
    pub device: String,
    /// Port driven by the write loops
    pub port: char,
    /// Direction mask applied to `port` at startup
    pub iomask: u8,
    /// Operations per measurement
    pub loop_count: u32,
    /// Port sampled by the read loop
    pub read_port: char,
    /// Line sampled by the ADC loop
    pub adc_channel: u8,
    /// Full scale voltage of the ADC
    pub adc_reference: f32,
    /// Number of measurements; runs forever if unset
    pub cycles: Option<u64>,
    /// Read deadline; blocks forever if unset
    pub read_timeout_ms: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            port: 'D',
            iomask: 0x00,
            loop_count: 20,
            read_port: 'B',
            adc_channel: 0,
            adc_reference: 2.5,
            cycles: None,
            read_timeout_ms: None,
        }
    }
}

impl DemoConfig {
    /// Parse and validate a TOML document
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&input)
    }

    /// Check every field the board would reject
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.port()?;
        self.read_port()?;
        self.adc_channel()?;
        if self.loop_count == 0 {
            return Err(ConfigError::EmptyLoop);
        }
        Ok(())
    }

    pub fn port(&self) -> Result<Port, ConfigError> {
        Port::try_from(self.port).map_err(|_| ConfigError::InvalidPort {
            key: "port",
            value: self.port,
        })
    }

    pub fn read_port(&self) -> Result<Port, ConfigError> {
        Port::try_from(self.read_port).map_err(|_| ConfigError::InvalidPort {
            key: "read_port",
            value: self.read_port,
        })
    }

    pub fn adc_channel(&self) -> Result<Channel, ConfigError> {
        Channel::new(self.adc_channel).map_err(|e| ConfigError::InvalidChannel(e.0))
    }

    /// Serial line settings: the board's 57600 8N1 plus the read deadline
    pub fn uart(&self) -> UartConfig {
        UartConfig {
            read_timeout: self.read_timeout_ms.map(Duration::from_millis),
            ..UartConfig::default()
        }
    }
}
