//! Shared plumbing for the AVT414 demo programs
//!
//! - `avt414-poll`: toggles a port, samples a port and an ADC line, and
//!   reports how many operations per second the board sustains
//! - `avt414-stream`: streams a walking-bit pattern to a port through the
//!   port writer and reports bytes per second

pub mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use avt414::Avt414;
use avt414_hal_serialport::SerialUart;
use clap::Parser;
use log::info;

pub use config::{ConfigError, DemoConfig};

/// Command line shared by the demos
#[derive(Debug, Parser)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serial device, overrides the configuration
    #[arg(short, long)]
    pub device: Option<String>,

    /// Number of measurements, overrides the configuration
    #[arg(long)]
    pub cycles: Option<u64>,
}

/// Install the `env_logger` backend, `info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Resolve the configuration from the file (if any) and command line overrides
pub fn load_config(args: &Args) -> anyhow::Result<DemoConfig> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(device) = &args.device {
        config.device = device.clone();
    }
    if args.cycles.is_some() {
        config.cycles = args.cycles;
    }
    Ok(config)
}

/// Open the board named in `config`
pub fn connect(config: &DemoConfig) -> anyhow::Result<Avt414<SerialUart>> {
    let uart = SerialUart::open_with_config(&config.device, config.uart())
        .with_context(|| format!("opening AVT414 on {}", config.device))?;
    let name = uart.name().unwrap_or_else(|| config.device.clone());
    info!("AVT414 on {}", name);
    Ok(Avt414::new(uart))
}

/// Check if measurement `cycle` (0-based) should still run
pub fn keep_running(config: &DemoConfig, cycle: u64) -> bool {
    config.cycles.map_or(true, |limit| cycle < limit)
}

/// Operations per second, rounded down
pub fn per_second(count: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (count as f64 / secs) as u64
    } else {
        0
    }
}

/// Single set bit walking from bit 7 down to bit 0, then starting over
#[derive(Debug, Clone)]
pub struct WalkingBit {
    bit: u8,
}

impl WalkingBit {
    pub fn new() -> Self {
        Self { bit: 0x80 }
    }
}

impl Default for WalkingBit {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for WalkingBit {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.bit;
        self.bit = match current >> 1 {
            0 => 0x80,
            next => next,
        };
        Some(current)
    }
}
