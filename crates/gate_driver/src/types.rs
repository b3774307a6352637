//! Common types for the gate driver: configuration and errors.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest SPI clock the DRV8305 accepts.
pub const MAX_CLOCK_SPEED_HZ: u32 = 10_000_000;

/// Configuration for one DRV8305 on the SPI bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drv8305Config {
    /// SPI bus number
    #[serde(default = "default_spi_bus")]
    pub spi_bus: u8,
    /// GPIO pin driven as chip select
    #[serde(default = "default_cs_pin")]
    pub cs_pin: u8,
    /// SPI clock in Hz
    #[serde(default = "default_clock_speed_hz")]
    pub clock_speed_hz: u32,
    /// Upper bound for a single 2-byte exchange, in milliseconds
    #[serde(default = "default_exchange_timeout_ms")]
    pub exchange_timeout_ms: u64,
}

fn default_spi_bus() -> u8 { 0 }
fn default_cs_pin() -> u8 { 8 }
fn default_clock_speed_hz() -> u32 { 100_000 }
fn default_exchange_timeout_ms() -> u64 { 10 }

impl Default for Drv8305Config {
    fn default() -> Self {
        Self {
            spi_bus: default_spi_bus(),
            cs_pin: default_cs_pin(),
            clock_speed_hz: default_clock_speed_hz(),
            exchange_timeout_ms: default_exchange_timeout_ms(),
        }
    }
}

impl Drv8305Config {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DriverError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Drv8305Config = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded DRV8305 configuration from {}", path.display());
        Ok(config)
    }

    /// Check the configuration against the limits of the chip and the host.
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.spi_bus > 6 {
            return Err(DriverError::ConfigurationError(format!(
                "Invalid SPI bus: {}. Supported buses: 0-6",
                self.spi_bus
            )));
        }
        if self.clock_speed_hz == 0 || self.clock_speed_hz > MAX_CLOCK_SPEED_HZ {
            return Err(DriverError::ConfigurationError(format!(
                "Invalid SPI clock: {} Hz. DRV8305 supports up to {} Hz",
                self.clock_speed_hz, MAX_CLOCK_SPEED_HZ
            )));
        }
        if self.exchange_timeout_ms == 0 {
            return Err(DriverError::ConfigurationError(
                "Exchange timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn exchange_timeout(&self) -> Duration {
        Duration::from_millis(self.exchange_timeout_ms)
    }
}

/// Errors that can occur while talking to the gate driver
#[derive(Error, Debug, Clone)]
pub enum DriverError {
    /// SPI communication error
    #[error("SPI error: {0}")]
    SpiError(String),
    /// GPIO error, including chip-select failures
    #[error("GPIO error: {0}")]
    GpioError(String),
    /// The bus moved fewer bytes than a full word
    #[error("Short transfer: expected {expected} bytes, transferred {actual}")]
    ShortTransfer { expected: usize, actual: usize },
    /// An exchange exceeded its time bound
    #[error("Timeout error: {0}")]
    TimeoutError(String),
    /// Operation declared but not implemented
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    /// Address outside the register map
    #[error("Invalid register address: {0:#04x}")]
    InvalidRegister(u8),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    /// I/O error, such as an unreadable configuration file
    #[error("I/O error: {0}")]
    IoError(String),
}

#[cfg(feature = "pi-hardware")]
impl From<rppal::spi::Error> for DriverError {
    fn from(err: rppal::spi::Error) -> Self {
        DriverError::SpiError(err.to_string())
    }
}

#[cfg(feature = "pi-hardware")]
impl From<rppal::gpio::Error> for DriverError {
    fn from(err: rppal::gpio::Error) -> Self {
        DriverError::GpioError(err.to_string())
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::ConfigurationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Drv8305Config::default();
        assert_eq!(config.spi_bus, 0);
        assert_eq!(config.clock_speed_hz, 100_000);
        assert_eq!(config.exchange_timeout(), Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_fast_clock() {
        let config = Drv8305Config {
            clock_speed_hz: 12_000_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DriverError::ConfigurationError(_))));

        let config = Drv8305Config {
            clock_speed_hz: MAX_CLOCK_SPEED_HZ,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bus_and_timeout() {
        let config = Drv8305Config { spi_bus: 7, ..Default::default() };
        assert!(config.validate().is_err());

        let config = Drv8305Config { exchange_timeout_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{ "spi_bus": 1, "clock_speed_hz": 1000000 }}"#).unwrap();

        let config = Drv8305Config::load(file.path()).unwrap();
        assert_eq!(config.spi_bus, 1);
        assert_eq!(config.clock_speed_hz, 1_000_000);
        assert_eq!(config.cs_pin, 8);
        assert_eq!(config.exchange_timeout_ms, 10);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "not json").unwrap();
        assert!(matches!(
            Drv8305Config::load(file.path()),
            Err(DriverError::ConfigurationError(_))
        ));

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{ "clock_speed_hz": 20000000 }}"#).unwrap();
        assert!(Drv8305Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = Drv8305Config::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(DriverError::IoError(_))));
    }
}
