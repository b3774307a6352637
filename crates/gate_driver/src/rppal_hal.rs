//! Raspberry Pi backend built on rppal.

use std::io;

use log::info;
use rppal::gpio::{Gpio, OutputPin};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::hal::{ChipSelect, SpiPort};
use crate::types::{DriverError, Drv8305Config};

/// CPOL 0, CPHA 1. Fixed by the DRV8305.
pub const SPI_MODE: Mode = Mode::Mode1;

/// SPI implementation using rppal
pub struct RppalSpi {
    spi: Spi,
}

impl SpiPort for RppalSpi {
    fn transfer(
        &mut self,
        read_buffer: &mut [u8],
        write_buffer: &[u8],
    ) -> Result<usize, io::Error> {
        self.spi
            .transfer(read_buffer, write_buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

/// GPIO pin driven as chip select
pub struct RppalChipSelect {
    pin: OutputPin,
}

impl ChipSelect for RppalChipSelect {
    fn set_low(&mut self) -> Result<(), io::Error> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), io::Error> {
        self.pin.set_high();
        Ok(())
    }
}

fn spi_bus(bus: u8) -> Result<Bus, DriverError> {
    match bus {
        0 => Ok(Bus::Spi0),
        1 => Ok(Bus::Spi1),
        2 => Ok(Bus::Spi2),
        3 => Ok(Bus::Spi3),
        4 => Ok(Bus::Spi4),
        5 => Ok(Bus::Spi5),
        6 => Ok(Bus::Spi6),
        _ => Err(DriverError::ConfigurationError(format!("Invalid SPI bus: {}", bus))),
    }
}

/// Open the SPI bus and chip-select pin named in `config`.
///
/// IMPORTANT: The hardware slave select `Ss0` is claimed only because rppal needs one.
/// Chip select is driven manually on `config.cs_pin`, so the physical CE0 pin must be
/// left unconnected from the DRV8305 nSCS input.
pub fn open(config: &Drv8305Config) -> Result<(RppalSpi, RppalChipSelect), DriverError> {
    config.validate()?;

    let spi = Spi::new(
        spi_bus(config.spi_bus)?,
        SlaveSelect::Ss0,
        config.clock_speed_hz,
        SPI_MODE,
    )?;
    // Idle high so the chip is deselected until the first exchange.
    let pin = Gpio::new()?.get(config.cs_pin)?.into_output_high();

    info!(
        "Opened DRV8305 on SPI{} at {} Hz, chip select on GPIO {}",
        config.spi_bus, config.clock_speed_hz, config.cs_pin
    );
    Ok((RppalSpi { spi }, RppalChipSelect { pin }))
}
