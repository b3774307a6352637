//! Chip-select framed, fixed-length SPI exchange.

use std::time::{Duration, Instant};

use log::{debug, error};

use crate::drv8305::command::{CommandWord, ResponseWord};
use crate::hal::{ChipSelect, SpiPort};
use crate::types::DriverError;

/// Bytes in one DRV8305 frame.
pub const WORD_LEN: usize = 2;

/// An SPI port and its chip-select line, owned together.
///
/// One exchange moves exactly one command word out and one response word in.
/// `exchange` takes `&mut self`, so a transport never has two exchanges in flight.
pub struct SpiTransport<S: SpiPort, C: ChipSelect> {
    spi: S,
    cs: C,
    timeout: Duration,
}

impl<S: SpiPort, C: ChipSelect> SpiTransport<S, C> {
    pub fn new(spi: S, cs: C, timeout: Duration) -> Self {
        Self { spi, cs, timeout }
    }

    /// Performs one full-duplex 2-byte exchange.
    ///
    /// Chip select is driven low for the transfer and back high afterwards on every
    /// path, including a failed or short transfer. If releasing chip select fails after
    /// a failed transfer, both failures are reported in the returned `SpiError`.
    ///
    /// The time bound is checked only after the transfer returns. A transfer that hangs
    /// blocks the caller for as long as the port does, and a correct response that
    /// arrives after the bound is discarded and reported as `TimeoutError`.
    pub fn exchange(&mut self, command: CommandWord) -> Result<ResponseWord, DriverError> {
        let write_buffer = command.to_bytes();
        let mut read_buffer = [0u8; WORD_LEN];

        self.cs
            .set_low()
            .map_err(|e| DriverError::GpioError(format!("Failed to assert chip select: {}", e)))?;
        let started = Instant::now();
        let result = self.spi.transfer(&mut read_buffer, &write_buffer);
        let elapsed = started.elapsed();
        let released = self.cs.set_high();

        let transferred = match result {
            Ok(n) => n,
            Err(e) => {
                error!("SPI exchange for command {} failed: {}", command, e);
                return Err(match released {
                    Ok(()) => DriverError::SpiError(e.to_string()),
                    Err(cs_err) => {
                        error!("Failed to release chip select after SPI failure: {}", cs_err);
                        DriverError::SpiError(format!(
                            "{}; chip select release also failed: {}",
                            e, cs_err
                        ))
                    }
                });
            }
        };
        released.map_err(|e| {
            error!("Failed to release chip select: {}", e);
            DriverError::GpioError(format!("Failed to release chip select: {}", e))
        })?;

        if transferred != WORD_LEN {
            error!("Short SPI exchange: {} of {} bytes", transferred, WORD_LEN);
            return Err(DriverError::ShortTransfer { expected: WORD_LEN, actual: transferred });
        }
        if elapsed > self.timeout {
            return Err(DriverError::TimeoutError(format!(
                "Exchange took {:?}, limit is {:?}",
                elapsed, self.timeout
            )));
        }

        let response = ResponseWord::from_bytes(read_buffer);
        debug!("SPI exchange: sent [{}] received [{}]", command, response);
        Ok(response)
    }

    /// Give back the port and chip-select line.
    pub fn release(self) -> (S, C) {
        (self.spi, self.cs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drv8305::command::encode;
    use crate::drv8305::registers::RegisterAddress;
    use crate::mock_hal::{BusEvent, MockBus, MockChipSelect, MockSpi};

    fn transport(bus: &MockBus) -> SpiTransport<MockSpi, MockChipSelect> {
        SpiTransport::new(bus.spi(), bus.chip_select(), Duration::from_secs(1))
    }

    #[test]
    fn test_exchange_is_framed_by_chip_select() {
        let bus = MockBus::new();
        bus.set_register(RegisterAddress::GateDriveControl, 0x296);
        let mut transport = transport(&bus);

        let response = transport
            .exchange(CommandWord::read(RegisterAddress::GateDriveControl))
            .unwrap();
        assert_eq!(response.data(), 0x296);
        assert_eq!(
            bus.events(),
            vec![
                BusEvent::ChipSelectLow,
                BusEvent::Transfer([0xB8, 0x00]),
                BusEvent::ChipSelectHigh
            ]
        );
        assert!(bus.chip_select_is_high());
    }

    #[test]
    fn test_spi_failure_releases_chip_select() {
        let bus = MockBus::new();
        bus.fail_next_transfer();
        let mut transport = transport(&bus);

        let result = transport.exchange(CommandWord::read(RegisterAddress::IcFault));
        assert!(matches!(result, Err(DriverError::SpiError(_))));
        assert!(bus.chip_select_is_high());
    }

    #[test]
    fn test_short_transfer_is_a_fault() {
        let bus = MockBus::new();
        bus.short_next_transfer(1);
        let mut transport = transport(&bus);

        let result = transport.exchange(CommandWord::read(RegisterAddress::IcFault));
        assert!(matches!(result, Err(DriverError::ShortTransfer { expected: 2, actual: 1 })));
        assert!(bus.chip_select_is_high());
    }

    #[test]
    fn test_chip_select_failure_skips_transfer() {
        let bus = MockBus::new();
        bus.fail_chip_select();
        let mut transport = transport(&bus);

        let result = transport.exchange(CommandWord::read(RegisterAddress::IcFault));
        assert!(matches!(result, Err(DriverError::GpioError(_))));
        assert_eq!(bus.transfer_count(), 0);
    }

    #[test]
    fn test_slow_exchange_times_out() {
        let bus = MockBus::new();
        bus.set_transfer_delay(Duration::from_millis(20));
        let mut transport =
            SpiTransport::new(bus.spi(), bus.chip_select(), Duration::from_millis(1));

        let result = transport.exchange(CommandWord::read(RegisterAddress::VgsFault));
        assert!(matches!(result, Err(DriverError::TimeoutError(_))));
        assert!(bus.chip_select_is_high());
    }

    #[test]
    fn test_write_command_is_sent_verbatim() {
        let bus = MockBus::new();
        let mut transport = transport(&bus);

        transport.exchange(encode(false, RegisterAddress::VdsSenseControl, 0x0F)).unwrap();
        assert_eq!(bus.sent_words(), vec![[0x60, 0x0F]]);
        assert_eq!(bus.register(RegisterAddress::VdsSenseControl), 0x0F);
    }

    #[test]
    fn test_release_failure_after_good_transfer() {
        let bus = MockBus::new();
        bus.fail_chip_select_release();
        let mut transport = transport(&bus);

        let result = transport.exchange(CommandWord::read(RegisterAddress::IcFault));
        match result {
            Err(DriverError::GpioError(msg)) => {
                assert!(msg.contains("Failed to release chip select"));
            }
            other => panic!("expected GpioError, got {:?}", other),
        }
        assert_eq!(bus.transfer_count(), 1);
        assert!(!bus.chip_select_is_high());
    }

    #[test]
    fn test_release_failure_after_failed_transfer() {
        let bus = MockBus::new();
        bus.fail_next_transfer();
        bus.fail_chip_select_release();
        let mut transport = transport(&bus);

        let result = transport.exchange(CommandWord::read(RegisterAddress::IcFault));
        match result {
            Err(DriverError::SpiError(msg)) => {
                assert!(msg.contains("injected SPI failure"));
                assert!(msg.contains("chip select release also failed"));
            }
            other => panic!("expected SpiError, got {:?}", other),
        }
        assert!(!bus.chip_select_is_high());
    }
}
