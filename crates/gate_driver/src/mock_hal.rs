//! In-memory DRV8305 for tests and `--mock` runs.
//!
//! `MockBus` holds the simulated register file and a log of every bus event. The
//! `MockSpi` and `MockChipSelect` it hands out share that state, so a test can keep
//! the bus handle and inspect it after the driver has taken ownership of both halves.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::drv8305::registers::{Access, RegisterAddress, DATA_MASK};
use crate::hal::{ChipSelect, SpiPort};

/// One thing that happened on the mock bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    ChipSelectLow,
    ChipSelectHigh,
    /// The first two bytes written during a transfer
    Transfer([u8; 2]),
}

struct MockState {
    registers: [u16; 16],
    dont_care: u16,
    cs_high: bool,
    events: Vec<BusEvent>,
    fail_next_transfer: bool,
    short_next_transfer: Option<usize>,
    fail_chip_select: bool,
    fail_chip_select_release: bool,
    transfer_delay: Option<Duration>,
}

/// Shared handle to a simulated DRV8305 and its bus.
#[derive(Clone)]
pub struct MockBus {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBus {
    pub fn new() -> Self {
        MockBus {
            state: Arc::new(Mutex::new(MockState {
                registers: [0; 16],
                dont_care: 0,
                cs_high: true,
                events: Vec::new(),
                fail_next_transfer: false,
                short_next_transfer: None,
                fail_chip_select: false,
                fail_chip_select_release: false,
                transfer_delay: None,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn spi(&self) -> MockSpi {
        debug!("Creating mock SPI port");
        MockSpi { bus: self.clone() }
    }

    pub fn chip_select(&self) -> MockChipSelect {
        debug!("Creating mock chip select");
        MockChipSelect { bus: self.clone() }
    }

    /// Set the 11 data bits the chip returns for `address`.
    pub fn set_register(&self, address: RegisterAddress, bits: u16) {
        self.state().registers[address.value() as usize] = bits & DATA_MASK;
    }

    /// Current contents of `address`, including accepted writes.
    pub fn register(&self, address: RegisterAddress) -> u16 {
        self.state().registers[address.value() as usize]
    }

    /// Value placed in the five undefined top bits of every response.
    pub fn set_dont_care_bits(&self, bits: u16) {
        self.state().dont_care = bits & 0x1F;
    }

    pub fn fail_next_transfer(&self) {
        self.state().fail_next_transfer = true;
    }

    /// Make the next transfer move only `bytes` bytes.
    pub fn short_next_transfer(&self, bytes: usize) {
        self.state().short_next_transfer = Some(bytes);
    }

    pub fn fail_chip_select(&self) {
        self.state().fail_chip_select = true;
    }

    /// Make every chip-select release fail, leaving the line low.
    pub fn fail_chip_select_release(&self) {
        self.state().fail_chip_select_release = true;
    }

    pub fn set_transfer_delay(&self, delay: Duration) {
        self.state().transfer_delay = Some(delay);
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.state().events.clone()
    }

    /// Command words written so far, in order.
    pub fn sent_words(&self) -> Vec<[u8; 2]> {
        self.state()
            .events
            .iter()
            .filter_map(|event| match event {
                BusEvent::Transfer(word) => Some(*word),
                _ => None,
            })
            .collect()
    }

    pub fn transfer_count(&self) -> usize {
        self.sent_words().len()
    }

    pub fn chip_select_is_high(&self) -> bool {
        self.state().cs_high
    }
}

/// SPI half of a `MockBus`.
pub struct MockSpi {
    bus: MockBus,
}

impl SpiPort for MockSpi {
    fn transfer(
        &mut self,
        read_buffer: &mut [u8],
        write_buffer: &[u8],
    ) -> Result<usize, io::Error> {
        let mut state = self.bus.state();
        if write_buffer.len() < 2 || read_buffer.len() < 2 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "DRV8305 frames are 2 bytes",
            ));
        }
        state.events.push(BusEvent::Transfer([write_buffer[0], write_buffer[1]]));

        if state.fail_next_transfer {
            state.fail_next_transfer = false;
            return Err(io::Error::new(io::ErrorKind::Other, "injected SPI failure"));
        }
        if let Some(delay) = state.transfer_delay {
            thread::sleep(delay);
        }

        let command = u16::from_be_bytes([write_buffer[0], write_buffer[1]]);
        let response = if state.cs_high {
            warn!("Mock SPI transfer with chip select high; device not listening");
            0
        } else {
            let address = ((command >> 11) & 0x0F) as usize;
            let current = state.registers[address];
            let is_read = command & 0x8000 != 0;
            if !is_read {
                let writable = RegisterAddress::try_from(address as u8)
                    .map(|a| a.access() == Access::ReadWrite)
                    .unwrap_or(false);
                if writable {
                    state.registers[address] = command & DATA_MASK;
                }
            }
            (state.dont_care << 11) | current
        };

        let bytes = response.to_be_bytes();
        let moved = state.short_next_transfer.take().unwrap_or(2).min(2);
        read_buffer[..moved].copy_from_slice(&bytes[..moved]);
        Ok(moved)
    }
}

/// Chip-select half of a `MockBus`.
pub struct MockChipSelect {
    bus: MockBus,
}

impl ChipSelect for MockChipSelect {
    fn set_low(&mut self) -> Result<(), io::Error> {
        let mut state = self.bus.state();
        if state.fail_chip_select {
            return Err(io::Error::new(io::ErrorKind::Other, "injected chip select failure"));
        }
        state.cs_high = false;
        state.events.push(BusEvent::ChipSelectLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), io::Error> {
        let mut state = self.bus.state();
        if state.fail_chip_select_release {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "injected chip select release failure",
            ));
        }
        state.cs_high = true;
        state.events.push(BusEvent::ChipSelectHigh);
        Ok(())
    }
}
