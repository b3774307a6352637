//! Command and response word codec.
//!
//! Every DRV8305 transaction is one 16-bit word each way, sent MSB first:
//!
//! ```text
//!  15 | 14 13 12 11 | 10 ........ 0
//! R/W |   address   |     data
//! ```
//!
//! R/W is 1 for a read. In a response the top five bits are undefined and only the
//! 11 data bits carry meaning. A response does not say which register it came from;
//! that is known only from the command that produced it.

use std::fmt;

use log::warn;

use super::registers::{RegisterAddress, ADDRESS_MASK, DATA_MASK};

const READ_FLAG: u16 = 1 << 15;
const ADDRESS_SHIFT: u16 = 11;

/// Outgoing 16-bit command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandWord(u16);

/// Build a command word.
///
/// The payload is masked to 11 bits. Masked-off bits are logged and dropped, never
/// rejected. A read keeps whatever payload it is given; the chip ignores it.
pub fn encode(is_read: bool, address: RegisterAddress, payload: u16) -> CommandWord {
    if payload & !DATA_MASK != 0 {
        warn!(
            "Payload {:#06x} for {} exceeds 11 bits; sending {:#05x}",
            payload,
            address,
            payload & DATA_MASK
        );
    }
    let mut word = ((address.value() & ADDRESS_MASK) as u16) << ADDRESS_SHIFT;
    word |= payload & DATA_MASK;
    if is_read {
        word |= READ_FLAG;
    }
    CommandWord(word)
}

impl CommandWord {
    /// Read command for `address` with a zero payload.
    pub fn read(address: RegisterAddress) -> Self {
        encode(true, address, 0)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_read(self) -> bool {
        self.0 & READ_FLAG != 0
    }

    /// Raw 4-bit address field.
    pub fn address(self) -> u8 {
        ((self.0 >> ADDRESS_SHIFT) as u8) & ADDRESS_MASK
    }

    pub fn payload(self) -> u16 {
        self.0 & DATA_MASK
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.to_bytes();
        write!(f, "{:02X} {:02X}", hi, lo)
    }
}

/// Incoming 16-bit response word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseWord(u16);

impl ResponseWord {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        ResponseWord(u16::from_be_bytes(bytes))
    }

    pub fn from_bits(bits: u16) -> Self {
        ResponseWord(bits)
    }

    /// The full word, including the undefined top bits.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// The 11 meaningful bits.
    pub fn data(self) -> u16 {
        self.0 & DATA_MASK
    }
}

impl fmt::Display for ResponseWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [hi, lo] = self.0.to_be_bytes();
        write!(f, "{:02X} {:02X}", hi, lo)
    }
}
