//! Typed views of a response word.

use std::fmt::Debug;

use super::command::ResponseWord;
use super::control::{
    DriveControl, HsGateControl, IcOperation, LsGateControl, ShuntAmplifier, VdsSense,
    VoltageRegulator,
};
use super::registers::{RegisterAddress, DATA_MASK};
use super::status::{IcFault, Overcurrent, ReservedRegister, VgsFault, WarningWatchdog};

/// Bit layout of one register's 11 data bits.
///
/// `from_bits` only looks at bits 10..0. `to_bits` puts every field, reserved bits
/// included, back where `from_bits` found it.
pub trait RegisterLayout: Copy + Debug + PartialEq {
    const ADDRESS: RegisterAddress;

    fn from_bits(bits: u16) -> Self;

    fn to_bits(&self) -> u16;

    /// Decode a response to a read of `Self::ADDRESS`.
    fn decode(response: ResponseWord) -> Self {
        Self::from_bits(response.data())
    }
}

/// A decoded register of any kind.
///
/// The variant is picked from the address the caller just read, never from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterValue {
    WarningWatchdog(WarningWatchdog),
    Overcurrent(Overcurrent),
    IcFault(IcFault),
    VgsFault(VgsFault),
    HsGateControl(HsGateControl),
    LsGateControl(LsGateControl),
    DriveControl(DriveControl),
    Reserved(ReservedRegister),
    IcOperation(IcOperation),
    ShuntAmplifier(ShuntAmplifier),
    VoltageRegulator(VoltageRegulator),
    VdsSense(VdsSense),
}

impl RegisterValue {
    pub fn decode(address: RegisterAddress, response: ResponseWord) -> Self {
        match address {
            RegisterAddress::WarningWatchdog => {
                Self::WarningWatchdog(WarningWatchdog::decode(response))
            }
            RegisterAddress::OvVdsFault => Self::Overcurrent(Overcurrent::decode(response)),
            RegisterAddress::IcFault => Self::IcFault(IcFault::decode(response)),
            RegisterAddress::VgsFault => Self::VgsFault(VgsFault::decode(response)),
            RegisterAddress::HsGateDriveControl => {
                Self::HsGateControl(HsGateControl::decode(response))
            }
            RegisterAddress::LsGateDriveControl => {
                Self::LsGateControl(LsGateControl::decode(response))
            }
            RegisterAddress::GateDriveControl => Self::DriveControl(DriveControl::decode(response)),
            RegisterAddress::Reserved => Self::Reserved(ReservedRegister::decode(response)),
            RegisterAddress::IcOperation => Self::IcOperation(IcOperation::decode(response)),
            RegisterAddress::ShuntAmplifierControl => {
                Self::ShuntAmplifier(ShuntAmplifier::decode(response))
            }
            RegisterAddress::VoltageRegulatorControl => {
                Self::VoltageRegulator(VoltageRegulator::decode(response))
            }
            RegisterAddress::VdsSenseControl => Self::VdsSense(VdsSense::decode(response)),
        }
    }

    pub fn address(&self) -> RegisterAddress {
        match self {
            Self::WarningWatchdog(_) => WarningWatchdog::ADDRESS,
            Self::Overcurrent(_) => Overcurrent::ADDRESS,
            Self::IcFault(_) => IcFault::ADDRESS,
            Self::VgsFault(_) => VgsFault::ADDRESS,
            Self::HsGateControl(_) => HsGateControl::ADDRESS,
            Self::LsGateControl(_) => LsGateControl::ADDRESS,
            Self::DriveControl(_) => DriveControl::ADDRESS,
            Self::Reserved(_) => ReservedRegister::ADDRESS,
            Self::IcOperation(_) => IcOperation::ADDRESS,
            Self::ShuntAmplifier(_) => ShuntAmplifier::ADDRESS,
            Self::VoltageRegulator(_) => VoltageRegulator::ADDRESS,
            Self::VdsSense(_) => VdsSense::ADDRESS,
        }
    }

    pub fn to_bits(&self) -> u16 {
        let bits = match self {
            Self::WarningWatchdog(v) => v.to_bits(),
            Self::Overcurrent(v) => v.to_bits(),
            Self::IcFault(v) => v.to_bits(),
            Self::VgsFault(v) => v.to_bits(),
            Self::HsGateControl(v) => v.to_bits(),
            Self::LsGateControl(v) => v.to_bits(),
            Self::DriveControl(v) => v.to_bits(),
            Self::Reserved(v) => v.to_bits(),
            Self::IcOperation(v) => v.to_bits(),
            Self::ShuntAmplifier(v) => v.to_bits(),
            Self::VoltageRegulator(v) => v.to_bits(),
            Self::VdsSense(v) => v.to_bits(),
        };
        bits & DATA_MASK
    }
}
