//! Register map and bit helpers for the DRV8305.

use std::fmt;

use crate::types::DriverError;

/// Mask for the 11 data bits of a command or response word.
pub const DATA_MASK: u16 = 0x07FF;
/// Mask for the 4 address bits.
pub const ADDRESS_MASK: u8 = 0x0F;

/// Addressable registers of the DRV8305.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RegisterAddress {
    WarningWatchdog = 0x01,
    OvVdsFault = 0x02,
    IcFault = 0x03,
    VgsFault = 0x04,
    HsGateDriveControl = 0x05,
    LsGateDriveControl = 0x06,
    GateDriveControl = 0x07,
    /// Always reads zero
    Reserved = 0x08,
    IcOperation = 0x09,
    ShuntAmplifierControl = 0x0A,
    VoltageRegulatorControl = 0x0B,
    VdsSenseControl = 0x0C,
}

impl RegisterAddress {
    /// Every register, in address order.
    pub const ALL: [RegisterAddress; 12] = [
        RegisterAddress::WarningWatchdog,
        RegisterAddress::OvVdsFault,
        RegisterAddress::IcFault,
        RegisterAddress::VgsFault,
        RegisterAddress::HsGateDriveControl,
        RegisterAddress::LsGateDriveControl,
        RegisterAddress::GateDriveControl,
        RegisterAddress::Reserved,
        RegisterAddress::IcOperation,
        RegisterAddress::ShuntAmplifierControl,
        RegisterAddress::VoltageRegulatorControl,
        RegisterAddress::VdsSenseControl,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static RegisterInfo {
        // REGISTER_MAP is ordered by address starting at 0x01
        &REGISTER_MAP[self as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn access(self) -> Access {
        self.info().access
    }
}

impl TryFrom<u8> for RegisterAddress {
    type Error = DriverError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RegisterAddress::ALL
            .iter()
            .copied()
            .find(|address| address.value() == value)
            .ok_or(DriverError::InvalidRegister(value))
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.value())
    }
}

/// Access rights of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Static description of one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    pub address: RegisterAddress,
    pub name: &'static str,
    pub access: Access,
}

pub static REGISTER_MAP: [RegisterInfo; 12] = [
    RegisterInfo {
        address: RegisterAddress::WarningWatchdog,
        name: "Warning/Watchdog Reset",
        access: Access::ReadOnly,
    },
    RegisterInfo {
        address: RegisterAddress::OvVdsFault,
        name: "Overvoltage/VDS Fault",
        access: Access::ReadOnly,
    },
    RegisterInfo {
        address: RegisterAddress::IcFault,
        name: "IC Fault",
        access: Access::ReadOnly,
    },
    RegisterInfo {
        address: RegisterAddress::VgsFault,
        name: "VGS Fault",
        access: Access::ReadOnly,
    },
    RegisterInfo {
        address: RegisterAddress::HsGateDriveControl,
        name: "HS Gate Drive Control",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::LsGateDriveControl,
        name: "LS Gate Drive Control",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::GateDriveControl,
        name: "Gate Drive Control",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::Reserved,
        name: "Reserved",
        access: Access::ReadOnly,
    },
    RegisterInfo {
        address: RegisterAddress::IcOperation,
        name: "IC Operation",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::ShuntAmplifierControl,
        name: "Shunt Amplifier Control",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::VoltageRegulatorControl,
        name: "Voltage Regulator Control",
        access: Access::ReadWrite,
    },
    RegisterInfo {
        address: RegisterAddress::VdsSenseControl,
        name: "VDS Sense Control",
        access: Access::ReadWrite,
    },
];

/// Read a single bit of a data word.
#[inline]
pub(crate) const fn bit(bits: u16, n: u8) -> bool {
    bits & (1 << n) != 0
}

/// Read a `width`-bit unsigned field whose least significant bit is `lsb`.
#[inline]
pub(crate) const fn field(bits: u16, lsb: u8, width: u8) -> u8 {
    ((bits >> lsb) & ((1 << width) - 1)) as u8
}

#[inline]
pub(crate) const fn put_bit(value: bool, n: u8) -> u16 {
    (value as u16) << n
}

/// Place a field at `lsb`, masking the value to `width` bits.
#[inline]
pub(crate) const fn put_field(value: u8, lsb: u8, width: u8) -> u16 {
    ((value as u16) & ((1 << width) - 1)) << lsb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_map_is_indexed_by_address() {
        for address in RegisterAddress::ALL {
            assert_eq!(address.info().address, address);
            assert!(address.value() <= ADDRESS_MASK);
        }
    }

    #[test]
    fn test_try_from_round_trip() {
        for address in RegisterAddress::ALL {
            assert_eq!(RegisterAddress::try_from(address.value()).unwrap(), address);
        }
        assert!(matches!(RegisterAddress::try_from(0x00), Err(DriverError::InvalidRegister(0x00))));
        assert!(matches!(RegisterAddress::try_from(0x0D), Err(DriverError::InvalidRegister(0x0D))));
    }

    #[test]
    fn test_access_rights() {
        assert_eq!(RegisterAddress::WarningWatchdog.access(), Access::ReadOnly);
        assert_eq!(RegisterAddress::VgsFault.access(), Access::ReadOnly);
        assert_eq!(RegisterAddress::Reserved.access(), Access::ReadOnly);
        assert_eq!(RegisterAddress::GateDriveControl.access(), Access::ReadWrite);
        assert_eq!(RegisterAddress::VdsSenseControl.access(), Access::ReadWrite);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RegisterAddress::ShuntAmplifierControl.to_string(),
            "Shunt Amplifier Control (0x0a)"
        );
    }

    #[test]
    fn test_bit_helpers() {
        assert!(bit(0b100, 2));
        assert!(!bit(0b100, 1));
        assert_eq!(field(0b0111_0000, 4, 3), 0b111);
        assert_eq!(put_field(0xFF, 3, 2), 0b11 << 3);
        assert_eq!(put_bit(true, 10), 0x400);
    }
}
