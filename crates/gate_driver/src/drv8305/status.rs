//! Read-only registers: the status registers (0x01 - 0x04) and the reserved register (0x08).

use super::layout::RegisterLayout;
use super::registers::{bit, put_bit, RegisterAddress, DATA_MASK};

/// Warning and watchdog reset register (0x01).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarningWatchdog {
    /// Set if any fault or warning bit in the chip is set
    pub fault: bool,
    /// Reserved bits kept in place
    pub reserved: u16,
    pub temp4: bool,
    pub pvdd_uv: bool,
    pub pvdd_ov: bool,
    pub vds_status: bool,
    pub vchp_uv: bool,
    pub temp1: bool,
    pub temp2: bool,
    pub temp3: bool,
    pub overtemp: bool,
}

impl WarningWatchdog {
    const RESERVED_MASK: u16 = 1 << 9;

    /// True if any named warning other than the aggregate `fault` flag is set.
    pub fn any_warning(&self) -> bool {
        self.temp4
            || self.pvdd_uv
            || self.pvdd_ov
            || self.vds_status
            || self.vchp_uv
            || self.temp1
            || self.temp2
            || self.temp3
            || self.overtemp
    }
}

impl RegisterLayout for WarningWatchdog {
    const ADDRESS: RegisterAddress = RegisterAddress::WarningWatchdog;

    fn from_bits(bits: u16) -> Self {
        Self {
            fault: bit(bits, 10),
            reserved: bits & Self::RESERVED_MASK,
            temp4: bit(bits, 8),
            pvdd_uv: bit(bits, 7),
            pvdd_ov: bit(bits, 6),
            vds_status: bit(bits, 5),
            vchp_uv: bit(bits, 4),
            temp1: bit(bits, 3),
            temp2: bit(bits, 2),
            temp3: bit(bits, 1),
            overtemp: bit(bits, 0),
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.fault, 10)
            | (self.reserved & Self::RESERVED_MASK)
            | put_bit(self.temp4, 8)
            | put_bit(self.pvdd_uv, 7)
            | put_bit(self.pvdd_ov, 6)
            | put_bit(self.vds_status, 5)
            | put_bit(self.vchp_uv, 4)
            | put_bit(self.temp1, 3)
            | put_bit(self.temp2, 2)
            | put_bit(self.temp3, 1)
            | put_bit(self.overtemp, 0)
    }
}

/// Overvoltage / VDS fault register (0x02).
///
/// `high_*`/`low_*` are the VDS overcurrent flags of each half bridge, `sense_*`
/// the shunt sense overcurrent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overcurrent {
    pub high_a: bool,
    pub low_a: bool,
    pub high_b: bool,
    pub low_b: bool,
    pub high_c: bool,
    pub low_c: bool,
    /// Two reserved bits, kept in place
    pub reserved: u16,
    pub sense_c: bool,
    pub sense_b: bool,
    pub sense_a: bool,
}

impl Overcurrent {
    const RESERVED_MASK: u16 = 0b11 << 3;

    pub fn any(&self) -> bool {
        self.high_a
            || self.low_a
            || self.high_b
            || self.low_b
            || self.high_c
            || self.low_c
            || self.sense_a
            || self.sense_b
            || self.sense_c
    }
}

impl RegisterLayout for Overcurrent {
    const ADDRESS: RegisterAddress = RegisterAddress::OvVdsFault;

    fn from_bits(bits: u16) -> Self {
        Self {
            high_a: bit(bits, 10),
            low_a: bit(bits, 9),
            high_b: bit(bits, 8),
            low_b: bit(bits, 7),
            high_c: bit(bits, 6),
            low_c: bit(bits, 5),
            reserved: bits & Self::RESERVED_MASK,
            sense_c: bit(bits, 2),
            sense_b: bit(bits, 1),
            sense_a: bit(bits, 0),
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.high_a, 10)
            | put_bit(self.low_a, 9)
            | put_bit(self.high_b, 8)
            | put_bit(self.low_b, 7)
            | put_bit(self.high_c, 6)
            | put_bit(self.low_c, 5)
            | (self.reserved & Self::RESERVED_MASK)
            | put_bit(self.sense_c, 2)
            | put_bit(self.sense_b, 1)
            | put_bit(self.sense_a, 0)
    }
}

/// IC fault register (0x03).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IcFault {
    /// PVDD undervoltage 2
    pub pvdd_uvlo2: bool,
    pub wd_fault: bool,
    /// Overtemperature shutdown
    pub otsd: bool,
    /// Reserved bits D7 and D3, kept in place
    pub reserved: u16,
    pub vreg_uv: bool,
    pub avdd_uvlo: bool,
    /// Low-side charge pump undervoltage
    pub vcp_lsd_uvlo2: bool,
    /// High-side charge pump undervoltage 2
    pub vcph_uvlo2: bool,
    /// High-side charge pump overvoltage
    pub vcph_ovlo: bool,
    /// High-side charge pump overvoltage ABS
    pub vcph_ovlo_abs: bool,
}

impl IcFault {
    const RESERVED_MASK: u16 = (1 << 7) | (1 << 3);
}

impl RegisterLayout for IcFault {
    const ADDRESS: RegisterAddress = RegisterAddress::IcFault;

    fn from_bits(bits: u16) -> Self {
        Self {
            pvdd_uvlo2: bit(bits, 10),
            wd_fault: bit(bits, 9),
            otsd: bit(bits, 8),
            reserved: bits & Self::RESERVED_MASK,
            vreg_uv: bit(bits, 6),
            avdd_uvlo: bit(bits, 5),
            vcp_lsd_uvlo2: bit(bits, 4),
            vcph_uvlo2: bit(bits, 2),
            vcph_ovlo: bit(bits, 1),
            vcph_ovlo_abs: bit(bits, 0),
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.pvdd_uvlo2, 10)
            | put_bit(self.wd_fault, 9)
            | put_bit(self.otsd, 8)
            | (self.reserved & Self::RESERVED_MASK)
            | put_bit(self.vreg_uv, 6)
            | put_bit(self.avdd_uvlo, 5)
            | put_bit(self.vcp_lsd_uvlo2, 4)
            | put_bit(self.vcph_uvlo2, 2)
            | put_bit(self.vcph_ovlo, 1)
            | put_bit(self.vcph_ovlo_abs, 0)
    }
}

/// VGS fault register (0x04). One gate-source fault flag per FET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VgsFault {
    pub high_a: bool,
    pub low_a: bool,
    pub high_b: bool,
    pub low_b: bool,
    pub high_c: bool,
    pub low_c: bool,
    /// D4..D0, kept in place
    pub reserved: u16,
}

impl VgsFault {
    const RESERVED_MASK: u16 = 0x1F;
}

impl RegisterLayout for VgsFault {
    const ADDRESS: RegisterAddress = RegisterAddress::VgsFault;

    fn from_bits(bits: u16) -> Self {
        Self {
            high_a: bit(bits, 10),
            low_a: bit(bits, 9),
            high_b: bit(bits, 8),
            low_b: bit(bits, 7),
            high_c: bit(bits, 6),
            low_c: bit(bits, 5),
            reserved: bits & Self::RESERVED_MASK,
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.high_a, 10)
            | put_bit(self.low_a, 9)
            | put_bit(self.high_b, 8)
            | put_bit(self.low_b, 7)
            | put_bit(self.high_c, 6)
            | put_bit(self.low_c, 5)
            | (self.reserved & Self::RESERVED_MASK)
    }
}

/// Reserved register (0x08). Observed to always read zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservedRegister {
    pub bits: u16,
}

impl RegisterLayout for ReservedRegister {
    const ADDRESS: RegisterAddress = RegisterAddress::Reserved;

    fn from_bits(bits: u16) -> Self {
        Self { bits: bits & DATA_MASK }
    }

    fn to_bits(&self) -> u16 {
        self.bits & DATA_MASK
    }
}
