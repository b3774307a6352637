//! Control registers (0x05 - 0x07, 0x09 - 0x0C).
//!
//! Multi-bit fields hold the raw datasheet code, not a physical value.

use super::layout::RegisterLayout;
use super::registers::{bit, field, put_bit, put_field, RegisterAddress};

macro_rules! gate_drive_register {
    ($(#[$meta:meta])* $name:ident, $address:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            /// D10, kept in place
            pub reserved: u16,
            /// Peak drive time code (2 bits)
            pub drive_time: u8,
            /// Peak sink current code (4 bits)
            pub sink_current: u8,
            /// Peak source current code (4 bits)
            pub source_current: u8,
        }

        impl RegisterLayout for $name {
            const ADDRESS: RegisterAddress = $address;

            fn from_bits(bits: u16) -> Self {
                Self {
                    reserved: bits & (1 << 10),
                    drive_time: field(bits, 8, 2),
                    sink_current: field(bits, 4, 4),
                    source_current: field(bits, 0, 4),
                }
            }

            fn to_bits(&self) -> u16 {
                (self.reserved & (1 << 10))
                    | put_field(self.drive_time, 8, 2)
                    | put_field(self.sink_current, 4, 4)
                    | put_field(self.source_current, 0, 4)
            }
        }
    };
}

gate_drive_register!(
    /// High-side gate drive control (0x05): TDRIVEN, IDRIVEN_HS, IDRIVEP_HS.
    HsGateControl,
    RegisterAddress::HsGateDriveControl
);

gate_drive_register!(
    /// Low-side gate drive control (0x06): TDRIVEP, IDRIVEN_LS, IDRIVEP_LS.
    LsGateControl,
    RegisterAddress::LsGateDriveControl
);

/// Gate drive control register (0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveControl {
    /// D10, kept in place
    pub reserved: u16,
    /// COMM_OPTION: active instead of diode freewheeling
    pub active_freewheeling: bool,
    pub pwm_mode_msb: bool,
    pub pwm_mode_lsb: bool,
    /// Dead time code (3 bits)
    pub dead_time: u8,
    /// TBLANK code (2 bits)
    pub vds_sense_blanking: u8,
    /// TVDS code (2 bits)
    pub vds_sense_deglitch: u8,
}

impl DriveControl {
    /// Two-bit PWM mode assembled from its two stored bits.
    pub fn pwm_mode(&self) -> u8 {
        ((self.pwm_mode_msb as u8) << 1) | self.pwm_mode_lsb as u8
    }
}

impl RegisterLayout for DriveControl {
    const ADDRESS: RegisterAddress = RegisterAddress::GateDriveControl;

    fn from_bits(bits: u16) -> Self {
        Self {
            reserved: bits & (1 << 10),
            active_freewheeling: bit(bits, 9),
            pwm_mode_msb: bit(bits, 8),
            pwm_mode_lsb: bit(bits, 7),
            dead_time: field(bits, 4, 3),
            vds_sense_blanking: field(bits, 2, 2),
            vds_sense_deglitch: field(bits, 0, 2),
        }
    }

    fn to_bits(&self) -> u16 {
        (self.reserved & (1 << 10))
            | put_bit(self.active_freewheeling, 9)
            | put_bit(self.pwm_mode_msb, 8)
            | put_bit(self.pwm_mode_lsb, 7)
            | put_field(self.dead_time, 4, 3)
            | put_field(self.vds_sense_blanking, 2, 2)
            | put_field(self.vds_sense_deglitch, 0, 2)
    }
}

/// IC operation register (0x09).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IcOperation {
    /// Report overtemperature shutdown instead of latching
    pub flip_otsd: bool,
    pub dis_pvdd_uvlo2: bool,
    pub dis_gdrv_fault: bool,
    pub en_sns_clamp: bool,
    /// Watchdog delay code (2 bits)
    pub wd_dly: u8,
    pub dis_sns_ocp: bool,
    pub wd_en: bool,
    pub sleep: bool,
    pub clr_flts: bool,
    pub set_vcph_uv: bool,
}

impl RegisterLayout for IcOperation {
    const ADDRESS: RegisterAddress = RegisterAddress::IcOperation;

    fn from_bits(bits: u16) -> Self {
        Self {
            flip_otsd: bit(bits, 10),
            dis_pvdd_uvlo2: bit(bits, 9),
            dis_gdrv_fault: bit(bits, 8),
            en_sns_clamp: bit(bits, 7),
            wd_dly: field(bits, 5, 2),
            dis_sns_ocp: bit(bits, 4),
            wd_en: bit(bits, 3),
            sleep: bit(bits, 2),
            clr_flts: bit(bits, 1),
            set_vcph_uv: bit(bits, 0),
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.flip_otsd, 10)
            | put_bit(self.dis_pvdd_uvlo2, 9)
            | put_bit(self.dis_gdrv_fault, 8)
            | put_bit(self.en_sns_clamp, 7)
            | put_field(self.wd_dly, 5, 2)
            | put_bit(self.dis_sns_ocp, 4)
            | put_bit(self.wd_en, 3)
            | put_bit(self.sleep, 2)
            | put_bit(self.clr_flts, 1)
            | put_bit(self.set_vcph_uv, 0)
    }
}

/// Shunt amplifier control register (0x0A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShuntAmplifier {
    pub dc_cal_ch3: bool,
    pub dc_cal_ch2: bool,
    pub dc_cal_ch1: bool,
    /// Current shunt amplifier blanking time code (2 bits)
    pub cs_blank: u8,
    pub gain_cs3: u8,
    pub gain_cs2: u8,
    pub gain_cs1: u8,
}

impl ShuntAmplifier {
    /// Gain of shunt amplifier `channel` (1..=3) in V/V.
    pub fn gain(&self, channel: u8) -> Option<u16> {
        let code = match channel {
            1 => self.gain_cs1,
            2 => self.gain_cs2,
            3 => self.gain_cs3,
            _ => return None,
        };
        Some(10 << (code & 0b11))
    }
}

impl RegisterLayout for ShuntAmplifier {
    const ADDRESS: RegisterAddress = RegisterAddress::ShuntAmplifierControl;

    fn from_bits(bits: u16) -> Self {
        Self {
            dc_cal_ch3: bit(bits, 10),
            dc_cal_ch2: bit(bits, 9),
            dc_cal_ch1: bit(bits, 8),
            cs_blank: field(bits, 6, 2),
            gain_cs3: field(bits, 4, 2),
            gain_cs2: field(bits, 2, 2),
            gain_cs1: field(bits, 0, 2),
        }
    }

    fn to_bits(&self) -> u16 {
        put_bit(self.dc_cal_ch3, 10)
            | put_bit(self.dc_cal_ch2, 9)
            | put_bit(self.dc_cal_ch1, 8)
            | put_field(self.cs_blank, 6, 2)
            | put_field(self.gain_cs3, 4, 2)
            | put_field(self.gain_cs2, 2, 2)
            | put_field(self.gain_cs1, 0, 2)
    }
}

/// Voltage regulator control register (0x0B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoltageRegulator {
    /// D10 and D7..D5, kept in place
    pub reserved: u16,
    /// VREF scaling code (2 bits)
    pub vref_scale: u8,
    /// Delay before VREG power down on sleep (2 bits)
    pub sleep_dly: u8,
    pub dis_vreg_pwrgd: bool,
    /// VREG undervoltage threshold code (2 bits)
    pub vreg_uv_level: u8,
}

impl VoltageRegulator {
    const RESERVED_MASK: u16 = (1 << 10) | (0b111 << 5);
}

impl RegisterLayout for VoltageRegulator {
    const ADDRESS: RegisterAddress = RegisterAddress::VoltageRegulatorControl;

    fn from_bits(bits: u16) -> Self {
        Self {
            reserved: bits & Self::RESERVED_MASK,
            vref_scale: field(bits, 8, 2),
            sleep_dly: field(bits, 3, 2),
            dis_vreg_pwrgd: bit(bits, 2),
            vreg_uv_level: field(bits, 0, 2),
        }
    }

    fn to_bits(&self) -> u16 {
        (self.reserved & Self::RESERVED_MASK)
            | put_field(self.vref_scale, 8, 2)
            | put_field(self.sleep_dly, 3, 2)
            | put_bit(self.dis_vreg_pwrgd, 2)
            | put_field(self.vreg_uv_level, 0, 2)
    }
}

/// VDS sense control register (0x0C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VdsSense {
    /// D10..D8, kept in place
    pub reserved: u16,
    /// VDS comparator threshold code (5 bits)
    pub vds_level: u8,
    /// VDS protection mode code (3 bits)
    pub vds_mode: u8,
}

impl RegisterLayout for VdsSense {
    const ADDRESS: RegisterAddress = RegisterAddress::VdsSenseControl;

    fn from_bits(bits: u16) -> Self {
        Self {
            reserved: bits & (0b111 << 8),
            vds_level: field(bits, 3, 5),
            vds_mode: field(bits, 0, 3),
        }
    }

    fn to_bits(&self) -> u16 {
        (self.reserved & (0b111 << 8))
            | put_field(self.vds_level, 3, 5)
            | put_field(self.vds_mode, 0, 3)
    }
}
