//! Register access driver for the DRV8305.

use log::{debug, warn};

use super::command::{CommandWord, ResponseWord};
use super::control::{
    DriveControl, HsGateControl, IcOperation, LsGateControl, ShuntAmplifier, VdsSense,
    VoltageRegulator,
};
use super::layout::{RegisterLayout, RegisterValue};
use super::registers::RegisterAddress;
use super::status::{IcFault, Overcurrent, ReservedRegister, VgsFault, WarningWatchdog};
use crate::hal::{ChipSelect, SpiPort};
use crate::spi_bus::SpiTransport;
use crate::types::{DriverError, Drv8305Config};

/// Every named register, read in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub warning_watchdog: WarningWatchdog,
    pub overcurrent: Overcurrent,
    pub ic_fault: IcFault,
    pub vgs_fault: VgsFault,
    pub hs_gate_control: HsGateControl,
    pub ls_gate_control: LsGateControl,
    pub drive_control: DriveControl,
    pub ic_operation: IcOperation,
    pub shunt_amplifier: ShuntAmplifier,
    pub voltage_regulator: VoltageRegulator,
    pub voltage_sense: VdsSense,
}

/// DRV8305 gate driver on an SPI bus.
///
/// The driver owns the SPI port and chip-select line for its whole lifetime. Every
/// accessor is a single blocking exchange and takes `&mut self`; callers sharing one
/// driver between threads must wrap it in a `Mutex`.
pub struct Drv8305Driver<S: SpiPort, C: ChipSelect> {
    transport: SpiTransport<S, C>,
}

fn unsupported_write(register: RegisterAddress) -> DriverError {
    warn!("Rejected write to {}: register writes are not implemented", register);
    DriverError::Unsupported(format!("write to {}", register))
}

impl<S: SpiPort, C: ChipSelect> Drv8305Driver<S, C> {
    pub fn new(spi: S, cs: C, config: &Drv8305Config) -> Result<Self, DriverError> {
        config.validate()?;
        Ok(Self::from_transport(SpiTransport::new(spi, cs, config.exchange_timeout())))
    }

    pub fn from_transport(transport: SpiTransport<S, C>) -> Self {
        Self { transport }
    }

    /// Give back the SPI port and chip-select line.
    pub fn release(self) -> (S, C) {
        self.transport.release()
    }

    /// Read a register and decode it with its own layout.
    pub fn read<R: RegisterLayout>(&mut self) -> Result<R, DriverError> {
        let response = self.read_raw(R::ADDRESS)?;
        let value = R::decode(response);
        debug!("Read {}: {:?}", R::ADDRESS, value);
        Ok(value)
    }

    /// Read a register without decoding it.
    pub fn read_raw(&mut self, address: RegisterAddress) -> Result<ResponseWord, DriverError> {
        self.transport.exchange(CommandWord::read(address))
    }

    /// Read the register at `address` and decode it with that register's layout.
    pub fn read_value(&mut self, address: RegisterAddress) -> Result<RegisterValue, DriverError> {
        let response = self.read_raw(address)?;
        Ok(RegisterValue::decode(address, response))
    }

    pub fn read_warning_watchdog(&mut self) -> Result<WarningWatchdog, DriverError> {
        self.read()
    }

    pub fn read_overcurrent(&mut self) -> Result<Overcurrent, DriverError> {
        self.read()
    }

    pub fn read_ic_fault(&mut self) -> Result<IcFault, DriverError> {
        self.read()
    }

    pub fn read_vgs_fault(&mut self) -> Result<VgsFault, DriverError> {
        self.read()
    }

    pub fn read_hs_gate_control(&mut self) -> Result<HsGateControl, DriverError> {
        self.read()
    }

    pub fn read_ls_gate_control(&mut self) -> Result<LsGateControl, DriverError> {
        self.read()
    }

    pub fn read_drive_control(&mut self) -> Result<DriveControl, DriverError> {
        self.read()
    }

    pub fn read_reserved(&mut self) -> Result<ReservedRegister, DriverError> {
        self.read()
    }

    pub fn read_ic_operation(&mut self) -> Result<IcOperation, DriverError> {
        self.read()
    }

    pub fn read_shunt_amplifier(&mut self) -> Result<ShuntAmplifier, DriverError> {
        self.read()
    }

    pub fn read_voltage_regulator(&mut self) -> Result<VoltageRegulator, DriverError> {
        self.read()
    }

    pub fn read_voltage_sense(&mut self) -> Result<VdsSense, DriverError> {
        self.read()
    }

    /// Read every named register in address order. Stops at the first error.
    pub fn snapshot(&mut self) -> Result<RegisterSnapshot, DriverError> {
        Ok(RegisterSnapshot {
            warning_watchdog: self.read_warning_watchdog()?,
            overcurrent: self.read_overcurrent()?,
            ic_fault: self.read_ic_fault()?,
            vgs_fault: self.read_vgs_fault()?,
            hs_gate_control: self.read_hs_gate_control()?,
            ls_gate_control: self.read_ls_gate_control()?,
            drive_control: self.read_drive_control()?,
            ic_operation: self.read_ic_operation()?,
            shunt_amplifier: self.read_shunt_amplifier()?,
            voltage_regulator: self.read_voltage_regulator()?,
            voltage_sense: self.read_voltage_sense()?,
        })
    }

    // Register writes need a confirmed packing of each field set into the 11-bit
    // payload. Until then every write fails without touching the bus.

    pub fn write_warning_watchdog(&mut self, _value: WarningWatchdog) -> Result<(), DriverError> {
        Err(unsupported_write(WarningWatchdog::ADDRESS))
    }

    pub fn write_overcurrent(&mut self, _value: Overcurrent) -> Result<(), DriverError> {
        Err(unsupported_write(Overcurrent::ADDRESS))
    }

    pub fn write_ic_fault(&mut self, _value: IcFault) -> Result<(), DriverError> {
        Err(unsupported_write(IcFault::ADDRESS))
    }

    pub fn write_vgs_fault(&mut self, _value: VgsFault) -> Result<(), DriverError> {
        Err(unsupported_write(VgsFault::ADDRESS))
    }

    pub fn write_hs_gate_control(&mut self, _value: HsGateControl) -> Result<(), DriverError> {
        Err(unsupported_write(HsGateControl::ADDRESS))
    }

    pub fn write_ls_gate_control(&mut self, _value: LsGateControl) -> Result<(), DriverError> {
        Err(unsupported_write(LsGateControl::ADDRESS))
    }

    pub fn write_drive_control(&mut self, _value: DriveControl) -> Result<(), DriverError> {
        Err(unsupported_write(DriveControl::ADDRESS))
    }

    pub fn write_ic_operation(&mut self, _value: IcOperation) -> Result<(), DriverError> {
        Err(unsupported_write(IcOperation::ADDRESS))
    }

    pub fn write_shunt_amplifier(&mut self, _value: ShuntAmplifier) -> Result<(), DriverError> {
        Err(unsupported_write(ShuntAmplifier::ADDRESS))
    }

    pub fn write_voltage_regulator(&mut self, _value: VoltageRegulator) -> Result<(), DriverError> {
        Err(unsupported_write(VoltageRegulator::ADDRESS))
    }

    pub fn write_voltage_sense(&mut self, _value: VdsSense) -> Result<(), DriverError> {
        Err(unsupported_write(VdsSense::ADDRESS))
    }
}
