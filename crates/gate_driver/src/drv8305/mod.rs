//! TI DRV8305 three-phase gate driver.

pub mod command;
pub mod control;
pub mod driver;
pub mod layout;
pub mod registers;
pub mod status;

pub use command::{encode, CommandWord, ResponseWord};
pub use control::{
    DriveControl, HsGateControl, IcOperation, LsGateControl, ShuntAmplifier, VdsSense,
    VoltageRegulator,
};
pub use driver::{Drv8305Driver, RegisterSnapshot};
pub use layout::{RegisterLayout, RegisterValue};
pub use registers::{Access, RegisterAddress, RegisterInfo, REGISTER_MAP};
pub use status::{IcFault, Overcurrent, ReservedRegister, VgsFault, WarningWatchdog};
