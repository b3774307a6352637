pub mod types;
pub mod hal;
pub mod spi_bus;
pub mod mock_hal;
#[cfg(feature = "pi-hardware")]
pub mod rppal_hal;
pub mod drv8305;

// Re-export the main types that users need
pub use types::{DriverError, Drv8305Config};
pub use drv8305::{Drv8305Driver, RegisterAddress, RegisterLayout, RegisterSnapshot, RegisterValue};

// Optionally expose lower-level access through a raw module
pub mod raw {
    pub use crate::drv8305::*;
    pub use crate::hal::*;
    pub use crate::spi_bus::*;
}
