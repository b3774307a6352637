use std::io;

/// Full-duplex SPI port. Clock polarity and phase are fixed when the port is opened.
pub trait SpiPort: Send + 'static {
    /// Transfer data over SPI (simultaneous read/write).
    ///
    /// Returns the number of bytes actually moved, which may be less than the
    /// buffer length on a faulty bus.
    fn transfer(&mut self, read_buffer: &mut [u8], write_buffer: &[u8]) -> Result<usize, io::Error>;
}

/// Chip-select line driven by the host. Active low.
pub trait ChipSelect: Send + 'static {
    fn set_low(&mut self) -> Result<(), io::Error>;

    fn set_high(&mut self) -> Result<(), io::Error>;
}

impl<T: SpiPort + ?Sized> SpiPort for Box<T> {
    fn transfer(
        &mut self,
        read_buffer: &mut [u8],
        write_buffer: &[u8],
    ) -> Result<usize, io::Error> {
        (**self).transfer(read_buffer, write_buffer)
    }
}

impl<T: ChipSelect + ?Sized> ChipSelect for Box<T> {
    fn set_low(&mut self) -> Result<(), io::Error> {
        (**self).set_low()
    }

    fn set_high(&mut self) -> Result<(), io::Error> {
        (**self).set_high()
    }
}
