//! S2LP Register Transport
//!
//! This module provides the low-level interface to the S2LP over SPI. Every
//! exchange is a single frame bracketed by chip-select:
//!
//! | Access        | Bytes on MOSI                          |
//! |---------------|----------------------------------------|
//! | Write         | `0x00`, address, data...               |
//! | Read          | `0x01`, address, `0xFF`...             |
//! | Command       | `0x80`, command code                   |
//! | FIFO (burst)  | write/read header, `0xFF`, data...     |
//!
//! The bus is an [`SpiBus`](embedded_hal::spi::SpiBus) rather than an
//! `SpiDevice` because the FIFO may be fed by DMA while chip-select stays
//! asserted, which a transaction-based device cannot express. Chip-select is
//! owned by a [`Frame`] guard: it is asserted when the frame opens and
//! released when the frame is closed or dropped, so an early return through
//! `?` never leaves the chip selected.
//!
//! There is no acknowledge or checksum on this bus; a corrupted exchange is
//! not detectable here.
//!
//! # Example
//! ```ignore
//! use s2lp::{Device, McState0};
//!
//! // Create device with SPI bus and chip-select pin
//! let spi = // ... SpiBus implementation
//! let cs = // ... OutputPin implementation
//! let mut device = Device::new(spi, cs);
//!
//! // Read a register
//! let state: McState0 = device.read_register()?;
//!
//! // Write to the FIFO
//! device.write_fifo(&[0x01, 0x02, 0x03])?;
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use regiface::{
    ByteArray, Command, FromByteArray, ReadableRegister, ToByteArray, WritableRegister,
};

use crate::dma::TxDma;
use crate::registers::FIFO;
use crate::Error;

/// Header byte of a register or FIFO write.
pub const HEADER_WRITE: u8 = 0x00;
/// Header byte of a register or FIFO read.
pub const HEADER_READ: u8 = 0x01;
/// Header byte of a command.
pub const HEADER_COMMAND: u8 = 0x80;
/// Byte clocked out while reading.
pub const DUMMY: u8 = 0xFF;

/// Register transport for the S2LP.
///
/// Wraps the SPI bus and the chip-select pin. All accesses borrow the device
/// mutably, so frames can never interleave from safe code.
pub struct Device<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Device<SPI, CS> {
    /// Creates a new transport from an SPI bus and the chip-select pin.
    ///
    /// The pin is expected to be already driven high (chip deselected).
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Releases the underlying SPI bus and chip-select pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

/// An open chip-select frame.
///
/// Chip-select is asserted for the whole lifetime of the frame. Use
/// [`Frame::close`] to release it and observe pin errors; dropping the frame
/// releases it too, ignoring errors.
pub struct Frame<'a, SPI, CS: OutputPin> {
    device: &'a mut Device<SPI, CS>,
}

impl<'a, SPI, CS: OutputPin> Frame<'a, SPI, CS> {
    fn open(device: &'a mut Device<SPI, CS>) -> Result<Self, Error> {
        device.cs.set_low().map_err(|_| Error::ChipSelect)?;
        Ok(Self { device })
    }

    /// Bus access while chip-select is held.
    pub fn spi(&mut self) -> &mut SPI {
        &mut self.device.spi
    }

    /// Releases chip-select.
    pub fn close(self) -> Result<(), Error> {
        let result = self.device.cs.set_high().map_err(|_| Error::ChipSelect);
        core::mem::forget(self);
        result
    }
}

impl<SPI, CS: OutputPin> Drop for Frame<'_, SPI, CS> {
    fn drop(&mut self) {
        let _ = self.device.cs.set_high();
    }
}

fn infallible<T>(value: Result<T, Infallible>) -> T {
    match value {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<SPI, CS> Device<SPI, CS>
where
    SPI: embedded_hal::spi::SpiBus<u8>,
    CS: OutputPin,
{
    /// Asserts chip-select and returns the frame guard.
    ///
    /// The frame stays open until it is closed or dropped. Bytes written
    /// through [`Frame::spi`] must be flushed before closing.
    pub fn frame(&mut self) -> Result<Frame<'_, SPI, CS>, Error> {
        Frame::open(self)
    }

    /// Writes a raw byte to a register address.
    ///
    /// Used for indexed registers (GPIOx_CONF, IRQ_MASKx, SYNCx, FIFO
    /// thresholds) whose address is only known at runtime.
    pub fn write_raw(&mut self, address: u8, value: u8) -> Result<(), Error> {
        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_WRITE, address, value])
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Reads a raw byte from a register address.
    pub fn read_raw(&mut self, address: u8) -> Result<u8, Error> {
        let mut value = [DUMMY];
        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_READ, address])
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(&mut value)
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()?;
        Ok(value[0])
    }

    /// Reads a register value from the device.
    ///
    /// # Type Parameters
    /// * `R` - Register type implementing ReadableRegister with u8 ID
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::ChipSelect` - chip-select could not be driven
    /// * `Error::Deserialization` - Failed to parse register value
    pub fn read_register<R>(&mut self) -> Result<R, Error>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();
        raw_value.as_mut().fill(DUMMY);

        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_READ, R::id()])
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(raw_value.as_mut())
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()?;

        R::from_bytes(raw_value).map_err(|_| Error::Deserialization)
    }

    /// Writes a value to a device register.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::ChipSelect` - chip-select could not be driven
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = infallible(register.to_bytes());

        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_WRITE, R::id()])
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .write(raw_value.as_ref())
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Reads a register, applies `f` and writes the result back.
    ///
    /// The two accesses are separate frames. Nothing else can use the bus
    /// in between since the device is borrowed mutably.
    pub fn modify_register<R, F>(&mut self, f: F) -> Result<R, Error>
    where
        R: ReadableRegister<IdType = u8> + WritableRegister<IdType = u8, Error = Infallible> + Copy,
        F: FnOnce(R) -> R,
    {
        let value = f(self.read_register::<R>()?);
        self.write_register(value)?;
        Ok(value)
    }

    /// Sends a command to the chip.
    ///
    /// S2LP commands carry no parameters and return nothing; the effect is
    /// observed through MC_STATE0.
    pub fn execute_command<C>(&mut self, _command: C) -> Result<(), Error>
    where
        C: Command<IdType = u8>,
    {
        self.send_command(C::id())
    }

    /// Sends a raw command code.
    pub fn send_command(&mut self, code: u8) -> Result<(), Error> {
        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_COMMAND, code])
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Burst-reads the RX FIFO into `bytes`.
    pub fn read_fifo(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        bytes.fill(DUMMY);

        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_READ, FIFO])
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(bytes)
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Burst-writes `bytes` to the TX FIFO from the CPU.
    pub fn write_fifo(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_WRITE, FIFO])
            .map_err(|_| Error::Bus)?;
        frame.spi().write(bytes).map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Burst-writes `bytes` to the TX FIFO through a DMA streamer.
    ///
    /// The header goes out from the CPU, then the payload is handed to
    /// `streamer` while chip-select stays asserted. The streamer returns
    /// only once the transfer completed.
    pub fn write_fifo_with<T>(&mut self, bytes: &[u8], streamer: &mut T) -> Result<(), Error>
    where
        T: TxDma,
    {
        let mut frame = self.frame()?;
        frame
            .spi()
            .write(&[HEADER_WRITE, FIFO])
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().map_err(|_| Error::Bus)?;
        streamer.stream(bytes);
        frame.spi().flush().map_err(|_| Error::Bus)?;
        frame.close()
    }
}

impl<SPI, CS> Device<SPI, CS>
where
    SPI: embedded_hal_async::spi::SpiBus<u8>,
    CS: OutputPin,
{
    /// Asynchronously reads a raw byte from a register address.
    ///
    /// This is the async version of [`read_raw`](Device::read_raw).
    pub async fn read_raw_async(&mut self, address: u8) -> Result<u8, Error> {
        let mut value = [DUMMY];
        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_READ, address])
            .await
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(&mut value)
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()?;
        Ok(value[0])
    }

    /// Asynchronously reads a register value from the device.
    ///
    /// This is the async version of [`read_register`](Device::read_register).
    pub async fn read_register_async<R>(&mut self) -> Result<R, Error>
    where
        R: ReadableRegister<IdType = u8>,
    {
        let mut raw_value = R::Array::new();
        raw_value.as_mut().fill(DUMMY);

        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_READ, R::id()])
            .await
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(raw_value.as_mut())
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()?;

        R::from_bytes(raw_value).map_err(|_| Error::Deserialization)
    }

    /// Asynchronously writes a value to a device register.
    ///
    /// This is the async version of [`write_register`](Device::write_register).
    pub async fn write_register_async<R>(&mut self, register: R) -> Result<(), Error>
    where
        R: WritableRegister<IdType = u8, Error = Infallible>,
    {
        let raw_value = infallible(register.to_bytes());

        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_WRITE, R::id()])
            .await
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .write(raw_value.as_ref())
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Asynchronously sends a command to the chip.
    ///
    /// This is the async version of [`execute_command`](Device::execute_command).
    pub async fn execute_command_async<C>(&mut self, _command: C) -> Result<(), Error>
    where
        C: Command<IdType = u8>,
    {
        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_COMMAND, C::id()])
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Asynchronously burst-reads the RX FIFO.
    ///
    /// This is the async version of [`read_fifo`](Device::read_fifo).
    pub async fn read_fifo_async(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        bytes.fill(DUMMY);

        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_READ, FIFO])
            .await
            .map_err(|_| Error::Bus)?;
        frame
            .spi()
            .transfer_in_place(bytes)
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()
    }

    /// Asynchronously burst-writes the TX FIFO.
    ///
    /// This is the async version of [`write_fifo`](Device::write_fifo).
    pub async fn write_fifo_async(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut frame = Frame::open(self)?;
        frame
            .spi()
            .write(&[HEADER_WRITE, FIFO])
            .await
            .map_err(|_| Error::Bus)?;
        frame.spi().write(bytes).await.map_err(|_| Error::Bus)?;
        frame.spi().flush().await.map_err(|_| Error::Bus)?;
        frame.close()
    }
}
