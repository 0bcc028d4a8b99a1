//! DMA streaming channel
//!
//! DMA1 channel 3 of the STM32L0 feeds the SPI1 transmit register. The radio
//! driver uses it to push the polar modulation stream into the S2LP TX FIFO
//! while the core sleeps.
//!
//! The channel logic ([`DmaChannel`]) only talks to the hardware through the
//! [`DmaRegisters`] trait, implemented for the real register block by
//! [`Dma1Channel3`]. Completion is reported by the interrupt handler through
//! an [`IrqFlag`]; call [`on_interrupt`] from the `DMA1_CHANNEL2_3` vector.
#![deny(missing_docs)]

mod cr;

use core::ptr::{read_volatile, write_volatile};

use crate::flag::IrqFlag;
use crate::pac;

pub use cr::{Cr, Dir, Priority, Size};

/// IRQ flags
pub mod flags {
    /// Global interrupt, combination of all other interrupts.
    pub const GLOBAL: u8 = 1 << 0;
    /// Transfer complete
    pub const XFER_CPL: u8 = 1 << 1;
    /// Transfer half complete
    pub const XFER_HLF: u8 = 1 << 2;
    /// Transfer error
    pub const XFER_ERR: u8 = 1 << 3;
    /// All flags of one channel
    pub const ALL: u8 = GLOBAL | XFER_CPL | XFER_HLF | XFER_ERR;
}

/// Address of the SPI1 data register.
pub const SPI1_DR: u32 = 0x4001_300C;

/// DMA request number of SPI1_TX on channel 3 (CSELR.C3S).
pub const SPI1_TX_REQUEST: u8 = 0b0001;

/// Channel configuration used to stream memory into SPI1.
pub const SPI_TX_CR: Cr = Cr::RESET
    .set_mem_size(Size::Bits8)
    .set_periph_size(Size::Bits8)
    .set_mem_inc(true)
    .set_periph_inc(false)
    .set_circ(false)
    .set_mem2mem(false)
    .set_dir_from_mem()
    .set_priority(Priority::VeryHigh)
    .set_xfer_cpl_irq_en(true);

/// Register-level access to one DMA channel.
///
/// Methods take `&self`: the implementation is a handle to memory-mapped
/// registers, shared between the main loop and the interrupt handler.
pub trait DmaRegisters {
    /// Enables the DMA controller clock.
    fn enable_clock(&self);
    /// Gates the DMA controller clock.
    fn disable_clock(&self);
    /// Reads the channel configuration register.
    fn cr(&self) -> Cr;
    /// Writes the channel configuration register.
    fn set_cr(&self, cr: Cr);
    /// Sets the peripheral address.
    fn set_peripheral_address(&self, address: u32);
    /// Sets the memory address.
    fn set_memory_address(&self, address: u32);
    /// Sets the number of data items to transfer.
    fn set_transfer_count(&self, count: u16);
    /// Maps a request line on the channel.
    fn set_request(&self, request: u8);
    /// Interrupt flags of the channel, see [`flags`].
    fn flags(&self) -> u8;
    /// Clears the given interrupt flags of the channel.
    fn clear_flags(&self, flags: u8);
    /// Clears the flags of every channel of the controller.
    fn clear_controller_flags(&self);
    /// Unmasks the channel interrupt in the NVIC.
    fn unmask_interrupt(&self);
    /// Masks the channel interrupt in the NVIC.
    fn mask_interrupt(&self);

    /// Clears all interrupt flags of the channel.
    fn clear_all_flags(&self) {
        self.clear_flags(flags::ALL)
    }
}

/// Interrupt handler body.
///
/// Raises `done` on transfer complete, but only if the channel has the
/// transfer complete interrupt enabled. The hardware flag is always cleared.
pub fn on_interrupt<R: DmaRegisters>(regs: &R, done: &IrqFlag) {
    if regs.flags() & flags::XFER_CPL != 0 {
        if regs.cr().xfer_cpl_irq_en() {
            done.raise();
        }
        regs.clear_flags(flags::XFER_CPL);
    }
}

/// Memory-to-SPI DMA channel.
pub struct DmaChannel<'a, R> {
    regs: R,
    done: &'a IrqFlag,
}

impl<'a, R: DmaRegisters> DmaChannel<'a, R> {
    /// Creates the channel. `done` must be the flag given to
    /// [`on_interrupt`] by the interrupt handler.
    pub fn new(regs: R, done: &'a IrqFlag) -> Self {
        Self { regs, done }
    }

    /// Register block of the channel.
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Configures the channel to stream bytes from memory into SPI1.
    pub fn init(&mut self) {
        self.regs.enable_clock();
        self.regs.set_cr(Cr::DISABLE);
        self.regs.set_cr(SPI_TX_CR);
        self.regs.set_peripheral_address(SPI1_DR);
        self.regs.set_request(SPI1_TX_REQUEST);
        self.regs.clear_all_flags();
    }

    /// Arms the channel with a source buffer without starting it.
    ///
    /// The memory behind `address` must stay valid until the transfer is
    /// stopped.
    pub fn set_source(&mut self, address: u32, length: u16) {
        self.regs.set_memory_address(address);
        self.regs.set_transfer_count(length);
        self.regs.clear_all_flags();
    }

    /// Starts the armed transfer.
    pub fn start(&mut self) {
        self.done.clear();
        self.regs.clear_all_flags();
        self.regs.unmask_interrupt();
        self.regs.set_cr(self.regs.cr().set_enable(true));
    }

    /// Stops the channel. A transfer still in flight is abandoned.
    pub fn stop(&mut self) {
        self.done.clear();
        self.regs.set_cr(self.regs.cr().set_enable(false));
        self.regs.mask_interrupt();
    }

    /// Returns `true` once the started transfer completed.
    pub fn get_status(&self) -> bool {
        self.done.is_raised()
    }

    /// Shuts the DMA controller down.
    pub fn disable(&mut self) {
        self.regs.mask_interrupt();
        self.regs.clear_controller_flags();
        self.regs.disable_clock();
    }
}

/// Low-power wait used while a transfer is in flight.
pub trait Wait {
    /// Blocks until the next interrupt.
    fn wait_for_interrupt(&mut self);
}

/// Sleeps with `WFI` between interrupts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wfi;

impl Wait for Wfi {
    fn wait_for_interrupt(&mut self) {
        cortex_m::asm::wfi();
    }
}

/// A way to push a buffer into the S2LP TX FIFO without the CPU.
///
/// Called with chip-select asserted and the FIFO header already sent; must
/// return only once every byte went out.
pub trait TxDma {
    /// Streams `data` to the SPI transmit register.
    ///
    /// An empty buffer is a no-op.
    fn stream(&mut self, data: &[u8]);
}

/// Streams through a [`DmaChannel`], sleeping until completion.
pub struct DmaStreamer<'a, R, W> {
    channel: DmaChannel<'a, R>,
    wait: W,
}

impl<'a, R: DmaRegisters, W: Wait> DmaStreamer<'a, R, W> {
    /// Wraps an initialized channel.
    pub fn new(channel: DmaChannel<'a, R>, wait: W) -> Self {
        Self { channel, wait }
    }

    /// Gives the channel back.
    pub fn release(self) -> (DmaChannel<'a, R>, W) {
        (self.channel, self.wait)
    }
}

impl<R: DmaRegisters, W: Wait> TxDma for DmaStreamer<'_, R, W> {
    fn stream(&mut self, data: &[u8]) {
        // A channel enabled with CNDTR = 0 never completes.
        if data.is_empty() {
            return;
        }
        // The FIFO is 128 bytes, CNDTR is 16 bits wide.
        let length = u16::try_from(data.len()).unwrap_or(u16::MAX);
        self.channel.set_source(data.as_ptr() as u32, length);
        self.channel.start();
        while !self.channel.get_status() {
            self.wait.wait_for_interrupt();
        }
        self.channel.stop();
    }
}

/// Type marker for a driver that writes the FIFO from the CPU.
#[derive(Debug)]
pub enum NoDma {}

impl TxDma for NoDma {
    fn stream(&mut self, _data: &[u8]) {
        match *self {}
    }
}

const DMA1_BASE: usize = 0x4002_0000;
const DMA1_ISR: *mut u32 = DMA1_BASE as *mut u32;
const DMA1_IFCR: *mut u32 = (DMA1_BASE + 0x04) as *mut u32;
const DMA1_CCR3: *mut u32 = (DMA1_BASE + 0x30) as *mut u32;
const DMA1_CNDTR3: *mut u32 = (DMA1_BASE + 0x34) as *mut u32;
const DMA1_CPAR3: *mut u32 = (DMA1_BASE + 0x38) as *mut u32;
const DMA1_CMAR3: *mut u32 = (DMA1_BASE + 0x3C) as *mut u32;
const DMA1_CSELR: *mut u32 = (DMA1_BASE + 0xA8) as *mut u32;

const CH3_SHIFT: u32 = 8;

/// DMA1 channel 3 of the STM32L0.
#[derive(Debug)]
pub struct Dma1Channel3 {
    _priv: (),
}

impl Dma1Channel3 {
    /// Steal the channel.
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the channel has exclusive access.
    ///    Singleton checks are bypassed with this method.
    /// 2. The interrupt handler may hold a second handle; it must only call
    ///    [`on_interrupt`].
    pub const unsafe fn steal() -> Dma1Channel3 {
        Dma1Channel3 { _priv: () }
    }
}

impl DmaRegisters for Dma1Channel3 {
    fn enable_clock(&self) {
        unsafe { (*pac::RCC::PTR).ahbenr.modify(|_, w| w.dmaen().set_bit()) }
    }

    fn disable_clock(&self) {
        unsafe { (*pac::RCC::PTR).ahbenr.modify(|_, w| w.dmaen().clear_bit()) }
    }

    fn cr(&self) -> Cr {
        Cr::new(unsafe { read_volatile(DMA1_CCR3) })
    }

    fn set_cr(&self, cr: Cr) {
        unsafe { write_volatile(DMA1_CCR3, cr.raw()) }
    }

    fn set_peripheral_address(&self, address: u32) {
        unsafe { write_volatile(DMA1_CPAR3, address) }
    }

    fn set_memory_address(&self, address: u32) {
        unsafe { write_volatile(DMA1_CMAR3, address) }
    }

    fn set_transfer_count(&self, count: u16) {
        unsafe { write_volatile(DMA1_CNDTR3, u32::from(count)) }
    }

    fn set_request(&self, request: u8) {
        unsafe {
            let cselr = read_volatile(DMA1_CSELR) & !(0b1111 << CH3_SHIFT);
            write_volatile(DMA1_CSELR, cselr | (u32::from(request & 0xF) << CH3_SHIFT));
        }
    }

    fn flags(&self) -> u8 {
        let raw: u32 = unsafe { read_volatile(DMA1_ISR) };
        ((raw >> CH3_SHIFT) & 0xF) as u8
    }

    fn clear_flags(&self, flags: u8) {
        let val: u32 = u32::from(flags & 0xF) << CH3_SHIFT;
        unsafe { write_volatile(DMA1_IFCR, val) }
    }

    fn clear_controller_flags(&self) {
        unsafe { write_volatile(DMA1_IFCR, 0x0FFF_FFFF) }
    }

    fn unmask_interrupt(&self) {
        unsafe { pac::NVIC::unmask(pac::Interrupt::DMA1_CHANNEL2_3) }
    }

    fn mask_interrupt(&self) {
        pac::NVIC::mask(pac::Interrupt::DMA1_CHANNEL2_3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spi_tx_configuration() {
        assert!(SPI_TX_CR.mem_inc());
        assert!(!SPI_TX_CR.periph_inc());
        assert_eq!(SPI_TX_CR.mem_size(), Some(Size::Bits8));
        assert_eq!(SPI_TX_CR.periph_size(), Some(Size::Bits8));
        assert_eq!(SPI_TX_CR.dir(), Dir::FromMem);
        assert_eq!(SPI_TX_CR.priority(), Priority::VeryHigh);
        assert!(SPI_TX_CR.xfer_cpl_irq_en());
        assert!(!SPI_TX_CR.enabled());
    }
}
