#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::spi::{ErrorKind, ErrorType};
use s2lp::dma::{self, Cr, DmaRegisters, Wait};
use s2lp::exti::ExtiRegisters;
use s2lp::pins::{Pin, PinControl, PinMode};
use s2lp::IrqFlag;

/// Mock SPI error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

impl embedded_hal::spi::Error for MockSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One completed chip-select frame, as seen on MOSI
pub type Frame = Vec<u8>;

/// State of the simulated S2LP
pub struct ChipState {
    pub regs: [u8; 256],
    pub tx_fifo: Vec<u8>,
    pub rx_fifo: VecDeque<u8>,
    pub commands: Vec<u8>,
    /// Values returned by successive MC_STATE0 reads; the register file is
    /// used once the script runs out
    pub mc_state_script: VecDeque<u8>,
    pub reads: Vec<u8>,
    pub frames: Vec<Frame>,
    pub selected: bool,
    pub current: Frame,
    /// Bytes clocked while chip-select was high
    pub cs_violations: usize,
    /// Fail the transfer once this many more bytes have been clocked
    pub fail_after: Option<usize>,
}

impl ChipState {
    fn new() -> Self {
        Self {
            regs: [0; 256],
            tx_fifo: Vec::new(),
            rx_fifo: VecDeque::new(),
            commands: Vec::new(),
            mc_state_script: VecDeque::new(),
            reads: Vec::new(),
            frames: Vec::new(),
            selected: false,
            current: Vec::new(),
            cs_violations: 0,
            fail_after: None,
        }
    }

    fn clock(&mut self, mosi: u8) -> Result<u8, MockSpiError> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(MockSpiError);
            }
            *remaining -= 1;
        }
        if !self.selected {
            self.cs_violations += 1;
            return Ok(0xFF);
        }

        let position = self.current.len();
        self.current.push(mosi);
        if position < 2 {
            if position == 1 && self.current[0] == 0x80 {
                self.commands.push(mosi);
            }
            return Ok(0x00);
        }

        let header = self.current[0];
        let address = self.current[1];
        let offset = (position - 2) as u8;
        match (header, address) {
            (0x00, 0xFF) => {
                self.tx_fifo.push(mosi);
                Ok(0x00)
            }
            (0x00, _) => {
                self.regs[address.wrapping_add(offset) as usize] = mosi;
                Ok(0x00)
            }
            (0x01, 0xFF) => Ok(self.rx_fifo.pop_front().unwrap_or(0x00)),
            (0x01, _) => {
                let address = address.wrapping_add(offset);
                self.reads.push(address);
                if address == 0x8E {
                    if let Some(value) = self.mc_state_script.pop_front() {
                        return Ok(value);
                    }
                }
                Ok(self.regs[address as usize])
            }
            _ => Ok(0x00),
        }
    }
}

/// Simulated S2LP, shared between the SPI bus and the chip-select pin
#[derive(Clone)]
pub struct MockChip {
    state: Rc<RefCell<ChipState>>,
}

impl MockChip {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ChipState::new())),
        }
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi {
            state: self.state.clone(),
        }
    }

    pub fn cs(&self) -> MockCs {
        MockCs {
            state: self.state.clone(),
        }
    }

    pub fn state(&self) -> std::cell::RefMut<'_, ChipState> {
        self.state.borrow_mut()
    }

    pub fn reg(&self, address: u8) -> u8 {
        self.state.borrow().regs[address as usize]
    }

    pub fn set_reg(&self, address: u8, value: u8) {
        self.state.borrow_mut().regs[address as usize] = value;
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.state.borrow().frames.clone()
    }

    pub fn is_selected(&self) -> bool {
        self.state.borrow().selected
    }

    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.frames.clear();
        state.reads.clear();
        state.commands.clear();
    }
}

pub struct MockSpi {
    state: Rc<RefCell<ChipState>>,
}

impl MockSpi {
    fn exchange(&mut self, words: &mut [u8]) -> Result<(), MockSpiError> {
        let mut state = self.state.borrow_mut();
        for word in words.iter_mut() {
            *word = state.clock(*word)?;
        }
        Ok(())
    }
}

impl ErrorType for MockSpi {
    type Error = MockSpiError;
}

impl embedded_hal::spi::SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0x00);
        self.exchange(words)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut copy = words.to_vec();
        self.exchange(&mut copy)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut copy = write.to_vec();
        copy.resize(read.len().max(write.len()), 0x00);
        self.exchange(&mut copy)?;
        let n = read.len();
        read.copy_from_slice(&copy[..n]);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.exchange(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_hal_async::spi::SpiBus<u8> for MockSpi {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::read(self, words)
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::write(self, words)
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::transfer(self, read, write)
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::transfer_in_place(self, words)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct MockCs {
    state: Rc<RefCell<ChipState>>,
}

impl embedded_hal::digital::ErrorType for MockCs {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.selected = true;
        state.current.clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.selected {
            let frame = std::mem::take(&mut state.current);
            state.frames.push(frame);
        }
        state.selected = false;
        Ok(())
    }
}

/// Board pin operations, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Configure(Pin, PinMode),
    Level(Pin, bool),
}

#[derive(Clone, Default)]
pub struct MockPins {
    pub log: Rc<RefCell<Vec<PinEvent>>>,
}

impl MockPins {
    pub fn events(&self) -> Vec<PinEvent> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl PinControl for MockPins {
    type Error = Infallible;

    fn configure(&mut self, pin: &Pin, mode: PinMode) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(PinEvent::Configure(*pin, mode));
        Ok(())
    }

    fn set_level(&mut self, pin: &Pin, high: bool) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(PinEvent::Level(*pin, high));
        Ok(())
    }
}

/// Records requested delays
#[derive(Clone, Default)]
pub struct MockDelay {
    pub total_ns: Rc<Cell<u64>>,
    pub millis: Rc<RefCell<Vec<u32>>>,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.millis.borrow_mut().push(ms);
        self.delay_ns(ms.saturating_mul(1_000_000));
    }
}

/// DMA channel register block
#[derive(Default)]
pub struct DmaState {
    pub clock: Cell<bool>,
    pub cr: Cell<u32>,
    pub cpar: Cell<u32>,
    pub cmar: Cell<u32>,
    pub cndtr: Cell<u16>,
    pub request: Cell<u8>,
    pub flags: Cell<u8>,
    pub controller_cleared: Cell<bool>,
    pub nvic_enabled: Cell<bool>,
}

#[derive(Clone, Default)]
pub struct MockDma {
    pub state: Rc<DmaState>,
}

impl MockDma {
    /// Hardware side: the channel finished its transfer.
    pub fn complete(&self) {
        self.state
            .flags
            .set(self.state.flags.get() | dma::flags::GLOBAL | dma::flags::XFER_CPL);
    }
}

impl DmaRegisters for MockDma {
    fn enable_clock(&self) {
        self.state.clock.set(true);
    }

    fn disable_clock(&self) {
        self.state.clock.set(false);
    }

    fn cr(&self) -> Cr {
        Cr::new(self.state.cr.get())
    }

    fn set_cr(&self, cr: Cr) {
        self.state.cr.set(cr.raw());
    }

    fn set_peripheral_address(&self, address: u32) {
        self.state.cpar.set(address);
    }

    fn set_memory_address(&self, address: u32) {
        self.state.cmar.set(address);
    }

    fn set_transfer_count(&self, count: u16) {
        self.state.cndtr.set(count);
    }

    fn set_request(&self, request: u8) {
        self.state.request.set(request);
    }

    fn flags(&self) -> u8 {
        self.state.flags.get()
    }

    fn clear_flags(&self, flags: u8) {
        self.state.flags.set(self.state.flags.get() & !flags);
    }

    fn clear_controller_flags(&self) {
        self.state.flags.set(0);
        self.state.controller_cleared.set(true);
    }

    fn unmask_interrupt(&self) {
        self.state.nvic_enabled.set(true);
    }

    fn mask_interrupt(&self) {
        self.state.nvic_enabled.set(false);
    }
}

/// Stands in for `WFI`: each wake-up lets the hardware finish the transfer
/// and runs the DMA interrupt handler.
pub struct MockWait {
    pub dma: MockDma,
    pub done: &'static IrqFlag,
    pub chip: Option<MockChip>,
    pub wakeups: Rc<Cell<usize>>,
    pub selected_while_streaming: Rc<Cell<bool>>,
    /// Wake-ups before the transfer completes
    pub latency: usize,
}

impl MockWait {
    pub fn new(dma: MockDma, done: &'static IrqFlag) -> Self {
        Self {
            dma,
            done,
            chip: None,
            wakeups: Rc::new(Cell::new(0)),
            selected_while_streaming: Rc::new(Cell::new(true)),
            latency: 0,
        }
    }
}

impl Wait for MockWait {
    fn wait_for_interrupt(&mut self) {
        self.wakeups.set(self.wakeups.get() + 1);
        if let Some(chip) = &self.chip {
            if !chip.is_selected() {
                self.selected_while_streaming.set(false);
            }
        }
        assert!(
            self.wakeups.get() < 1000,
            "transfer never completed, cndtr = {}",
            self.dma.state.cndtr.get()
        );
        // A channel started with nothing to move never raises TC.
        if self.wakeups.get() > self.latency
            && self.dma.cr().enabled()
            && self.dma.state.cndtr.get() > 0
        {
            self.dma.complete();
        }
        if self.dma.state.nvic_enabled.get() {
            dma::on_interrupt(&self.dma, self.done);
        }
    }
}

/// EXTI and SYSCFG register blocks
#[derive(Default)]
pub struct ExtiState {
    pub clock: Cell<bool>,
    pub imr: Cell<u32>,
    pub rtsr: Cell<u32>,
    pub ftsr: Cell<u32>,
    pub pr: Cell<u32>,
    pub exticr: [Cell<u32>; 4],
}

#[derive(Clone, Default)]
pub struct MockExti {
    pub state: Rc<ExtiState>,
}

impl MockExti {
    /// Hardware side: an edge was detected on `line`.
    pub fn trigger(&self, line: u8) {
        self.state.pr.set(self.state.pr.get() | (1 << line));
    }
}

impl ExtiRegisters for MockExti {
    fn enable_clock(&self) {
        self.state.clock.set(true);
    }

    fn imr(&self) -> u32 {
        self.state.imr.get()
    }

    fn set_imr(&self, value: u32) {
        self.state.imr.set(value);
    }

    fn rtsr(&self) -> u32 {
        self.state.rtsr.get()
    }

    fn set_rtsr(&self, value: u32) {
        self.state.rtsr.set(value);
    }

    fn ftsr(&self) -> u32 {
        self.state.ftsr.get()
    }

    fn set_ftsr(&self, value: u32) {
        self.state.ftsr.set(value);
    }

    fn pending(&self) -> u32 {
        self.state.pr.get()
    }

    fn clear_pending(&self, mask: u32) {
        self.state.pr.set(self.state.pr.get() & !mask);
    }

    fn exticr(&self, index: usize) -> u32 {
        self.state.exticr[index].get()
    }

    fn set_exticr(&self, index: usize, value: u32) {
        self.state.exticr[index].set(value);
    }
}
