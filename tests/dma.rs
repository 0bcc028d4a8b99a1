mod common;

use common::{MockChip, MockDelay, MockDma, MockPins, MockWait};
use s2lp::dma::{self, flags, DmaChannel, DmaRegisters, DmaStreamer, SPI1_DR, SPI_TX_CR};
use s2lp::{Config, Device, IrqFlag, S2lp};

#[test]
fn init_configures_spi_tx() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    regs.state.flags.set(flags::ALL);
    regs.state.cr.set(0xFFFF);

    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    assert!(regs.state.clock.get());
    assert_eq!(regs.state.cr.get(), SPI_TX_CR.raw());
    assert_eq!(regs.state.cpar.get(), SPI1_DR);
    assert_eq!(regs.state.request.get(), dma::SPI1_TX_REQUEST);
    assert_eq!(regs.state.flags.get(), 0);
    assert!(!channel.get_status());
}

#[test]
fn transfer_lifecycle() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    channel.set_source(0x2000_0100, 42);
    assert_eq!(regs.state.cmar.get(), 0x2000_0100);
    assert_eq!(regs.state.cndtr.get(), 42);
    assert!(!regs.cr().enabled());

    channel.start();
    assert!(regs.cr().enabled());
    assert!(regs.state.nvic_enabled.get());
    assert!(!channel.get_status());

    // Nothing pending yet: the handler must not report completion.
    dma::on_interrupt(&regs, &DONE);
    assert!(!channel.get_status());

    regs.complete();
    dma::on_interrupt(&regs, &DONE);
    assert!(channel.get_status());
    assert_eq!(regs.flags() & flags::XFER_CPL, 0);

    channel.stop();
    assert!(!regs.cr().enabled());
    assert!(!regs.state.nvic_enabled.get());
    assert!(!channel.get_status());
}

#[test]
fn completion_needs_interrupt_enable() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    regs.set_cr(SPI_TX_CR.set_xfer_cpl_irq_en(false).set_enable(true));

    regs.complete();
    dma::on_interrupt(&regs, &DONE);

    assert!(!DONE.is_raised());
    assert_eq!(regs.flags() & flags::XFER_CPL, 0);
}

#[test]
fn start_discards_stale_completion() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    DONE.raise();
    regs.complete();
    channel.set_source(0x2000_0000, 1);
    channel.start();

    assert!(!channel.get_status());
    assert_eq!(regs.flags(), 0);
}

#[test]
fn disable_shuts_controller_down() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();
    channel.start();

    channel.disable();

    assert!(!regs.state.clock.get());
    assert!(!regs.state.nvic_enabled.get());
    assert!(regs.state.controller_cleared.get());
}

#[test]
fn streamer_sleeps_until_complete() {
    static DONE: IrqFlag = IrqFlag::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    let mut wait = MockWait::new(regs.clone(), &DONE);
    wait.latency = 3;
    let wakeups = wait.wakeups.clone();

    let mut streamer = DmaStreamer::new(channel, wait);
    let payload = [0xA5u8; 64];
    s2lp::dma::TxDma::stream(&mut streamer, &payload);

    assert_eq!(wakeups.get(), 4);
    assert_eq!(regs.state.cndtr.get(), 64);
    assert_eq!(regs.state.cmar.get(), payload.as_ptr() as u32);
    assert!(!regs.cr().enabled());
    assert!(!DONE.is_raised());
}

#[test]
fn radio_streams_fifo_under_chip_select() {
    static DONE: IrqFlag = IrqFlag::new();
    let chip = MockChip::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    let mut wait = MockWait::new(regs.clone(), &DONE);
    wait.chip = Some(chip.clone());
    let selected = wait.selected_while_streaming.clone();

    let mut radio = S2lp::with_dma(
        Device::new(chip.spi(), chip.cs()),
        MockPins::default(),
        MockDelay::default(),
        DmaStreamer::new(channel, wait),
        Config::default(),
    );

    let payload = [0x3Cu8; 200];
    assert_eq!(radio.write_fifo(&payload).unwrap(), 128);

    assert!(selected.get());
    assert_eq!(chip.frames(), vec![vec![0x00, 0xFF]]);
    assert_eq!(regs.state.cndtr.get(), 128);
    assert!(!chip.is_selected());
    assert_eq!(chip.state().cs_violations, 0);
}

#[test]
fn empty_write_skips_the_channel() {
    static DONE: IrqFlag = IrqFlag::new();
    let chip = MockChip::new();
    let regs = MockDma::default();
    let mut channel = DmaChannel::new(regs.clone(), &DONE);
    channel.init();

    let wait = MockWait::new(regs.clone(), &DONE);
    let wakeups = wait.wakeups.clone();

    let mut radio = S2lp::with_dma(
        Device::new(chip.spi(), chip.cs()),
        MockPins::default(),
        MockDelay::default(),
        DmaStreamer::new(channel, wait),
        Config::default(),
    );

    assert_eq!(radio.write_fifo(&[]).unwrap(), 0);

    assert_eq!(wakeups.get(), 0);
    assert!(!regs.cr().enabled());
    assert!(!regs.state.nvic_enabled.get());
    assert_eq!(chip.frames(), vec![vec![0x00, 0xFF]]);
    assert!(chip.state().tx_fifo.is_empty());
    assert!(!chip.is_selected());
}
