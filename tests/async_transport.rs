mod common;

use common::MockChip;
use embassy_futures::block_on;
use s2lp::{commands, Device, McState0, Mod0};

#[test]
fn async_register_access() {
    let chip = MockChip::new();
    chip.set_reg(McState0::ADDRESS, 0x5C << 1);
    let mut device = Device::new(chip.spi(), chip.cs());

    let state: McState0 = block_on(device.read_register_async()).unwrap();
    assert_eq!(state.state_code(), 0x5C);
    assert!(!state.xo_on());

    block_on(device.write_register_async(Mod0::new(0x8C))).unwrap();
    assert_eq!(chip.reg(0x12), 0x8C);

    assert_eq!(block_on(device.read_raw_async(0x12)).unwrap(), 0x8C);

    assert_eq!(
        chip.frames(),
        vec![
            vec![0x01, 0x8E, 0xFF],
            vec![0x00, 0x12, 0x8C],
            vec![0x01, 0x12, 0xFF],
        ]
    );
    assert!(!chip.is_selected());
}

#[test]
fn async_command_and_fifo() {
    let chip = MockChip::new();
    chip.state().rx_fifo.extend([0x11, 0x22]);
    let mut device = Device::new(chip.spi(), chip.cs());

    block_on(device.execute_command_async(commands::FlushTxFifo)).unwrap();
    block_on(device.write_fifo_async(&[0xAB, 0xCD])).unwrap();

    let mut buffer = [0u8; 2];
    block_on(device.read_fifo_async(&mut buffer)).unwrap();

    assert_eq!(buffer, [0x11, 0x22]);
    assert_eq!(chip.state().commands, vec![0x72]);
    assert_eq!(chip.state().tx_fifo, vec![0xAB, 0xCD]);
    assert_eq!(chip.state().cs_violations, 0);
}
