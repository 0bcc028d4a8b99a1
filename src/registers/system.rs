//! System-related registers
//!
//! This module contains the main controller status and the device
//! identification registers. They are read-only and are mostly used to
//! follow the chip through its state machine after a command.

use crate::field::Field;
use crate::{State, StateError};

byte_register! {
    /// MC_STATE0 register (address: 0x8E)
    ///
    /// Current state of the main controller and crystal oscillator status.
    ///
    /// # Important Notes
    /// - `XO_ON` must be set before any command other than SRES is issued
    /// - State codes are listed in [`State`](crate::State)
    McState0 @ 0x8Eu8
}

impl McState0 {
    /// Main controller state
    pub const STATE: Field = Field::new(1, 7);
    /// Crystal oscillator running
    pub const XO_ON: Field = Field::new(0, 1);

    /// Raw 7-bit state code.
    pub const fn state_code(self) -> u8 {
        Self::STATE.get(self.val)
    }

    /// Decoded state. Transient codes come back as the error value.
    pub fn state(self) -> Result<State, StateError> {
        State::try_from(self.state_code())
    }

    /// Returns `true` once the crystal or TCXO clock is running.
    pub const fn xo_on(self) -> bool {
        Self::XO_ON.get(self.val) != 0
    }
}

byte_register! {
    /// DEVICE_INFO1 register (address: 0xF0), part number (0x03 for S2LP)
    DeviceInfo1 @ 0xF0u8
}

byte_register! {
    /// DEVICE_INFO0 register (address: 0xF1), silicon version
    DeviceInfo0 @ 0xF1u8
}

/// Part number reported by DEVICE_INFO1.
pub const S2LP_PART_NUMBER: u8 = 0x03;
