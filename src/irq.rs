//! Interrupt lines used by the radio path
//!
//! Priorities of the STM32L0 interrupts the radio path services.
//! The core implements two priority bits, stored in the top of the byte.

use crate::pac::{Interrupt, NVIC};

/// Number of priority bits implemented by Cortex-M0+.
const PRIO_BITS: u8 = 2;

/// Logical priorities (0 = most urgent, 3 = least).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Priorities {
    /// DMA1 channel 2-3
    pub dma: u8,
    /// EXTI 4-15
    pub edge: u8,
    /// EXTI 0-1
    pub edge_low: u8,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            dma: 1,
            edge: 0,
            edge_low: 3,
        }
    }
}

/// Hardware encoding of a logical priority.
pub const fn encode(priority: u8) -> u8 {
    let max = (1 << PRIO_BITS) - 1;
    let clamped = if priority > max { max } else { priority };
    clamped << (8 - PRIO_BITS)
}

impl Priorities {
    /// Writes the priorities to the NVIC.
    ///
    /// # Safety
    ///
    /// Changing priorities can break priority-based critical sections.
    pub unsafe fn apply(&self, nvic: &mut NVIC) {
        nvic.set_priority(Interrupt::DMA1_CHANNEL2_3, encode(self.dma));
        nvic.set_priority(Interrupt::EXTI4_15, encode(self.edge));
        nvic.set_priority(Interrupt::EXTI0_1, encode(self.edge_low));
    }
}
