//! Interrupt-to-main event flag

use core::sync::atomic::{AtomicBool, Ordering};

/// A one-bit event shared between an interrupt handler and the main loop.
///
/// The handler raises it, the main loop observes and clears it. Only plain
/// loads and stores are used: Cortex-M0+ has no atomic read-modify-write,
/// and with a single writer on each side none is needed.
///
/// Declare it as a `static` and hand references to both sides.
#[derive(Debug)]
pub struct IrqFlag(AtomicBool);

impl IrqFlag {
    /// A lowered flag.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raises the flag. Called from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for IrqFlag {
    fn default() -> Self {
        Self::new()
    }
}
