//! External interrupt lines
//!
//! Binds GPIO pins and internal event lines to the EXTI controller and
//! provides the body of the edge interrupt handler. The S2LP GPIO0 pin is
//! rebound at runtime when the radio switches between uplink (rising edge)
//! and downlink (falling edge) signalling.

use crate::pac;
use crate::pins::Pin;

/// Edge selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    Rising,
    Falling,
    Any,
}

impl Trigger {
    const fn rising(self) -> bool {
        matches!(self, Trigger::Rising | Trigger::Any)
    }

    const fn falling(self) -> bool {
        matches!(self, Trigger::Falling | Trigger::Any)
    }
}

/// An EXTI line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line(pub u8);

impl Line {
    pub const RTC_ALARM: Line = Line(17);
    pub const RTC_WAKEUP: Line = Line(20);
    pub const LPUART1: Line = Line(28);
    pub const LPTIM1: Line = Line(29);

    /// Highest line with edge selection and a pending bit. Lines above are
    /// direct lines, level-driven by their peripheral.
    pub const LAST_CONFIGURABLE: u8 = 22;

    /// Line of a GPIO pin.
    pub const fn gpio(pin: &Pin) -> Line {
        Line(pin.index)
    }

    /// Single-bit mask of the line, empty past line 31.
    pub const fn mask(self) -> u32 {
        match 1u32.checked_shl(self.0 as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }

    /// Whether RTSR/FTSR/PR exist for this line.
    pub const fn configurable(self) -> bool {
        self.0 <= Self::LAST_CONFIGURABLE
    }
}

/// Every pending bit implemented by the STM32L0 EXTI.
pub const ALL_PENDING: u32 = 0x007B_FFFF;

/// Register-level access to EXTI and the SYSCFG port selection.
pub trait ExtiRegisters {
    /// Enables the SYSCFG clock (port selection registers).
    fn enable_clock(&self);
    fn imr(&self) -> u32;
    fn set_imr(&self, value: u32);
    fn rtsr(&self) -> u32;
    fn set_rtsr(&self, value: u32);
    fn ftsr(&self) -> u32;
    fn set_ftsr(&self, value: u32);
    /// Pending register.
    fn pending(&self) -> u32;
    /// Clears the pending bits set in `mask` (write one to clear).
    fn clear_pending(&self, mask: u32);
    /// SYSCFG_EXTICRx, `index` 0 to 3.
    fn exticr(&self, index: usize) -> u32;
    fn set_exticr(&self, index: usize, value: u32);
}

/// Edge interrupt handler body for one line.
///
/// If the line is pending, `forward` is called only when the line is
/// unmasked. The pending bit is always cleared.
pub fn on_edge<R: ExtiRegisters, F: FnOnce()>(regs: &R, line: Line, forward: F) {
    let mask = line.mask();
    if regs.pending() & mask != 0 {
        if regs.imr() & mask != 0 {
            forward();
        }
        regs.clear_pending(mask);
    }
}

/// EXTI manager.
pub struct Exti<R> {
    regs: R,
}

impl<R: ExtiRegisters> Exti<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Masks every line and clears all pending flags.
    pub fn init(&mut self) {
        self.regs.enable_clock();
        self.regs.set_imr(0);
        self.regs.clear_pending(ALL_PENDING);
    }

    fn select_edges(&mut self, mask: u32, trigger: Trigger) {
        let rtsr = self.regs.rtsr();
        let ftsr = self.regs.ftsr();
        self.regs.set_rtsr(if trigger.rising() {
            rtsr | mask
        } else {
            rtsr & !mask
        });
        self.regs.set_ftsr(if trigger.falling() {
            ftsr | mask
        } else {
            ftsr & !mask
        });
    }

    /// Routes `pin` to its EXTI line and enables it on `trigger`.
    ///
    /// Only the bits of this line are touched. The pending flag is cleared
    /// last so that an edge caused by the reconfiguration is discarded.
    pub fn configure_gpio(&mut self, pin: &Pin, trigger: Trigger) {
        let index = usize::from(pin.index / 4);
        let shift = 4 * u32::from(pin.index % 4);
        let exticr = self.regs.exticr(index) & !(0b1111 << shift);
        self.regs
            .set_exticr(index, exticr | (u32::from(pin.port.exti_code()) << shift));

        let line = Line::gpio(pin);
        self.unmask(line);
        self.select_edges(line.mask(), trigger);
        self.regs.clear_pending(line.mask());

        #[cfg(feature = "defmt")]
        defmt::trace!("exti: gpio line {} on {}", pin.index, trigger);
    }

    /// Enables an internal line.
    ///
    /// Edge selection and pending clear only apply to lines up to
    /// [`Line::LAST_CONFIGURABLE`]; above, the trigger is ignored.
    pub fn configure_line(&mut self, line: Line, trigger: Trigger) {
        self.unmask(line);
        if line.configurable() {
            self.select_edges(line.mask(), trigger);
            self.regs.clear_pending(line.mask());
        }
    }

    pub fn mask(&mut self, line: Line) {
        self.regs.set_imr(self.regs.imr() & !line.mask());
    }

    pub fn unmask(&mut self, line: Line) {
        self.regs.set_imr(self.regs.imr() | line.mask());
    }

    pub fn clear_all_flags(&mut self) {
        self.regs.clear_pending(ALL_PENDING);
    }
}

/// EXTI and SYSCFG register blocks of the STM32L0.
pub struct Stm32l0Exti {
    exti: pac::EXTI,
    syscfg: pac::SYSCFG,
}

impl Stm32l0Exti {
    /// Takes ownership of the EXTI and SYSCFG peripherals.
    pub fn new(exti: pac::EXTI, syscfg: pac::SYSCFG) -> Stm32l0Exti {
        Stm32l0Exti { exti, syscfg }
    }

    /// Steal the EXTI registers.
    ///
    /// # Safety
    ///
    /// Singleton checks are bypassed. Interrupt handlers holding a second
    /// handle must restrict themselves to [`on_edge`].
    pub unsafe fn steal() -> Stm32l0Exti {
        let dp = pac::Peripherals::steal();
        Stm32l0Exti::new(dp.EXTI, dp.SYSCFG)
    }

    /// Gives the peripherals back.
    pub fn free(self) -> (pac::EXTI, pac::SYSCFG) {
        (self.exti, self.syscfg)
    }
}

impl core::fmt::Debug for Stm32l0Exti {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Stm32l0Exti")
    }
}

impl ExtiRegisters for Stm32l0Exti {
    fn enable_clock(&self) {
        unsafe { (*pac::RCC::PTR).apb2enr.modify(|_, w| w.syscfgen().set_bit()) }
    }

    fn imr(&self) -> u32 {
        self.exti.imr.read().bits()
    }

    fn set_imr(&self, value: u32) {
        self.exti.imr.write(|w| unsafe { w.bits(value) })
    }

    fn rtsr(&self) -> u32 {
        self.exti.rtsr.read().bits()
    }

    fn set_rtsr(&self, value: u32) {
        self.exti.rtsr.write(|w| unsafe { w.bits(value) })
    }

    fn ftsr(&self) -> u32 {
        self.exti.ftsr.read().bits()
    }

    fn set_ftsr(&self, value: u32) {
        self.exti.ftsr.write(|w| unsafe { w.bits(value) })
    }

    fn pending(&self) -> u32 {
        self.exti.pr.read().bits()
    }

    fn clear_pending(&self, mask: u32) {
        self.exti.pr.write(|w| unsafe { w.bits(mask) })
    }

    fn exticr(&self, index: usize) -> u32 {
        match index & 0b11 {
            0 => self.syscfg.exticr1.read().bits(),
            1 => self.syscfg.exticr2.read().bits(),
            2 => self.syscfg.exticr3.read().bits(),
            _ => self.syscfg.exticr4.read().bits(),
        }
    }

    fn set_exticr(&self, index: usize, value: u32) {
        match index & 0b11 {
            0 => self.syscfg.exticr1.write(|w| unsafe { w.bits(value) }),
            1 => self.syscfg.exticr2.write(|w| unsafe { w.bits(value) }),
            2 => self.syscfg.exticr3.write(|w| unsafe { w.bits(value) }),
            _ => self.syscfg.exticr4.write(|w| unsafe { w.bits(value) }),
        }
    }
}
