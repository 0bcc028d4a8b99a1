/// Transfer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Size {
    /// 8-bit transfer size
    Bits8 = 0b00,
    /// 16-bit transfer size
    Bits16 = 0b01,
    /// 32-bit transfer size
    Bits32 = 0b10,
}

impl Size {
    const fn from_bits(bits: u32) -> Option<Size> {
        match bits {
            0b00 => Some(Size::Bits8),
            0b01 => Some(Size::Bits16),
            0b10 => Some(Size::Bits32),
            _ => None,
        }
    }
}

/// Priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Priority {
    /// Low priority
    Low = 0b00,
    /// Medium priority
    Medium = 0b01,
    /// High priority
    High = 0b10,
    /// Very high priority
    VeryHigh = 0b11,
}

/// Transfer directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dir {
    /// Read from peripheral
    FromPeriph,
    /// Read from memory
    FromMem,
}

const EN: u32 = 0;
const TCIE: u32 = 1;
const HTIE: u32 = 2;
const TEIE: u32 = 3;
const DIR: u32 = 4;
const CIRC: u32 = 5;
const PINC: u32 = 6;
const MINC: u32 = 7;
const PSIZE: u32 = 8;
const MSIZE: u32 = 10;
const PL: u32 = 12;
const MEM2MEM: u32 = 14;

/// Channel configuration register (DMA_CCRx) of the STM32L0 DMA.
///
/// # Example
///
/// ```
/// use s2lp::dma::{Cr, Priority, Size};
///
/// const CR: Cr = Cr::RESET
///     .set_mem_inc(true)
///     .set_mem_size(Size::Bits8)
///     .set_periph_size(Size::Bits8)
///     .set_dir_from_mem()
///     .set_priority(Priority::VeryHigh)
///     .set_xfer_cpl_irq_en(true);
/// assert_eq!(CR.raw(), 0x3092);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cr {
    val: u32,
}

impl Cr {
    /// Reset value of the register.
    pub const RESET: Cr = Cr::new(0);

    /// Reset value + DMA disabled.
    pub const DISABLE: Cr = Cr::RESET.set_enable(false);

    /// Create a new Cr register from a raw value.
    pub const fn new(val: u32) -> Cr {
        Cr { val }
    }

    /// Get the raw value of the register.
    pub const fn raw(self) -> u32 {
        self.val
    }

    const fn set_bit(mut self, bit: u32, en: bool) -> Cr {
        if en {
            self.val |= 1 << bit;
        } else {
            self.val &= !(1 << bit);
        }
        self
    }

    const fn bit(&self, bit: u32) -> bool {
        (self.val >> bit) & 0b1 != 0
    }

    /// Set memory-to-memory mode.
    #[must_use = "set_mem2mem returns a modified Cr"]
    pub const fn set_mem2mem(self, en: bool) -> Cr {
        self.set_bit(MEM2MEM, en)
    }

    /// Returns `true` if memory-to-memory mode is enabled.
    pub const fn mem2mem(&self) -> bool {
        self.bit(MEM2MEM)
    }

    /// Set the channel priority level.
    ///
    /// # Example
    ///
    /// ```
    /// use s2lp::dma::{Cr, Priority};
    ///
    /// let cr = Cr::RESET.set_priority(Priority::High);
    /// assert_eq!(cr.priority(), Priority::High);
    /// ```
    #[must_use = "set_priority returns a modified Cr"]
    pub const fn set_priority(mut self, priority: Priority) -> Cr {
        self.val = (self.val & !(0b11 << PL)) | ((priority as u32) << PL);
        self
    }

    /// Get the channel priority level.
    pub const fn priority(&self) -> Priority {
        match (self.val >> PL) & 0b11 {
            0b00 => Priority::Low,
            0b01 => Priority::Medium,
            0b10 => Priority::High,
            _ => Priority::VeryHigh,
        }
    }

    /// Set the memory transfer size.
    #[must_use = "set_mem_size returns a modified Cr"]
    pub const fn set_mem_size(mut self, size: Size) -> Cr {
        self.val = (self.val & !(0b11 << MSIZE)) | ((size as u32) << MSIZE);
        self
    }

    /// Get the memory transfer size.
    ///
    /// Returns `None` for the reserved encoding.
    pub const fn mem_size(&self) -> Option<Size> {
        Size::from_bits((self.val >> MSIZE) & 0b11)
    }

    /// Set the peripheral transfer size.
    #[must_use = "set_periph_size returns a modified Cr"]
    pub const fn set_periph_size(mut self, size: Size) -> Cr {
        self.val = (self.val & !(0b11 << PSIZE)) | ((size as u32) << PSIZE);
        self
    }

    /// Get the peripheral transfer size.
    pub const fn periph_size(&self) -> Option<Size> {
        Size::from_bits((self.val >> PSIZE) & 0b11)
    }

    /// Set memory increment mode.
    #[must_use = "set_mem_inc returns a modified Cr"]
    pub const fn set_mem_inc(self, inc: bool) -> Cr {
        self.set_bit(MINC, inc)
    }

    /// Returns `true` if memory increment mode is enabled.
    pub const fn mem_inc(&self) -> bool {
        self.bit(MINC)
    }

    /// Set peripheral increment mode.
    #[must_use = "set_periph_inc returns a modified Cr"]
    pub const fn set_periph_inc(self, inc: bool) -> Cr {
        self.set_bit(PINC, inc)
    }

    /// Returns `true` if peripheral increment mode is enabled.
    pub const fn periph_inc(&self) -> bool {
        self.bit(PINC)
    }

    /// Set circular mode.
    #[must_use = "set_circ returns a modified Cr"]
    pub const fn set_circ(self, circ: bool) -> Cr {
        self.set_bit(CIRC, circ)
    }

    /// Returns `true` if circular mode is enabled.
    pub const fn circ(&self) -> bool {
        self.bit(CIRC)
    }

    /// Read from memory, write to the peripheral.
    #[must_use = "set_dir_from_mem returns a modified Cr"]
    pub const fn set_dir_from_mem(self) -> Cr {
        self.set_dir(Dir::FromMem)
    }

    /// Read from the peripheral, write to memory.
    #[must_use = "set_dir_from_periph returns a modified Cr"]
    pub const fn set_dir_from_periph(self) -> Cr {
        self.set_dir(Dir::FromPeriph)
    }

    /// Set the transfer direction.
    #[must_use = "set_dir returns a modified Cr"]
    pub const fn set_dir(self, dir: Dir) -> Cr {
        self.set_bit(DIR, matches!(dir, Dir::FromMem))
    }

    /// Get the transfer direction.
    pub const fn dir(&self) -> Dir {
        if self.bit(DIR) {
            Dir::FromMem
        } else {
            Dir::FromPeriph
        }
    }

    /// Set the transfer error interrupt enable.
    #[must_use = "set_xfer_err_irq_en returns a modified Cr"]
    pub const fn set_xfer_err_irq_en(self, en: bool) -> Cr {
        self.set_bit(TEIE, en)
    }

    /// Returns `true` if the transfer error interrupt is enabled.
    pub const fn xfer_err_irq_en(&self) -> bool {
        self.bit(TEIE)
    }

    /// Set the half transfer interrupt enable.
    #[must_use = "set_xfer_hlf_irq_en returns a modified Cr"]
    pub const fn set_xfer_hlf_irq_en(self, en: bool) -> Cr {
        self.set_bit(HTIE, en)
    }

    /// Returns `true` if the half transfer interrupt is enabled.
    pub const fn xfer_hlf_irq_en(&self) -> bool {
        self.bit(HTIE)
    }

    /// Set the transfer complete interrupt enable.
    #[must_use = "set_xfer_cpl_irq_en returns a modified Cr"]
    pub const fn set_xfer_cpl_irq_en(self, en: bool) -> Cr {
        self.set_bit(TCIE, en)
    }

    /// Returns `true` if the transfer complete interrupt is enabled.
    pub const fn xfer_cpl_irq_en(&self) -> bool {
        self.bit(TCIE)
    }

    /// Enable or disable the channel.
    ///
    /// Most other fields are read-only while the channel is enabled.
    #[must_use = "set_enable returns a modified Cr"]
    pub const fn set_enable(self, en: bool) -> Cr {
        self.set_bit(EN, en)
    }

    /// Returns `true` if the channel is enabled.
    pub const fn enabled(&self) -> bool {
        self.bit(EN)
    }
}

impl Default for Cr {
    fn default() -> Self {
        Cr::RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_do_not_overlap() {
        let cr = Cr::RESET
            .set_mem2mem(true)
            .set_priority(Priority::VeryHigh)
            .set_mem_size(Size::Bits32)
            .set_periph_size(Size::Bits16)
            .set_enable(true);
        assert!(cr.mem2mem());
        assert_eq!(cr.priority(), Priority::VeryHigh);
        assert_eq!(cr.mem_size(), Some(Size::Bits32));
        assert_eq!(cr.periph_size(), Some(Size::Bits16));
        assert!(!cr.mem_inc());
        assert!(!cr.xfer_cpl_irq_en());
        assert!(cr.enabled());

        let cr = cr.set_enable(false).set_priority(Priority::Low);
        assert!(!cr.enabled());
        assert_eq!(cr.priority(), Priority::Low);
        assert_eq!(cr.mem_size(), Some(Size::Bits32));
    }

    #[test]
    fn reserved_size_encoding() {
        assert_eq!(Cr::new(0b11 << MSIZE).mem_size(), None);
    }

    #[test]
    fn direction() {
        assert_eq!(Cr::RESET.dir(), Dir::FromPeriph);
        assert_eq!(Cr::RESET.set_dir_from_mem().dir(), Dir::FromMem);
        assert_eq!(Cr::RESET.set_dir_from_mem().raw(), 1 << 4);
    }
}
