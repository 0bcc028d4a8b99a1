//! Board pin description and control seam
//!
//! The radio driver needs more from its pins than `embedded-hal` offers:
//! switching between analog, input with pull and push-pull output at
//! runtime. [`PinControl`] is the small trait the board GPIO driver
//! implements for that.

/// GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    H = 7,
}

impl Port {
    /// Port selection code used by SYSCFG_EXTICR.
    pub const fn exti_code(self) -> u8 {
        self as u8
    }
}

/// A board pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    pub port: Port,
    /// Pin number in the port, 0 to 15
    pub index: u8,
    /// Alternate function number, when the pin is used by a peripheral
    pub alternate: u8,
}

impl Pin {
    pub const fn new(port: Port, index: u8, alternate: u8) -> Self {
        Self {
            port,
            index,
            alternate,
        }
    }
}

/// Pull resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Pin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Analog, input buffer off (lowest leakage)
    Analog,
    /// Push-pull output, no pull
    Output,
    /// Digital input
    Input(Pull),
}

/// Runtime pin configuration and level control.
pub trait PinControl {
    type Error;

    /// Reconfigures `pin`.
    fn configure(&mut self, pin: &Pin, mode: PinMode) -> Result<(), Self::Error>;

    /// Drives an output pin high (`true`) or low.
    fn set_level(&mut self, pin: &Pin, high: bool) -> Result<(), Self::Error>;
}

impl<T: PinControl + ?Sized> PinControl for &mut T {
    type Error = T::Error;

    fn configure(&mut self, pin: &Pin, mode: PinMode) -> Result<(), Self::Error> {
        T::configure(self, pin, mode)
    }

    fn set_level(&mut self, pin: &Pin, high: bool) -> Result<(), Self::Error> {
        T::set_level(self, pin, high)
    }
}
