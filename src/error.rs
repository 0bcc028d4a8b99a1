//! Driver error type

/// Errors returned by the transport and the driver.
///
/// HAL errors are collapsed into opaque variants: the chip itself has no
/// error reporting at the SPI level, so the only thing a caller can act on
/// is which collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI communication failed
    Bus,
    /// Chip-select pin could not be driven
    ChipSelect,
    /// A board pin could not be configured or driven
    Pin,
    /// A register value could not be parsed
    Deserialization,
    /// A state poll ran out of attempts
    Timeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus => f.write_str("SPI bus error"),
            Error::ChipSelect => f.write_str("chip-select pin error"),
            Error::Pin => f.write_str("pin control error"),
            Error::Deserialization => f.write_str("invalid register value"),
            Error::Timeout => f.write_str("timed out waiting for the radio"),
        }
    }
}
