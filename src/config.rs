//! Driver configuration
//!
//! Board constants of the Sigfox node and the runtime knobs of the driver.

/// Crystal (or TCXO) frequency.
pub const XO_FREQUENCY_HZ: u32 = 49_152_000;
/// Above this frequency the chip runs in high-range mode (digital divider
/// enabled, no PFD split, default IF).
pub const XO_HIGH_RANGE_THRESHOLD_HZ: u32 = 48_000_000;

/// TX and RX FIFO depth.
pub const FIFO_SIZE: usize = 128;
/// Longest sync word the packet handler can match.
pub const SYNC_WORD_MAX_BITS: u8 = 32;
/// Offset between RSSI_LEVEL and dBm.
pub const RSSI_OFFSET_DB: i16 = 146;

/// Lowest programmable output power.
pub const RF_OUTPUT_POWER_MIN_DBM: i8 = -49;
/// Highest programmable output power.
pub const RF_OUTPUT_POWER_MAX_DBM: i8 = 14;

/// Time for the chip to come out of shutdown.
pub const SHUTDOWN_EXIT_DELAY_MS: u32 = 100;
/// Time for the TCXO to settle after power-up.
pub const TCXO_SETTLE_DELAY_MS: u32 = 100;

/// Bound on MC_STATE0 polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    /// Number of MC_STATE0 reads before giving up
    pub max_attempts: u32,
}

impl Default for PollBudget {
    fn default() -> Self {
        // Several hundred milliseconds at 8 MHz SPI, well beyond any
        // documented transition time.
        Self {
            max_attempts: 100_000,
        }
    }
}

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Budget of every state wait
    pub poll: PollBudget,
}

impl Config {
    pub fn poll_budget(mut self, max_attempts: u32) -> Self {
        self.poll = PollBudget { max_attempts };
        self
    }
}
