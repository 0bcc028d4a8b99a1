//! GPIO and interrupt registers
//!
//! The S2LP has four configurable GPIOs and 32 interrupt sources. Each
//! interrupt is enabled through one bit of the IRQ_MASK bank and any GPIO can
//! be configured to output the combined interrupt line.

use bitflags::bitflags;

use crate::field::Field;

/// Address of GPIO0_CONF. GPIOx_CONF lives at `GPIO0_CONF + x`.
pub const GPIO0_CONF: u8 = 0x00;

/// Address of IRQ_MASK0. IRQ_MASK bytes live at descending addresses from
/// here: IRQ_MASK0 (0x53) holds interrupts 0-7, IRQ_MASK3 (0x50) holds 24-31.
pub const IRQ_MASK0: u8 = 0x53;

/// GPIOx_CONF register value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConf {
    val: u8,
}

impl GpioConf {
    /// Function selection
    pub const GPIO_SELECT: Field = Field::new(3, 5);
    /// Pin mode
    pub const GPIO_MODE: Field = Field::new(0, 2);
    /// Reserved bit, must be preserved
    pub const RESERVED: u8 = 0x04;

    /// Wraps a raw register value.
    pub const fn new(val: u8) -> Self {
        Self { val }
    }

    /// Raw register value.
    pub const fn raw(self) -> u8 {
        self.val
    }

    /// Replaces mode and function, keeping the reserved bit.
    #[must_use = "configure returns a modified GpioConf"]
    pub const fn configure(self, mode: GpioMode, function: GpioFunction) -> Self {
        let val = self.val & Self::RESERVED;
        let val = Self::GPIO_MODE.set(val, mode as u8);
        Self::new(Self::GPIO_SELECT.set(val, function.0))
    }
}

/// S2LP GPIO index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioPin {
    /// GPIO0
    Gpio0 = 0,
    /// GPIO1
    Gpio1 = 1,
    /// GPIO2
    Gpio2 = 2,
    /// GPIO3
    Gpio3 = 3,
}

impl GpioPin {
    /// Address of this pin's configuration register.
    pub const fn conf_address(self) -> u8 {
        GPIO0_CONF + self as u8
    }
}

/// S2LP GPIO mode (GPIOx_CONF bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Digital input
    Input = 0b01,
    /// Digital output, low power
    OutputLowPower = 0b10,
    /// Digital output, high power
    OutputHighPower = 0b11,
}

/// S2LP GPIO function (GPIOx_CONF bits 7:3)
///
/// Input and output functions share the same encoding space, the pin mode
/// decides which table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioFunction(pub u8);

impl GpioFunction {
    /// Output: interrupt request (active low)
    pub const IRQ: Self = Self(0);
    /// Output: POR inverted
    pub const POR_INVERTED: Self = Self(1);
    /// Output: wake-up timer expiration
    pub const WAKE_UP_TIMER: Self = Self(2);
    /// Output: low battery detection
    pub const LOW_BATTERY: Self = Self(3);
    /// Output: TX data internal clock
    pub const TX_DATA_CLOCK: Self = Self(4);
    /// Output: TX state
    pub const TX_STATE: Self = Self(5);
    /// Output: TX/RX FIFO almost empty flag
    pub const FIFO_ALMOST_EMPTY: Self = Self(6);
    /// Output: TX/RX FIFO almost full flag
    pub const FIFO_ALMOST_FULL: Self = Self(7);
    /// Output: RX data
    pub const RX_DATA: Self = Self(8);
    /// Output: RX clock
    pub const RX_CLOCK: Self = Self(9);
    /// Output: RX state
    pub const RX_STATE: Self = Self(10);
    /// Output: device not in sleep or standby
    pub const NOT_SLEEP_OR_STANDBY: Self = Self(11);
    /// Output: device in standby
    pub const STANDBY: Self = Self(12);
    /// Output: antenna switch
    pub const ANTENNA_SWITCH: Self = Self(13);
    /// Output: valid preamble detected
    pub const VALID_PREAMBLE: Self = Self(14);
    /// Output: sync word detected
    pub const SYNC_DETECTED: Self = Self(15);
    /// Output: RSSI above threshold
    pub const RSSI_ABOVE_THRESHOLD: Self = Self(16);
    /// Output: TX or RX mode indicator
    pub const TX_RX_MODE: Self = Self(18);
    /// Output: VDD
    pub const VDD: Self = Self(19);
    /// Output: GND
    pub const GND: Self = Self(20);
    /// Output: external SMPS enable
    pub const SMPS_EXT: Self = Self(21);
    /// Output: device in sleep
    pub const SLEEP: Self = Self(22);
    /// Output: device in ready
    pub const READY: Self = Self(23);
    /// Output: device in lock
    pub const LOCK: Self = Self(24);
    /// Input: TX command
    pub const IN_TX_COMMAND: Self = Self(0);
    /// Input: RX command
    pub const IN_RX_COMMAND: Self = Self(1);
    /// Input: TX data for direct modulation
    pub const IN_TX_DATA: Self = Self(2);
    /// Input: wake-up from external input
    pub const IN_WAKE_UP: Self = Self(3);
    /// Input: external clock for LDC timers
    pub const IN_EXT_CLOCK: Self = Self(4);
}

/// Interrupt source indices, as used by the IRQ_MASK and IRQ_STATUS banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqIndex {
    /// RX data ready
    RxDataReady = 0,
    /// RX data discarded upon filtering
    RxDataDiscarded = 1,
    /// TX data sent
    TxDataSent = 2,
    /// Maximum retransmissions reached
    MaxReTxReached = 3,
    /// CRC error
    CrcError = 4,
    /// TX FIFO underflow/overflow
    TxFifoError = 5,
    /// RX FIFO underflow/overflow
    RxFifoError = 6,
    /// TX FIFO almost full
    TxFifoAlmostFull = 7,
    /// TX FIFO almost empty
    TxFifoAlmostEmpty = 8,
    /// RX FIFO almost full
    RxFifoAlmostFull = 9,
    /// RX FIFO almost empty
    RxFifoAlmostEmpty = 10,
    /// Max CCA back-off reached
    MaxBackoffCca = 11,
    /// Valid preamble detected
    ValidPreamble = 12,
    /// Sync word detected
    ValidSync = 13,
    /// RSSI above threshold
    RssiAboveThreshold = 14,
    /// Wake-up timeout in LDC mode
    WakeUpTimeoutLdc = 15,
    /// Ready state
    Ready = 16,
    /// Standby state switching in progress
    StandbyDelayed = 17,
    /// Low battery level
    LowBattery = 18,
    /// Power-on reset
    PowerOnReset = 19,
    /// Brown-out event
    BrownOut = 20,
    /// PLL lock
    Lock = 21,
    /// End of VCO calibration
    VcoCalibrationEnd = 22,
    /// Power management count expired
    PmCountExpired = 23,
    /// Crystal count expired
    XoCountExpired = 24,
    /// TX start time
    TxStartTime = 25,
    /// RX start time
    RxStartTime = 26,
    /// RX timeout
    RxTimeout = 27,
    /// RX sniff timeout
    RxSniffTimeout = 28,
}

impl IrqIndex {
    /// Address of the IRQ_MASK byte holding this interrupt.
    pub const fn mask_address(self) -> u8 {
        IRQ_MASK0 - (self as u8 / 8)
    }

    /// Bit of this interrupt within its IRQ_MASK byte.
    pub const fn mask_bit(self) -> u8 {
        1 << (self as u8 % 8)
    }
}

byte_register! {
    /// IRQ_STATUS3 register (address: 0xFA), interrupts 24-31. Cleared on read.
    IrqStatus3 @ 0xFAu8
}

byte_register! {
    /// IRQ_STATUS2 register (address: 0xFB), interrupts 16-23. Cleared on read.
    IrqStatus2 @ 0xFBu8
}

byte_register! {
    /// IRQ_STATUS1 register (address: 0xFC), interrupts 8-15. Cleared on read.
    IrqStatus1 @ 0xFCu8
}

byte_register! {
    /// IRQ_STATUS0 register (address: 0xFD), interrupts 0-7. Cleared on read.
    IrqStatus0 @ 0xFDu8
}

bitflags! {
    /// Latched interrupt flags, assembled from IRQ_STATUS3..0
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags: u32 {
        /// RX data ready
        const RX_DATA_READY = 1 << 0;
        /// RX data discarded upon filtering
        const RX_DATA_DISCARDED = 1 << 1;
        /// TX data sent
        const TX_DATA_SENT = 1 << 2;
        /// Maximum retransmissions reached
        const MAX_RE_TX_REACHED = 1 << 3;
        /// CRC error
        const CRC_ERROR = 1 << 4;
        /// TX FIFO underflow/overflow
        const TX_FIFO_ERROR = 1 << 5;
        /// RX FIFO underflow/overflow
        const RX_FIFO_ERROR = 1 << 6;
        /// TX FIFO almost full
        const TX_FIFO_ALMOST_FULL = 1 << 7;
        /// TX FIFO almost empty
        const TX_FIFO_ALMOST_EMPTY = 1 << 8;
        /// RX FIFO almost full
        const RX_FIFO_ALMOST_FULL = 1 << 9;
        /// RX FIFO almost empty
        const RX_FIFO_ALMOST_EMPTY = 1 << 10;
        /// Max CCA back-off reached
        const MAX_BACKOFF_CCA = 1 << 11;
        /// Valid preamble detected
        const VALID_PREAMBLE = 1 << 12;
        /// Sync word detected
        const VALID_SYNC = 1 << 13;
        /// RSSI above threshold
        const RSSI_ABOVE_THRESHOLD = 1 << 14;
        /// Wake-up timeout in LDC mode
        const WAKE_UP_TIMEOUT_LDC = 1 << 15;
        /// Ready state
        const READY = 1 << 16;
        /// Standby state switching in progress
        const STANDBY_DELAYED = 1 << 17;
        /// Low battery level
        const LOW_BATTERY = 1 << 18;
        /// Power-on reset
        const POWER_ON_RESET = 1 << 19;
        /// Brown-out event
        const BROWN_OUT = 1 << 20;
        /// PLL lock
        const LOCK = 1 << 21;
        /// End of VCO calibration
        const VCO_CALIBRATION_END = 1 << 22;
        /// Power management count expired
        const PM_COUNT_EXPIRED = 1 << 23;
        /// Crystal count expired
        const XO_COUNT_EXPIRED = 1 << 24;
        /// TX start time
        const TX_START_TIME = 1 << 25;
        /// RX start time
        const RX_START_TIME = 1 << 26;
        /// RX timeout
        const RX_TIMEOUT = 1 << 27;
        /// RX sniff timeout
        const RX_SNIFF_TIMEOUT = 1 << 28;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IrqFlags {{ {=u32:#010x} }}", self.bits())
    }
}

impl From<IrqIndex> for IrqFlags {
    fn from(index: IrqIndex) -> Self {
        IrqFlags::from_bits_retain(1 << index as u32)
    }
}

impl IrqFlags {
    /// Assembles the flags from the four status bytes, most significant first.
    pub fn from_status(status: [u8; 4]) -> Self {
        IrqFlags::from_bits_retain(u32::from_be_bytes(status))
    }
}
