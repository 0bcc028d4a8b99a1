//! Packet handling related registers
//!
//! This module contains registers for configuring the packet handler:
//! - Preamble length and pattern
//! - Sync word and its length
//! - Packet length
//! - CRC mode and TX/RX data sources
//! - FIFO flag routing and FIFO thresholds

use crate::field::Field;

byte_register! {
    /// PCKTCTRL6 register (address: 0x2B)
    ///
    /// Sync word length in bits and the two MSBs of the preamble length.
    Pcktctrl6 @ 0x2Bu8
}

impl Pcktctrl6 {
    /// Sync word length in bits (0-32)
    pub const SYNC_LEN: Field = Field::new(2, 6);
    /// Preamble length bits [9:8], in 01/10 pairs
    pub const PREAMBLE_LEN_MSB: Field = Field::new(0, 2);

    /// Sets the sync word length in bits.
    #[must_use = "set_sync_len returns a modified Pcktctrl6"]
    pub const fn set_sync_len(self, bits: u8) -> Self {
        Self::new(Self::SYNC_LEN.set(self.val, bits))
    }

    /// Sets the two MSBs of the preamble length.
    #[must_use = "set_preamble_len_msb returns a modified Pcktctrl6"]
    pub const fn set_preamble_len_msb(self, msb: u8) -> Self {
        Self::new(Self::PREAMBLE_LEN_MSB.set(self.val, msb))
    }
}

byte_register! {
    /// PCKTCTRL5 register (address: 0x2C), preamble length bits [7:0]
    Pcktctrl5 @ 0x2Cu8
}

byte_register! {
    /// PCKTCTRL3 register (address: 0x2E)
    Pcktctrl3 @ 0x2Eu8
}

impl Pcktctrl3 {
    /// Packet format
    pub const PCKT_FRMT: Field = Field::new(6, 2);
    /// RX data source
    pub const RX_MODE: Field = Field::new(4, 2);
    /// 4-FSK symbol swap
    pub const FSK4_SYM_SWAP: Field = Field::new(3, 1);
    /// Byte swap
    pub const BYTE_SWAP: Field = Field::new(2, 1);
    /// Preamble pattern
    pub const PREAMBLE_SEL: Field = Field::new(0, 2);

    /// Selects the RX data source.
    #[must_use = "set_rx_source returns a modified Pcktctrl3"]
    pub const fn set_rx_source(self, source: RxSource) -> Self {
        Self::new(Self::RX_MODE.set(self.val, source as u8))
    }

    /// Selects the preamble pattern.
    #[must_use = "set_preamble_pattern returns a modified Pcktctrl3"]
    pub const fn set_preamble_pattern(self, pattern: PreamblePattern) -> Self {
        Self::new(Self::PREAMBLE_SEL.set(self.val, pattern as u8))
    }
}

byte_register! {
    /// PCKTCTRL1 register (address: 0x30)
    Pcktctrl1 @ 0x30u8
}

impl Pcktctrl1 {
    /// CRC polynomial selection, 0 = no CRC
    pub const CRC_MODE: Field = Field::new(5, 3);
    /// Whitening enable
    pub const WHIT_EN: Field = Field::new(4, 1);
    /// TX data source
    pub const TX_SOURCE: Field = Field::new(2, 2);
    /// Secondary sync word selection
    pub const SECOND_SYNC_SEL: Field = Field::new(1, 1);
    /// FEC enable
    pub const FEC_EN: Field = Field::new(0, 1);

    /// Disables CRC generation and checking.
    #[must_use = "disable_crc returns a modified Pcktctrl1"]
    pub const fn disable_crc(self) -> Self {
        Self::new(Self::CRC_MODE.set(self.val, 0))
    }

    /// Selects the TX data source.
    #[must_use = "set_tx_source returns a modified Pcktctrl1"]
    pub const fn set_tx_source(self, source: TxSource) -> Self {
        Self::new(Self::TX_SOURCE.set(self.val, source as u8))
    }
}

byte_register! {
    /// PCKTLEN1 register (address: 0x31), packet length MSB
    Pcktlen1 @ 0x31u8
}

byte_register! {
    /// PCKTLEN0 register (address: 0x32), packet length LSB
    Pcktlen0 @ 0x32u8
}

byte_register! {
    /// PROTOCOL2 register (address: 0x39)
    Protocol2 @ 0x39u8
}

impl Protocol2 {
    /// FIFO flags routed to GPIOs: 0 = TX FIFO, 1 = RX FIFO
    pub const FIFO_GPIO_OUT_MUX_SEL: Field = Field::new(2, 1);

    /// Routes the RX or TX FIFO flags to the GPIO outputs.
    #[must_use = "set_fifo_flags returns a modified Protocol2"]
    pub const fn set_fifo_flags(self, direction: FifoFlagDirection) -> Self {
        Self::new(Self::FIFO_GPIO_OUT_MUX_SEL.set(self.val, direction as u8))
    }
}

/// SYNC0 register address. The sync word bytes live at descending addresses
/// from here (SYNC0 = 0x36 holds the first byte, SYNC3 = 0x33 the fourth).
pub const SYNC0: u8 = 0x36;

/// Maximum number of sync word bytes.
pub const SYNC_WORD_MAX_BYTES: usize = 4;

/// FIFO threshold value field, common to the four FIFO_CONFIG registers.
pub const FIFO_THRESHOLD: Field = Field::new(0, 7);

/// TX data source (PCKTCTRL1 bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxSource {
    /// Packet handler from the FIFO
    Normal = 0,
    /// Direct mode through the FIFO
    DirectFifo = 1,
    /// Direct mode through a GPIO
    DirectGpio = 2,
    /// PN9 test sequence
    Pn9 = 3,
}

/// RX data source (PCKTCTRL3 bits 5:4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxSource {
    /// Packet handler into the FIFO
    Normal = 0,
    /// Direct mode through the FIFO
    DirectFifo = 1,
    /// Direct mode through a GPIO
    DirectGpio = 2,
}

/// Preamble pattern (PCKTCTRL3 bits 1:0), as seen with 2-(G)FSK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreamblePattern {
    /// 0101...
    Pattern0101 = 0,
    /// 1010...
    Pattern1010 = 1,
    /// 1100...
    Pattern1100 = 2,
    /// 0011...
    Pattern0011 = 3,
}

/// Which FIFO's flags are exported on GPIOs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoFlagDirection {
    /// TX FIFO almost full/empty flags
    Tx = 0,
    /// RX FIFO almost full/empty flags
    Rx = 1,
}

/// FIFO threshold registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoThreshold {
    /// FIFO_CONFIG3: RX almost full
    RxAlmostFull = 0x3C,
    /// FIFO_CONFIG2: RX almost empty
    RxAlmostEmpty = 0x3D,
    /// FIFO_CONFIG1: TX almost full
    TxAlmostFull = 0x3E,
    /// FIFO_CONFIG0: TX almost empty
    TxAlmostEmpty = 0x3F,
}

impl FifoThreshold {
    /// Register address of the threshold.
    pub const fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::covers_register;

    static_assertions::const_assert!(covers_register(
        &[Pcktctrl6::SYNC_LEN, Pcktctrl6::PREAMBLE_LEN_MSB],
        0
    ));
    static_assertions::const_assert!(covers_register(
        &[
            Pcktctrl3::PCKT_FRMT,
            Pcktctrl3::RX_MODE,
            Pcktctrl3::FSK4_SYM_SWAP,
            Pcktctrl3::BYTE_SWAP,
            Pcktctrl3::PREAMBLE_SEL
        ],
        0
    ));
    static_assertions::const_assert!(covers_register(
        &[
            Pcktctrl1::CRC_MODE,
            Pcktctrl1::WHIT_EN,
            Pcktctrl1::TX_SOURCE,
            Pcktctrl1::SECOND_SYNC_SEL,
            Pcktctrl1::FEC_EN
        ],
        0
    ));

    #[test]
    fn tx_and_rx_sources_land_in_their_fields() {
        assert_eq!(Pcktctrl1::new(0xFF).set_tx_source(TxSource::DirectFifo).raw(), 0xF7);
        assert_eq!(Pcktctrl1::new(0x00).set_tx_source(TxSource::Pn9).raw(), 0x0C);
        assert_eq!(Pcktctrl3::new(0xFF).set_rx_source(RxSource::Normal).raw(), 0xCF);
        assert_eq!(Pcktctrl3::new(0x00).set_rx_source(RxSource::DirectGpio).raw(), 0x20);
    }

    #[test]
    fn crc_disable_clears_only_crc_mode() {
        assert_eq!(Pcktctrl1::new(0xFF).disable_crc().raw(), 0x1F);
    }

    #[test]
    fn sync_length_shares_register_with_preamble() {
        let reg = Pcktctrl6::new(0x03).set_sync_len(32);
        assert_eq!(reg.raw(), 0x83);
        assert_eq!(Pcktctrl6::SYNC_LEN.get(reg.raw()), 32);
    }
}
