//! Pin assignment of the Sigfox node board

use crate::pins::{Pin, Port};

/// TCXO supply switch.
pub const TCXO_POWER_ENABLE: Pin = Pin::new(Port::A, 8, 0);
/// S2LP shutdown input (active high, pulled up inside the chip).
pub const S2LP_SDN: Pin = Pin::new(Port::A, 9, 0);
/// S2LP GPIO0, used as the radio interrupt line.
pub const S2LP_GPIO0: Pin = Pin::new(Port::A, 11, 0);
/// S2LP SPI chip-select.
pub const S2LP_CS: Pin = Pin::new(Port::A, 15, 0);

pub const SPI1_SCK: Pin = Pin::new(Port::B, 3, 0);
pub const SPI1_MISO: Pin = Pin::new(Port::B, 4, 0);
pub const SPI1_MOSI: Pin = Pin::new(Port::B, 5, 0);

/// RF front-end supply.
pub const RF_POWER_ENABLE: Pin = Pin::new(Port::B, 8, 0);
/// TX path of the RF switch.
pub const RF_TX_ENABLE: Pin = Pin::new(Port::B, 7, 0);
/// RX path of the RF switch.
pub const RF_RX_ENABLE: Pin = Pin::new(Port::B, 6, 0);
