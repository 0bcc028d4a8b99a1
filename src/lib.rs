#![cfg_attr(not(test), no_std)]
//! S2LP Radio Driver
//!
//! This crate drives the ST S2LP sub-GHz transceiver of a Sigfox node built
//! around an STM32L0. The S2LP is an ultra-low power narrow-band transceiver
//! for the 413-1055 MHz ISM bands.
//!
//! # Features
//! - Frequency synthesis for the 868 MHz Sigfox band from a 49.152 MHz TCXO
//! - Modulation support: 2/4-(G)FSK, ASK/OOK, polar (DBPSK uplinks)
//! - Output power from -49 to +14 dBm
//! - 128-byte TX and RX FIFOs, fed by DMA or by the CPU
//! - Four programmable GPIOs and 29 interrupt sources
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: chip-select-framed register transport
//!   - Register, command and FIFO access over an SPI bus
//!   - Blocking and async variants
//!
//! - [`registers`]: Register definitions with named bit fields
//!   - [`registers`] RF, packet, DIO and system registers
//!
//! - [`commands`]: Command interface for radio control
//!   - State machine commands and FIFO flushes
//!   - [`State`] codes reported by MC_STATE0
//!
//! - [`radio`]: the [`S2lp`] driver built on the above
//!
//! - [`dma`], [`exti`], [`irq`]: the STM32L0 side of the radio path (FIFO
//!   streaming channel, GPIO0 edge line, NVIC priorities)
//!
//! - [`mapping`], [`pins`]: board pin table and pin control seam
//!
//! # Usage
//! The driver uses the `regiface` crate to provide a type-safe interface
//! for register access and command execution. The main entry point is the
//! [`S2lp`] struct, which owns a [`Device`] transport, the board pins and a
//! delay source.
//!
//! Bring-up follows a fixed sequence:
//!
//! 1. Configure board pins with [`S2lp::init`]
//! 2. Power the TCXO and leave shutdown
//! 3. Wait for the oscillator, then select it
//! 4. Set charge pump, SMPS, frequency and modulation
//! 5. Configure packet format, PA and GPIOs
//! 6. Send TX or RX and wait for the state
//!
//! # Important Notes
//! - Commands other than SRES require the oscillator to run
//! - FIFO flushes are only accepted in READY
//! - State waits are bounded by [`PollBudget`] and return
//!   [`Error::Timeout`] when it runs out
//! - Interrupt handlers communicate with the driver through [`IrqFlag`]
//!
//! # Example
//! ```ignore
//! use s2lp::{commands, Config, Device, S2lp, State};
//!
//! fn start_tx<SPI, CS, P, D>(spi: SPI, cs: CS, pins: P, delay: D) -> Result<(), s2lp::Error>
//! where
//!     SPI: embedded_hal::spi::SpiBus,
//!     CS: embedded_hal::digital::OutputPin,
//!     P: s2lp::pins::PinControl,
//!     D: embedded_hal::delay::DelayNs,
//! {
//!     let mut radio = S2lp::new(Device::new(spi, cs), pins, delay, Config::default());
//!     radio.send_command(commands::Ready)?;
//!     radio.wait_for_state(State::Ready)
//! }
//! ```

use regiface::*;

pub mod commands;
pub mod config;
pub mod device;
pub mod dma;
mod error;
pub mod exti;
pub mod field;
pub mod flag;
pub mod irq;
pub mod mapping;
pub mod pins;
pub mod radio;
pub mod registers;

/// STM32L0x1 peripheral access crate.
pub use stm32l0::stm32l0x1 as pac;

pub use commands::*;
pub use config::{Config, PollBudget};
pub use device::Device;
pub use error::Error;
pub use flag::IrqFlag;
pub use radio::{Gpio0Polarity, RfPath, S2lp};
pub use registers::*;
