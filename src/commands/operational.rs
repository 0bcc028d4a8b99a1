//! Operational state commands
//!
//! This module contains commands that drive the main controller state
//! machine:
//! - READY, STANDBY and SLEEP for idle and low power
//! - LOCKTX and LOCKRX to lock the PLL ahead of a transition
//! - TX and RX to start transmission or reception
//! - SABORT to leave TX/RX, SRES for a soft reset
//!
//! Commands are accepted only once the crystal oscillator is running
//! (SRES excepted). State transitions are not instantaneous; follow a
//! command with a wait on the expected [`State`](crate::State).

use crate::{Command, NoParameters};

/// TX command (0x60)
///
/// Starts a transmission from READY or LOCKTX.
///
/// # Important Notes
/// - The PLL is locked and calibrated automatically if needed
/// - In direct FIFO mode data must be streamed before the FIFO underflows
#[derive(Debug, Clone)]
pub struct Tx;

impl Command for Tx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x60
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// RX command (0x61)
///
/// Starts reception from READY or LOCKRX.
#[derive(Debug, Clone)]
pub struct Rx;

impl Command for Rx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x61
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// READY command (0x62)
///
/// Moves the chip to READY from STANDBY, SLEEP or LOCK. From TX or RX use
/// [`Sabort`] instead.
#[derive(Debug, Clone)]
pub struct Ready;

impl Command for Ready {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x62
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// STANDBY command (0x63)
///
/// Moves the chip from READY to STANDBY. The crystal is turned off; only
/// the digital part keeps its configuration.
#[derive(Debug, Clone)]
pub struct Standby;

impl Command for Standby {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x63
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SLEEP command (0x64)
///
/// Moves the chip from READY to SLEEP, keeping register content.
#[derive(Debug, Clone)]
pub struct Sleep;

impl Command for Sleep {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x64
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// LOCKRX command (0x65)
///
/// Locks the PLL on the RX frequency and stays in LOCK.
#[derive(Debug, Clone)]
pub struct LockRx;

impl Command for LockRx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x65
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// LOCKTX command (0x66)
///
/// Locks the PLL on the TX frequency and stays in LOCK.
#[derive(Debug, Clone)]
pub struct LockTx;

impl Command for LockTx {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x66
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SABORT command (0x67)
///
/// Exits TX or RX and returns to READY.
#[derive(Debug, Clone)]
pub struct Sabort;

impl Command for Sabort {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x67
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// LDC_RELOAD command (0x68)
///
/// Reloads the low duty cycle timer with the programmed value.
#[derive(Debug, Clone)]
pub struct LdcReload;

impl Command for LdcReload {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x68
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// SRES command (0x70)
///
/// Software reset: all registers return to their reset values.
#[derive(Debug, Clone)]
pub struct Sres;

impl Command for Sres {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x70
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// FLUSHRXFIFO command (0x71)
///
/// Empties the RX FIFO. Only valid in READY.
#[derive(Debug, Clone)]
pub struct FlushRxFifo;

impl Command for FlushRxFifo {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x71
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}

/// FLUSHTXFIFO command (0x72)
///
/// Empties the TX FIFO. Only valid in READY.
#[derive(Debug, Clone)]
pub struct FlushTxFifo;

impl Command for FlushTxFifo {
    type IdType = u8;
    type CommandParameters = NoParameters;
    type ResponseParameters = NoParameters;

    fn id() -> Self::IdType {
        0x72
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        NoParameters::default()
    }
}
