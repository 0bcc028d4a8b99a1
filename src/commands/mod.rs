//! Radio command implementations
//!
//! S2LP commands are single bytes sent after the `0x80` command header. None
//! of them take parameters or return a response; their effect is observed
//! through MC_STATE0.
//!
//! # Command Categories
//! - [`operational`]: state machine control (READY, STANDBY, SLEEP, LOCK,
//!   TX, RX, SABORT, SRES) and FIFO flushes
//! - [`status`]: the state codes reported by the main controller
//!
//! # Common Patterns
//! 1. Send the command
//! 2. Wait for the expected state with a bounded poll
//! 3. Proceed with the next step

mod operational;
mod status;

pub use operational::*;
pub use status::*;
