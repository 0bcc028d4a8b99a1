//! Main controller state
//!
//! The 7-bit state code reported in MC_STATE0[7:1]. Codes outside the list
//! below show up transiently while the controller moves between states.

/// Error type for unknown state codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// The value does not correspond to a documented state
    InvalidValue(u8),
}

/// Operating state of the main controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// READY: crystal on, synthesizer off
    Ready = 0x00,
    /// SLEEP without FIFO retention
    SleepNoFifo = 0x01,
    /// STANDBY: crystal off, configuration kept
    Standby = 0x02,
    /// SLEEP with FIFO retention
    Sleep = 0x03,
    /// LOCK: PLL locked
    Lock = 0x0C,
    /// Locking the PLL before a TX/RX
    LockSt = 0x14,
    /// RX
    Rx = 0x30,
    /// Synthesizer setting up
    SynthSetup = 0x50,
    /// TX
    Tx = 0x5C,
}

impl State {
    /// Raw 7-bit state code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for State {
    type Error = StateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Ready),
            0x01 => Ok(Self::SleepNoFifo),
            0x02 => Ok(Self::Standby),
            0x03 => Ok(Self::Sleep),
            0x0C => Ok(Self::Lock),
            0x14 => Ok(Self::LockSt),
            0x30 => Ok(Self::Rx),
            0x50 => Ok(Self::SynthSetup),
            0x5C => Ok(Self::Tx),
            invalid => Err(StateError::InvalidValue(invalid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for state in [
            State::Ready,
            State::SleepNoFifo,
            State::Standby,
            State::Sleep,
            State::Lock,
            State::LockSt,
            State::Rx,
            State::SynthSetup,
            State::Tx,
        ] {
            assert_eq!(State::try_from(state.code()), Ok(state));
        }
        assert_eq!(State::try_from(0x7F), Err(StateError::InvalidValue(0x7F)));
    }
}
