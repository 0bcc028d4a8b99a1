//! Register definitions for the S2LP transceiver
//!
//! Each register is a thin wrapper around its raw byte. Field layouts are
//! published as [`Field`](crate::field::Field) constants and the setters are
//! `const fn`s that only touch their own bits, so a value read from the chip
//! can be modified and written back without disturbing reserved bits or
//! fields owned by someone else.
//!
//! Registers that exist as an indexed bank (GPIOx_CONF, IRQ_MASKx, SYNCx,
//! FIFO_CONFIGx) are addressed at runtime and are described by plain value
//! types together with their base address.

/// Declares a single-byte register backed by its raw value.
macro_rules! byte_register {
    ($(#[$meta:meta])* $name:ident @ $addr:tt) => {
        $(#[$meta])*
        #[regiface::register($addr)]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Default,
            regiface::ReadableRegister,
            regiface::WritableRegister,
        )]
        pub struct $name {
            val: u8,
        }

        impl $name {
            /// Register address.
            pub const ADDRESS: u8 = $addr;

            /// Wraps a raw register value.
            pub const fn new(val: u8) -> Self {
                Self { val }
            }

            /// Raw register value.
            pub const fn raw(self) -> u8 {
                self.val
            }
        }

        impl ::regiface::FromByteArray for $name {
            type Error = ::core::convert::Infallible;
            type Array = [u8; 1];

            fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                Ok(Self { val: bytes[0] })
            }
        }

        impl ::regiface::ToByteArray for $name {
            type Error = ::core::convert::Infallible;
            type Array = [u8; 1];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok([self.val])
            }
        }
    };
}

mod dio;
mod packet;
mod rf;
mod system;

pub use dio::*;
pub use packet::*;
pub use rf::*;
pub use system::*;

/// FIFO pseudo-register, used as the address of burst FIFO accesses.
pub const FIFO: u8 = 0xFF;
