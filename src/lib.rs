//! Bit-banged driver for cascaded shift registers on clock, latch and data
//! lines.
//!
//! Three wirings are supported: serial-out chains (74HC595), serial-in chains
//! (74HC165, CD4021, game controllers) and hybrid boards where both share
//! clock and latch. Chains are 8 to 32 bits long and always shifted MSB
//! first.
//!
//! Built on the [`embedded-hal`] 0.2 digital and delay traits. All pins of
//! one register share the HAL's pin error type.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2
#![cfg_attr(not(test), no_std)]

mod config;
mod error;
pub mod gamepad;
pub mod hybrid;
mod pins;
mod shift;

#[cfg(test)]
mod mock;

pub use config::{Config, Mode, Timing, Width, MAX_OCTETS};
pub use error::Error;
pub use gamepad::{Button, Event, Gamepad};
pub use hybrid::{HybridCycle, Phases, WriteLatchRead};
pub use pins::{Pins, Unwired};
pub use shift::ShiftRegister;
