//! 8-bit game controllers with a DE9 connector.
//!
//! The controller carries a single 8-bit parallel-in shift register. Pin 2 of
//! the connector is data, pin 3 latch, pin 4 clock, pin 6 +5V and pin 8
//! ground.
//!
//! The controller reports one key at a time. With two keys down only the
//! first is seen. A held key reads as [`code::HELD`], and a release reads as
//! a key-specific code, except for the right key whose release code is
//! unknown and probably the same as [`code::HELD`]. A and B share one
//! press code; only their release codes tell them apart.
//!
//! Polling every 100 ms or faster is enough for interactive use.

use crate::config::{Config, Mode, Timing};
use crate::error::Error;
use crate::pins::{Pins, Unwired};
use crate::shift::ShiftRegister;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use ufmt::derive::uDebug;

/// Raw samples produced by the controller.
pub mod code {
    pub const IDLE: u8 = 255;
    pub const HELD: u8 = 0;
    pub const UP: u8 = 240;
    pub const UP_RELEASED: u8 = 7;
    pub const DOWN: u8 = 248;
    pub const DOWN_RELEASED: u8 = 3;
    pub const LEFT: u8 = 252;
    pub const LEFT_RELEASED: u8 = 1;
    pub const RIGHT: u8 = 254;
    /// Not observed on real hardware.
    pub const RIGHT_RELEASED: Option<u8> = None;
    pub const SELECT: u8 = 192;
    pub const SELECT_RELEASED: u8 = 31;
    pub const START: u8 = 224;
    pub const START_RELEASED: u8 = 15;
    pub const A_OR_B: u8 = 128;
    pub const A_RELEASED: u8 = 63;
    pub const B_RELEASED: u8 = 127;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
    Start,
    A,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// No key is down.
    Idle,
    /// The last pressed key is still down.
    Held,
    Pressed(Button),
    /// A or B went down; which one is only known on release.
    PressedAOrB,
    Released(Button),
    Unknown(u8),
}

impl Event {
    pub fn decode(sample: u8) -> Self {
        match sample {
            code::IDLE => Event::Idle,
            code::HELD => Event::Held,
            code::UP => Event::Pressed(Button::Up),
            code::DOWN => Event::Pressed(Button::Down),
            code::LEFT => Event::Pressed(Button::Left),
            code::RIGHT => Event::Pressed(Button::Right),
            code::SELECT => Event::Pressed(Button::Select),
            code::START => Event::Pressed(Button::Start),
            code::A_OR_B => Event::PressedAOrB,
            code::UP_RELEASED => Event::Released(Button::Up),
            code::DOWN_RELEASED => Event::Released(Button::Down),
            code::LEFT_RELEASED => Event::Released(Button::Left),
            code::SELECT_RELEASED => Event::Released(Button::Select),
            code::START_RELEASED => Event::Released(Button::Start),
            code::A_RELEASED => Event::Released(Button::A),
            code::B_RELEASED => Event::Released(Button::B),
            other => Event::Unknown(other),
        }
    }
}

/// A controller on its own read-only 8-bit register.
pub struct Gamepad<CLK, LATCH, DIN, D, E> {
    register: ShiftRegister<CLK, LATCH, DIN, Unwired<E>, D>,
    held: Option<Button>,
}

impl<CLK, LATCH, DIN, D, E> Gamepad<CLK, LATCH, DIN, D, E>
where
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DIN: InputPin<Error = E>,
    D: DelayUs<u16>,
{
    pub const CONFIG: Config = Config::new(Mode::ReadOnly, 1).timing(Timing::FAST);

    pub fn new(clock: CLK, latch: LATCH, data: DIN, delay: D) -> Result<Self, Error<E>> {
        let register = ShiftRegister::new(Self::CONFIG, Pins::input(clock, latch, data), delay)?;
        Ok(Self {
            register,
            held: None,
        })
    }

    /// Sample the controller once and decode the result.
    pub fn poll(&mut self) -> Result<Event, E> {
        self.register.read()?;
        let event = Event::decode(self.raw());

        match event {
            Event::Pressed(button) => self.held = Some(button),
            Event::PressedAOrB | Event::Released(_) | Event::Idle => self.held = None,
            Event::Held | Event::Unknown(_) => {}
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("gamepad sample {=u8} -> {}", self.raw(), event);
        Ok(event)
    }

    /// Button behind the last [`Event::Held`], if the press was seen.
    ///
    /// A released right key reads as held until the controller goes idle.
    pub fn held_button(&self) -> Option<Button> {
        self.held
    }

    /// Last sample as read from the wire.
    pub fn raw(&self) -> u8 {
        self.register.input as u8
    }

    pub fn release(self) -> (CLK, LATCH, DIN, D) {
        let (pins, delay) = self.register.release();
        (pins.clock, pins.latch, pins.data_in, delay)
    }
}
