//! Simulated board for tests: a 74HC595-style output chain and a
//! parallel-load input chain hanging off shared clock and latch lines.
//!
//! The output chain shifts data-out in on every rising clock edge and copies
//! it to its outputs on a rising latch edge. The input chain loads the
//! parallel inputs on a rising latch edge, shifts on rising clock edges while
//! the latch is high and presents its MSB on data-in.

use core::cell::RefCell;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use std::rc::Rc;
use std::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Clock,
    Latch,
    DataIn,
    DataOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

#[derive(Default)]
struct State {
    bits: u8,
    clock: bool,
    latch: bool,
    data_out: bool,
    chain_out: u32,
    outputs: u32,
    chain_in: u32,
    inputs: u32,
    loopback: bool,
    broken: Option<Line>,
    schedule: Vec<(usize, u32)>,
    shifted: Vec<bool>,
    clock_rises: usize,
    latch_rises: usize,
    elapsed_us: u32,
}

impl State {
    fn mask(&self) -> u32 {
        u32::MAX >> (32 - u32::from(self.bits))
    }

    fn parallel_inputs(&self) -> u32 {
        if self.loopback {
            self.outputs
        } else {
            self.inputs
        }
    }

    fn drive(&mut self, line: Line, high: bool) -> Result<(), MockError> {
        if self.broken == Some(line) {
            return Err(MockError);
        }
        match line {
            Line::Clock => {
                if high && !self.clock {
                    self.clock_edge();
                }
                self.clock = high;
            }
            Line::Latch => {
                if high && !self.latch {
                    self.latch_rises += 1;
                    self.outputs = self.chain_out;
                    self.chain_in = self.parallel_inputs();
                }
                self.latch = high;
            }
            Line::DataOut => self.data_out = high,
            Line::DataIn => panic!("data-in is not an output"),
        }
        Ok(())
    }

    fn clock_edge(&mut self) {
        let mask = self.mask();
        self.shifted.push(self.data_out);
        self.chain_out = ((self.chain_out << 1) | u32::from(self.data_out)) & mask;
        if self.latch {
            self.chain_in = (self.chain_in << 1) & mask;
        }

        self.clock_rises += 1;
        let now = self.clock_rises;
        self.schedule.retain(|&(at, value)| {
            if at == now {
                self.inputs = value;
                false
            } else {
                true
            }
        });
    }

    fn sample(&self) -> bool {
        let chain = if self.latch {
            self.chain_in
        } else {
            self.parallel_inputs()
        };
        chain & (1 << (self.bits - 1)) != 0
    }
}

/// Handle to the simulated board. Clones share the same state.
#[derive(Clone)]
pub struct Board(Rc<RefCell<State>>);

impl Board {
    pub fn new(bits: u8) -> Self {
        Self(Rc::new(RefCell::new(State {
            bits,
            ..State::default()
        })))
    }

    pub fn pin(&self, line: Line) -> MockPin {
        MockPin {
            board: self.clone(),
            line,
        }
    }

    pub fn pins(&self) -> crate::Pins<MockPin, MockPin, MockPin, MockPin> {
        crate::Pins {
            clock: self.pin(Line::Clock),
            latch: self.pin(Line::Latch),
            data_in: self.pin(Line::DataIn),
            data_out: self.pin(Line::DataOut),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    pub fn set_inputs(&self, value: u32) {
        self.0.borrow_mut().inputs = value;
    }

    /// Replace the parallel inputs once the clock has risen `after` times
    /// since the last [`Board::clear_log`].
    pub fn schedule_inputs(&self, after: usize, value: u32) {
        self.0.borrow_mut().schedule.push((after, value));
    }

    /// Feed the output chain's parallel outputs back into the input chain.
    pub fn set_loopback(&self, on: bool) {
        self.0.borrow_mut().loopback = on;
    }

    pub fn break_line(&self, line: Line) {
        self.0.borrow_mut().broken = Some(line);
    }

    pub fn clear_log(&self) {
        let mut state = self.0.borrow_mut();
        state.shifted.clear();
        state.schedule.clear();
        state.clock_rises = 0;
        state.latch_rises = 0;
        state.elapsed_us = 0;
    }

    pub fn outputs(&self) -> u32 {
        self.0.borrow().outputs
    }

    /// Data-out level at every rising clock edge, oldest first.
    pub fn shifted(&self) -> Vec<bool> {
        self.0.borrow().shifted.clone()
    }

    pub fn clock_rises(&self) -> usize {
        self.0.borrow().clock_rises
    }

    pub fn latch_rises(&self) -> usize {
        self.0.borrow().latch_rises
    }

    pub fn elapsed_us(&self) -> u32 {
        self.0.borrow().elapsed_us
    }

    pub fn level(&self, line: Line) -> bool {
        let state = self.0.borrow();
        match line {
            Line::Clock => state.clock,
            Line::Latch => state.latch,
            Line::DataOut => state.data_out,
            Line::DataIn => state.sample(),
        }
    }
}

pub struct MockPin {
    board: Board,
    line: Line,
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), MockError> {
        self.board.0.borrow_mut().drive(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.board.0.borrow_mut().drive(self.line, true)
    }
}

impl InputPin for MockPin {
    type Error = MockError;

    fn is_high(&self) -> Result<bool, MockError> {
        Ok(self.board.0.borrow().sample())
    }

    fn is_low(&self) -> Result<bool, MockError> {
        self.is_high().map(|high| !high)
    }
}

pub struct MockDelay(Board);

impl DelayUs<u16> for MockDelay {
    fn delay_us(&mut self, us: u16) {
        self.0 .0.borrow_mut().elapsed_us += u32::from(us);
    }
}
