use crate::config::{Config, Mode, Timing, Width};
use crate::error::Error;
use crate::hybrid::{HybridCycle, Phases, WriteLatchRead};
use crate::pins::Pins;
use core::marker::PhantomData;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

/// A chain of cascaded shift registers driven by bit-banging GPIO lines.
///
/// Bits always travel MSB first across the configured width. `output` holds
/// the next value to shift out and `input` the last value shifted in; both
/// are free for the caller to read and write between transfers, as are
/// `timing` and `invert_output`.
///
/// Every transfer blocks for roughly `2 * bits * clock_edge_us` plus one
/// latch pulse.
pub struct ShiftRegister<CLK, LATCH, DIN, DOUT, D, H = WriteLatchRead> {
    pub input: u32,
    pub output: u32,
    pub timing: Timing,
    pub invert_output: bool,
    mode: Mode,
    width: Width,
    pins: Pins<CLK, LATCH, DIN, DOUT>,
    delay: D,
    hybrid: PhantomData<H>,
}

impl<CLK, LATCH, DIN, DOUT, D, E> ShiftRegister<CLK, LATCH, DIN, DOUT, D>
where
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DIN: InputPin<Error = E>,
    DOUT: OutputPin<Error = E>,
    D: DelayUs<u16>,
{
    /// Bring up a register with the default [`WriteLatchRead`] hybrid cycle.
    ///
    /// Drives clock, latch and data-out low and runs one transfer for the
    /// configured mode before returning.
    pub fn new(
        config: Config,
        pins: Pins<CLK, LATCH, DIN, DOUT>,
        delay: D,
    ) -> Result<Self, Error<E>> {
        Self::with_hybrid(config, pins, delay)
    }
}

impl<CLK, LATCH, DIN, DOUT, D, H, E> ShiftRegister<CLK, LATCH, DIN, DOUT, D, H>
where
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DIN: InputPin<Error = E>,
    DOUT: OutputPin<Error = E>,
    D: DelayUs<u16>,
    H: HybridCycle,
{
    /// Like [`ShiftRegister::new`], with the hybrid cycle chosen by `H`.
    pub fn with_hybrid(
        config: Config,
        mut pins: Pins<CLK, LATCH, DIN, DOUT>,
        delay: D,
    ) -> Result<Self, Error<E>> {
        let width = Width::from_octets(config.octets).map_err(Error::Width)?;

        pins.clock.set_low().map_err(Error::Pin)?;
        pins.latch.set_low().map_err(Error::Pin)?;
        pins.data_out.set_low().map_err(Error::Pin)?;

        let mut register = Self {
            input: 0,
            output: config.initial,
            timing: config.timing,
            invert_output: config.invert_output,
            mode: config.mode,
            width,
            pins,
            delay,
            hybrid: PhantomData,
        };
        register.update().map_err(Error::Pin)?;
        Ok(register)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Hand back the pins and the delay provider.
    pub fn release(self) -> (Pins<CLK, LATCH, DIN, DOUT>, D) {
        (self.pins, self.delay)
    }

    /// Run the transfer belonging to the configured mode.
    pub fn update(&mut self) -> Result<(), E> {
        match self.mode {
            Mode::WriteOnly => self.write(),
            Mode::ReadOnly => self.read(),
            Mode::ReadWrite => self.read_write(),
        }
    }

    /// Shift `output` out and latch it onto the parallel outputs.
    pub fn write(&mut self) -> Result<(), E> {
        #[cfg(feature = "defmt")]
        defmt::trace!("write {=u32:#x} ({=u8} bits)", self.output, self.width.bits());

        self.shift_out()?;
        self.pulse_latch()
    }

    /// Freeze the parallel inputs and shift them into `input`.
    pub fn read(&mut self) -> Result<(), E> {
        self.set_latch(true)?;
        self.shift_in()?;
        self.set_latch(false)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("read {=u32:#x} ({=u8} bits)", self.input, self.width.bits());
        Ok(())
    }

    /// Drive `output` and sample `input` in one cycle ordered by `H`.
    pub fn read_write(&mut self) -> Result<(), E> {
        H::cycle(self)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("exchange {=u32:#x} -> {=u32:#x}", self.output, self.input);
        Ok(())
    }

    /// Shift the same level into every position and latch it. `output` is
    /// left alone; `invert_output` still applies.
    pub fn fill(&mut self, high: bool) -> Result<(), E> {
        for _ in 0..self.width.bits() {
            self.drive_data(high)?;
            self.pulse_clock()?;
        }
        self.pulse_latch()
    }

    pub fn pulse_clock(&mut self) -> Result<(), E> {
        self.pins.clock.set_high()?;
        self.delay.delay_us(self.timing.clock_edge_us);
        self.pins.clock.set_low()?;
        self.delay.delay_us(self.timing.clock_edge_us);
        Ok(())
    }

    pub fn pulse_latch(&mut self) -> Result<(), E> {
        self.pins.latch.set_high()?;
        self.delay.delay_us(self.timing.latch_pulse_us);
        self.pins.latch.set_low()
    }

    fn drive_data(&mut self, high: bool) -> Result<(), E> {
        if high != self.invert_output {
            self.pins.data_out.set_high()
        } else {
            self.pins.data_out.set_low()
        }
    }
}

impl<CLK, LATCH, DIN, DOUT, D, H, E> Phases for ShiftRegister<CLK, LATCH, DIN, DOUT, D, H>
where
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
    DIN: InputPin<Error = E>,
    DOUT: OutputPin<Error = E>,
    D: DelayUs<u16>,
    H: HybridCycle,
{
    type Error = E;

    fn shift_out(&mut self) -> Result<(), E> {
        for i in (0..self.width.bits()).rev() {
            self.drive_data((self.output >> i) & 1 != 0)?;
            self.pulse_clock()?;
        }
        Ok(())
    }

    fn shift_in(&mut self) -> Result<(), E> {
        self.input = 0;
        for _ in 0..self.width.bits() {
            self.input <<= 1;
            if self.pins.data_in.is_high()? {
                self.input |= 1;
            }
            self.pulse_clock()?;
        }
        Ok(())
    }

    fn set_latch(&mut self, high: bool) -> Result<(), E> {
        if high {
            self.pins.latch.set_high()
        } else {
            self.pins.latch.set_low()
        }
    }

    fn pulse_latch(&mut self) -> Result<(), E> {
        ShiftRegister::pulse_latch(self)
    }
}
