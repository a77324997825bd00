use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

/// Pins of one chain. Clock and latch are shared when both data lines are
/// wired.
///
/// A register takes ownership of its pins, so no two registers can drive the
/// same typed lines. Pins handed out through [`Unwired`] are not connected.
pub struct Pins<CLK, LATCH, DIN, DOUT> {
    pub clock: CLK,
    pub latch: LATCH,
    pub data_in: DIN,
    pub data_out: DOUT,
}

impl<CLK, LATCH, DOUT, E> Pins<CLK, LATCH, Unwired<E>, DOUT> {
    /// Serial-out chain with no data-in line.
    pub fn output(clock: CLK, latch: LATCH, data_out: DOUT) -> Self {
        Self {
            clock,
            latch,
            data_in: Unwired::new(),
            data_out,
        }
    }
}

impl<CLK, LATCH, DIN, E> Pins<CLK, LATCH, DIN, Unwired<E>> {
    /// Serial-in chain with no data-out line.
    pub fn input(clock: CLK, latch: LATCH, data_in: DIN) -> Self {
        Self {
            clock,
            latch,
            data_in,
            data_out: Unwired::new(),
        }
    }
}

/// Stand-in for a data line that is not connected.
///
/// Writes go nowhere and reads are always low. `E` matches the error type of
/// the real pins it sits beside.
pub struct Unwired<E = Infallible>(PhantomData<E>);

impl<E> Unwired<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for Unwired<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> OutputPin for Unwired<E> {
    type Error = E;

    fn set_low(&mut self) -> Result<(), E> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), E> {
        Ok(())
    }
}

impl<E> InputPin for Unwired<E> {
    type Error = E;

    fn is_high(&self) -> Result<bool, E> {
        Ok(false)
    }

    fn is_low(&self) -> Result<bool, E> {
        Ok(true)
    }
}
