//! Ordering of a combined read/write cycle.
//!
//! When an output chain and an input chain share clock and latch, the order in
//! which bits are shifted and the latch toggled depends on the board. The
//! register exposes its building blocks through [`Phases`] and leaves the
//! ordering to a [`HybridCycle`] type parameter.

/// Building blocks of a transfer, as seen by a [`HybridCycle`].
pub trait Phases {
    type Error;

    /// Drive every bit of the output buffer onto data-out, MSB first, one
    /// clock pulse per bit. Does not touch the latch.
    fn shift_out(&mut self) -> Result<(), Self::Error>;

    /// Clear the input buffer and clock in one bit per position from
    /// data-in, MSB first. Does not touch the latch.
    fn shift_in(&mut self) -> Result<(), Self::Error>;

    fn set_latch(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Latch high, hold, latch low.
    fn pulse_latch(&mut self) -> Result<(), Self::Error>;
}

/// Sequence run by [`ShiftRegister::read_write`](crate::ShiftRegister::read_write).
pub trait HybridCycle {
    fn cycle<P: Phases + ?Sized>(chain: &mut P) -> Result<(), P::Error>;
}

/// Shift the outputs out, raise the latch, shift the inputs in, drop the
/// latch.
///
/// Raising the latch commits the output chain and freezes the parallel
/// inputs at the same instant, so the sampled inputs are the ones present
/// right after the new outputs appear.
#[derive(Clone, Copy, Debug, Default)]
pub struct WriteLatchRead;

impl HybridCycle for WriteLatchRead {
    fn cycle<P: Phases + ?Sized>(chain: &mut P) -> Result<(), P::Error> {
        chain.shift_out()?;
        chain.set_latch(true)?;
        chain.shift_in()?;
        chain.set_latch(false)
    }
}
