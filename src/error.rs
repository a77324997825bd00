use thiserror::Error;

/// Failure to bring up a register. `E` is the pin error of the HAL in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    #[error("chain width of {0} octets is outside 1..=4")]
    Width(u8),
    #[error("pin error: {0:?}")]
    Pin(E),
}
