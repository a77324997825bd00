use ufmt::derive::uDebug;

/// Largest chain the `u32` buffers can hold.
pub const MAX_OCTETS: u8 = 4;

/// Which chains a register drives. Fixed for the lifetime of the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uDebug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Serial-in, parallel-out (74HC595 and friends).
    WriteOnly,
    /// Parallel-in, serial-out (74HC165, CD4021, game controllers).
    ReadOnly,
    /// Both chains on a shared clock and latch.
    ReadWrite,
}

/// Hold times in microseconds for every clock edge and latch pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub clock_edge_us: u16,
    pub latch_pulse_us: u16,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        clock_edge_us: 5,
        latch_pulse_us: 5,
    };

    /// Fast enough for the shift register inside an 8-bit game controller.
    pub const FAST: Self = Self {
        clock_edge_us: 1,
        latch_pulse_us: 1,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Validated chain width, 1 to [`MAX_OCTETS`] octets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Width(u8);

impl Width {
    /// Rejects anything outside 1..=[`MAX_OCTETS`], handing the bad value back.
    pub fn from_octets(octets: u8) -> Result<Self, u8> {
        match octets {
            1..=MAX_OCTETS => Ok(Self(octets)),
            _ => Err(octets),
        }
    }

    pub fn octets(self) -> u8 {
        self.0
    }

    pub fn bits(self) -> u8 {
        self.0 * 8
    }

    /// Mask selecting the first bit on the wire.
    pub fn msb(self) -> u32 {
        1 << (self.bits() - 1)
    }

    /// Mask covering every bit of the chain.
    pub fn mask(self) -> u32 {
        u32::MAX >> (32 - u32::from(self.bits()))
    }
}

/// Everything needed to bring up a register, apart from its pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: Mode,
    pub octets: u8,
    /// Value placed in the output buffer before the first transfer.
    pub initial: u32,
    pub timing: Timing,
    pub invert_output: bool,
}

impl Config {
    pub const fn new(mode: Mode, octets: u8) -> Self {
        Self {
            mode,
            octets,
            initial: 0,
            timing: Timing::DEFAULT,
            invert_output: false,
        }
    }

    pub const fn initial(mut self, value: u32) -> Self {
        self.initial = value;
        self
    }

    pub const fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub const fn inverted(mut self, invert: bool) -> Self {
        self.invert_output = invert;
        self
    }
}
