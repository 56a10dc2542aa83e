//! Ring, LED and brightness identifiers
//!
//! The topology is fixed at compile time: four rings of 64 LEDs each,
//! every LED holding one of 16 brightness levels.

use core::fmt;

/// Number of rings on the surface
pub const N_RINGS: usize = 4;

/// Number of LEDs per ring
pub const N_LEDS: usize = 64;

const RING_MASK: u8 = (N_RINGS - 1) as u8;
const LED_MASK: u8 = (N_LEDS - 1) as u8;

/// Index of one ring (0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingId(u8);

impl RingId {
    /// All rings in index order
    pub const ALL: [RingId; N_RINGS] = [RingId(0), RingId(1), RingId(2), RingId(3)];

    /// Create a ring id, rejecting out-of-range values
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < N_RINGS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Create a ring id by keeping only the low bits of `value`
    pub const fn masked(value: u8) -> Self {
        Self(value & RING_MASK)
    }

    /// Raw index
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index for array access
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of one LED within a ring (0-63)
///
/// LED 0 sits at twelve o'clock; indices advance clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedIndex(u8);

impl LedIndex {
    /// Create an LED index, rejecting out-of-range values
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < N_LEDS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Create an LED index by keeping only the low bits of `value`
    pub const fn masked(value: u8) -> Self {
        Self(value & LED_MASK)
    }

    /// Raw index
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index for array access
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask of this LED in a 64-bit LED set
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Iterate over every LED in order
    pub fn all() -> impl Iterator<Item = LedIndex> {
        (0..N_LEDS as u8).map(LedIndex)
    }

    /// Iterate over the LEDs whose bits are set in `set`
    pub fn in_set(set: u64) -> impl Iterator<Item = LedIndex> {
        Self::all().filter(move |led| set & led.bit() != 0)
    }
}

/// LED brightness level (0 = off, 15 = full)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Level(u8);

impl Level {
    /// Highest level value
    pub const MAX: u8 = 15;

    /// LED off
    pub const OFF: Level = Level(0);

    /// LED at full brightness
    pub const FULL: Level = Level(Self::MAX);

    /// Create a level, rejecting values above 15
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a level by keeping only the low nibble of `value`
    pub const fn masked(value: u8) -> Self {
        Self(value & Self::MAX)
    }

    /// Raw level value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Index for pattern table access
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
