//! Button state snapshots

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

// Host button bits
const BUTTON_LEFT: u8 = 0x01;
const BUTTON_RIGHT: u8 = 0x02;
const BUTTON_UP: u8 = 0x04;
const BUTTON_DOWN: u8 = 0x08;
const BUTTON_B: u8 = 0x10;
const BUTTON_A: u8 = 0x20;

/// Set of buttons, using the host's bit layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const LEFT: Buttons = Buttons(BUTTON_LEFT);
    pub const RIGHT: Buttons = Buttons(BUTTON_RIGHT);
    pub const UP: Buttons = Buttons(BUTTON_UP);
    pub const DOWN: Buttons = Buttons(BUTTON_DOWN);
    pub const B: Buttons = Buttons(BUTTON_B);
    pub const A: Buttons = Buttons(BUTTON_A);

    /// Directional buttons in selection priority order
    pub const DIRECTIONS: [Buttons; 4] = [Self::LEFT, Self::UP, Self::DOWN, Self::RIGHT];

    /// Build from raw host bits; unknown bits are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (BUTTON_LEFT | BUTTON_RIGHT | BUTTON_UP | BUTTON_DOWN | BUTTON_B | BUTTON_A))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every button in `other` is in this set
    pub const fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Buttons;

    fn bitand(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Buttons;

    fn not(self) -> Buttons {
        Buttons::from_bits(!self.0)
    }
}

/// Button state for one tick
///
/// `pushed` and `released` hold the edges since the previous tick;
/// `current` holds what is down right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub current: Buttons,
    pub pushed: Buttons,
    pub released: Buttons,
}

impl ButtonState {
    /// Derive edges from two consecutive samples
    ///
    /// For hosts that only report the level of each button.
    pub fn from_samples(previous: Buttons, current: Buttons) -> Self {
        Self {
            current,
            pushed: current & !previous,
            released: previous & !current,
        }
    }
}

/// Everything the input controller needs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFrame {
    pub buttons: ButtonState,
    /// Crank rotation since the previous tick (degrees)
    pub crank_delta: f32,
}

impl InputFrame {
    /// A frame with only edges, no crank movement
    pub fn with_buttons(buttons: ButtonState) -> Self {
        Self {
            buttons,
            crank_delta: 0.0,
        }
    }

    /// A frame with only crank movement
    pub fn with_crank(delta: f32) -> Self {
        Self {
            buttons: ButtonState::default(),
            crank_delta: delta,
        }
    }
}
