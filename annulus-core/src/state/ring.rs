//! State of a single ring

use annulus_protocol::{LedIndex, Level, N_LEDS};

/// Every LED marked dirty
const ALL_LEDS: u64 = u64::MAX;

/// Selection, press and LED levels of one ring
///
/// Two kinds of dirty marks are kept: a per-LED bitset for the LED quads
/// and a ring flag for the key and outlines. A separate background flag
/// requests a clear of the whole ring area before anything else is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ring {
    selected: bool,
    pressed: bool,
    levels: [Level; N_LEDS],
    dirty_leds: u64,
    dirty: bool,
    background_dirty: bool,
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl Ring {
    /// A deselected ring with every LED off, fully invalidated
    pub const fn new() -> Self {
        Self {
            selected: false,
            pressed: false,
            levels: [Level::OFF; N_LEDS],
            dirty_leds: ALL_LEDS,
            dirty: true,
            background_dirty: true,
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn level(&self, led: LedIndex) -> Level {
        self.levels[led.index()]
    }

    pub fn levels(&self) -> &[Level; N_LEDS] {
        &self.levels
    }

    /// Set one LED, returns whether it changed
    pub fn set_level(&mut self, led: LedIndex, level: Level) -> bool {
        let slot = &mut self.levels[led.index()];
        if *slot == level {
            return false;
        }
        *slot = level;
        self.dirty_leds |= led.bit();
        true
    }

    /// Set all LEDs, returns the set of LEDs that changed
    pub fn set_levels(&mut self, levels: &[Level; N_LEDS]) -> u64 {
        let mut changed = 0;
        for led in LedIndex::all() {
            if self.set_level(led, levels[led.index()]) {
                changed |= led.bit();
            }
        }
        changed
    }

    /// Returns whether the selection changed
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.dirty = true;
        true
    }

    /// Returns whether the press state changed
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        if self.pressed == pressed {
            return false;
        }
        self.pressed = pressed;
        self.dirty = true;
        true
    }

    /// Request a full redraw of this ring
    pub fn invalidate(&mut self) {
        self.background_dirty = true;
        self.dirty = true;
        self.dirty_leds = ALL_LEDS;
    }

    /// Whether anything needs drawing
    pub fn needs_redraw(&self) -> bool {
        self.background_dirty || self.dirty || self.dirty_leds != 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_background_dirty(&self) -> bool {
        self.background_dirty
    }

    pub fn dirty_leds(&self) -> u64 {
        self.dirty_leds
    }

    pub fn is_led_dirty(&self, led: LedIndex) -> bool {
        self.dirty_leds & led.bit() != 0
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn clear_background_dirty(&mut self) {
        self.background_dirty = false;
    }

    pub fn clear_led_dirty(&mut self, led: LedIndex) {
        self.dirty_leds &= !led.bit();
    }
}
