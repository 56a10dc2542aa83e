//! State of all rings

use annulus_protocol::{LedIndex, Level, RingId, N_LEDS, N_RINGS};

use super::ring::Ring;

/// The four rings, addressed by [`RingId`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingStore {
    rings: [Ring; N_RINGS],
}

impl Default for RingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RingStore {
    /// All rings invalidated, ring 0 selected
    pub fn new() -> Self {
        let mut rings = [Ring::new(), Ring::new(), Ring::new(), Ring::new()];
        rings[0].set_selected(true);
        Self { rings }
    }

    pub fn ring(&self, id: RingId) -> &Ring {
        &self.rings[id.index()]
    }

    pub fn ring_mut(&mut self, id: RingId) -> &mut Ring {
        &mut self.rings[id.index()]
    }

    /// Iterate over rings with their ids
    pub fn iter(&self) -> impl Iterator<Item = (RingId, &Ring)> {
        RingId::ALL.into_iter().zip(self.rings.iter())
    }

    pub fn set_level(&mut self, id: RingId, led: LedIndex, level: Level) -> bool {
        self.ring_mut(id).set_level(led, level)
    }

    /// Returns the set of LEDs that changed
    pub fn set_levels(&mut self, id: RingId, levels: &[Level; N_LEDS]) -> u64 {
        self.ring_mut(id).set_levels(levels)
    }

    pub fn set_selected(&mut self, id: RingId, selected: bool) -> bool {
        self.ring_mut(id).set_selected(selected)
    }

    pub fn set_pressed(&mut self, id: RingId, pressed: bool) -> bool {
        self.ring_mut(id).set_pressed(pressed)
    }

    pub fn is_selected(&self, id: RingId) -> bool {
        self.ring(id).selected()
    }

    pub fn is_pressed(&self, id: RingId) -> bool {
        self.ring(id).pressed()
    }

    pub fn invalidate(&mut self, id: RingId) {
        self.ring_mut(id).invalidate();
    }

    /// Request a full redraw of every ring
    pub fn invalidate_all(&mut self) {
        for ring in self.rings.iter_mut() {
            ring.invalidate();
        }
    }

    /// Whether any ring needs drawing
    pub fn needs_redraw(&self) -> bool {
        self.rings.iter().any(Ring::needs_redraw)
    }

    /// Rings currently selected, in index order
    pub fn selected(&self) -> impl Iterator<Item = RingId> + '_ {
        self.iter()
            .filter(|(_, ring)| ring.selected())
            .map(|(id, _)| id)
    }
}
