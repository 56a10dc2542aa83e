//! Incremental render pass
//!
//! Only what is marked dirty gets drawn. Marks are cleared right after the
//! corresponding draw call succeeds, so a failing canvas leaves the rest
//! of the work queued for the next tick.

use annulus_protocol::{LedIndex, Level, RingId};

use crate::geometry::{Geometry, RingGeometry};
use crate::pattern::PatternTable;
use crate::state::{Ring, RingStore};
use crate::traits::{Canvas, DisplayError, Fill};

/// Outline stroke width (pixels)
const OUTLINE_WIDTH: u32 = 1;

/// Draw everything that changed since the last pass
pub fn render<C: Canvas>(
    store: &mut RingStore,
    geometry: &Geometry,
    patterns: &PatternTable,
    select_level: Level,
    canvas: &mut C,
) -> Result<(), DisplayError> {
    for id in RingId::ALL {
        let ring = store.ring_mut(id);
        if !ring.needs_redraw() {
            continue;
        }
        trace!("Redrawing ring {}", id.get());
        render_ring(ring, geometry.ring(id), patterns, select_level, canvas)?;
    }
    Ok(())
}

fn render_ring<C: Canvas>(
    ring: &mut Ring,
    geometry: &RingGeometry,
    patterns: &PatternTable,
    select_level: Level,
    canvas: &mut C,
) -> Result<(), DisplayError> {
    if ring.is_background_dirty() {
        canvas.fill_ellipse(geometry.background(), Fill::White)?;
        ring.clear_background_dirty();
    }

    for led in LedIndex::in_set(ring.dirty_leds()) {
        let pattern = patterns.get(ring.level(led));
        canvas.fill_polygon(geometry.quad(led).points(), Fill::Pattern(pattern))?;
        ring.clear_led_dirty(led);
    }

    if ring.is_dirty() {
        let key = match (ring.selected(), ring.pressed()) {
            (false, _) => Fill::White,
            (true, false) => Fill::Pattern(patterns.get(select_level)),
            (true, true) => Fill::Black,
        };
        canvas.fill_ellipse(geometry.key(), key)?;
        canvas.draw_ellipse(geometry.inner_outline(), OUTLINE_WIDTH, Fill::Black)?;
        canvas.draw_ellipse(geometry.outer_outline(), OUTLINE_WIDTH, Fill::Black)?;
        ring.clear_dirty();
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::pattern::Pattern;
    use crate::traits::{Bounds, Point};

    /// Drawing call as seen by the canvas
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Polygon(Vec<Point>, Paint),
        FillEllipse(Bounds, Paint),
        DrawEllipse(Bounds, u32, Paint),
    }

    /// Owned form of [`Fill`]
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Paint {
        White,
        Black,
        Pattern(Pattern),
    }

    impl From<Fill<'_>> for Paint {
        fn from(fill: Fill<'_>) -> Self {
            match fill {
                Fill::White => Paint::White,
                Fill::Black => Paint::Black,
                Fill::Pattern(p) => Paint::Pattern(*p),
            }
        }
    }

    /// Records every call; optionally fails after a number of calls
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<Call>,
        pub fail_after: Option<usize>,
    }

    impl RecordingCanvas {
        fn record(&mut self, call: Call) -> Result<(), DisplayError> {
            if self.fail_after == Some(self.calls.len()) {
                return Err(DisplayError::Communication);
            }
            self.calls.push(call);
            Ok(())
        }

        pub fn polygons(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Polygon(..)))
                .count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn fill_polygon(&mut self, points: &[Point], fill: Fill<'_>) -> Result<(), DisplayError> {
            self.record(Call::Polygon(points.to_vec(), fill.into()))
        }

        fn fill_ellipse(&mut self, bounds: Bounds, fill: Fill<'_>) -> Result<(), DisplayError> {
            self.record(Call::FillEllipse(bounds, fill.into()))
        }

        fn draw_ellipse(
            &mut self,
            bounds: Bounds,
            line_width: u32,
            fill: Fill<'_>,
        ) -> Result<(), DisplayError> {
            self.record(Call::DrawEllipse(bounds, line_width, fill.into()))
        }
    }

    struct Scene {
        store: RingStore,
        geometry: Geometry,
        patterns: PatternTable,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                store: RingStore::new(),
                geometry: Geometry::new(&Layout::default()),
                patterns: PatternTable::new(),
            }
        }

        fn render(&mut self, canvas: &mut RecordingCanvas) -> Result<(), DisplayError> {
            render(
                &mut self.store,
                &self.geometry,
                &self.patterns,
                Level::masked(2),
                canvas,
            )
        }
    }

    fn id(i: u8) -> RingId {
        RingId::ALL[i as usize]
    }

    #[test]
    fn test_first_pass_draws_everything() {
        let mut scene = Scene::new();
        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();

        // Per ring: background, 64 LEDs, key, two outlines
        assert_eq!(canvas.calls.len(), 4 * (1 + 64 + 3));
        assert_eq!(canvas.polygons(), 4 * 64);
        assert!(!scene.store.needs_redraw());

        let ring0 = scene.geometry.ring(id(0));
        assert_eq!(canvas.calls[0], Call::FillEllipse(ring0.background(), Paint::White));
        assert_eq!(
            canvas.calls[1],
            Call::Polygon(
                ring0.quad(LedIndex::masked(0)).points().to_vec(),
                Paint::Pattern(Pattern::WHITE)
            )
        );
        // Ring 0 starts selected
        assert_eq!(
            canvas.calls[65],
            Call::FillEllipse(ring0.key(), Paint::Pattern(Pattern::for_level(Level::masked(2))))
        );
        assert_eq!(canvas.calls[66], Call::DrawEllipse(ring0.inner_outline(), 1, Paint::Black));
        assert_eq!(canvas.calls[67], Call::DrawEllipse(ring0.outer_outline(), 1, Paint::Black));
        // Ring 1 does not
        assert_eq!(
            canvas.calls[68 + 65],
            Call::FillEllipse(scene.geometry.ring(id(1)).key(), Paint::White)
        );
    }

    #[test]
    fn test_clean_pass_draws_nothing() {
        let mut scene = Scene::new();
        scene.render(&mut RecordingCanvas::default()).unwrap();

        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_only_changed_leds_are_drawn() {
        let mut scene = Scene::new();
        scene.render(&mut RecordingCanvas::default()).unwrap();

        scene.store.set_level(id(2), LedIndex::masked(10), Level::FULL);
        scene.store.set_level(id(2), LedIndex::masked(3), Level::masked(8));

        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();
        let ring2 = scene.geometry.ring(id(2));
        assert_eq!(
            canvas.calls,
            vec![
                Call::Polygon(
                    ring2.quad(LedIndex::masked(3)).points().to_vec(),
                    Paint::Pattern(Pattern::for_level(Level::masked(8)))
                ),
                Call::Polygon(
                    ring2.quad(LedIndex::masked(10)).points().to_vec(),
                    Paint::Pattern(Pattern::BLACK)
                ),
            ]
        );
    }

    #[test]
    fn test_pressed_key_is_black() {
        let mut scene = Scene::new();
        scene.render(&mut RecordingCanvas::default()).unwrap();

        scene.store.set_pressed(id(0), true);
        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();
        assert_eq!(canvas.calls.len(), 3);
        assert_eq!(
            canvas.calls[0],
            Call::FillEllipse(scene.geometry.ring(id(0)).key(), Paint::Black)
        );
    }

    #[test]
    fn test_pressed_but_deselected_key_is_white() {
        let mut scene = Scene::new();
        scene.store.set_pressed(id(1), true);
        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();
        assert_eq!(
            canvas.calls[68 + 65],
            Call::FillEllipse(scene.geometry.ring(id(1)).key(), Paint::White)
        );
    }

    #[test]
    fn test_failure_keeps_remaining_work() {
        let mut scene = Scene::new();
        let mut canvas = RecordingCanvas {
            fail_after: Some(10),
            ..Default::default()
        };
        assert_eq!(scene.render(&mut canvas), Err(DisplayError::Communication));

        // Background and the first nine LEDs of ring 0 went through
        let ring0 = scene.store.ring(id(0));
        assert!(!ring0.is_background_dirty());
        assert_eq!(ring0.dirty_leds(), u64::MAX << 9);
        assert!(ring0.is_dirty());

        let mut canvas = RecordingCanvas::default();
        scene.render(&mut canvas).unwrap();
        assert_eq!(canvas.calls.len(), 4 * 68 - 10);
        assert!(!scene.store.needs_redraw());
    }
}
