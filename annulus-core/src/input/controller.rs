//! Ring selection and key/encoder event generation
//!
//! Directional buttons pick a ring (left, up, down, right map to rings 0-3),
//! A acts as the ring key, B held enables multi-select and the crank turns
//! every selected ring.

use annulus_protocol::{ArcMessage, RingId};

use super::buttons::{Buttons, InputFrame};
use crate::state::RingStore;
use crate::traits::MessageSink;

/// Selection mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputController {
    multi_select: bool,
    last_select: RingId,
}

impl InputController {
    /// Multi-select off, ring 0 last selected
    pub const fn new() -> Self {
        Self {
            multi_select: false,
            last_select: RingId::ALL[0],
        }
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn last_select(&self) -> RingId {
        self.last_select
    }

    /// Process one tick of input
    pub fn process<S: MessageSink>(
        &mut self,
        frame: &InputFrame,
        store: &mut RingStore,
        sink: &mut S,
    ) {
        let buttons = &frame.buttons;
        let a_held = buttons.pushed.contains(Buttons::A) || buttons.current.contains(Buttons::A);

        // At most one direction per tick
        if let Some(ring) = Buttons::DIRECTIONS
            .iter()
            .position(|&dir| buttons.pushed.contains(dir))
        {
            self.select_ring(RingId::ALL[ring], a_held, store, sink);
        }

        if buttons.pushed.contains(Buttons::A) {
            for id in RingId::ALL {
                if store.is_selected(id) && store.set_pressed(id, true) {
                    send_key(sink, id, true);
                }
            }
        } else if buttons.released.contains(Buttons::A) {
            for id in RingId::ALL {
                if store.is_selected(id) && store.set_pressed(id, false) {
                    send_key(sink, id, false);
                }
            }
        }

        if buttons.pushed.contains(Buttons::B) {
            self.multi_select = true;
            debug!("Multi-select on, keeping ring {}", self.last_select.get());
            // Pressed state of the deselected rings is left as is
            for id in RingId::ALL {
                if id != self.last_select {
                    store.set_selected(id, false);
                }
            }
        } else if buttons.released.contains(Buttons::B) {
            self.multi_select = false;
            debug!("Multi-select off");
        }

        if frame.crank_delta != 0.0 {
            for id in RingId::ALL {
                if store.is_selected(id) {
                    sink.send(ArcMessage::EncDelta {
                        ring: id,
                        delta: frame.crank_delta,
                    });
                }
            }
        }
    }

    /// Select `target`, deselecting the others unless multi-select is on
    ///
    /// With `a_held` a newly selected ring is pressed as well. Rings that
    /// lose their selection while pressed are released.
    pub fn select_ring<S: MessageSink>(
        &mut self,
        target: RingId,
        a_held: bool,
        store: &mut RingStore,
        sink: &mut S,
    ) {
        for id in RingId::ALL {
            if id == target {
                if store.set_selected(id, true) && a_held && store.set_pressed(id, true) {
                    send_key(sink, id, true);
                }
            } else if !self.multi_select
                && store.set_selected(id, false)
                && store.set_pressed(id, false)
            {
                send_key(sink, id, false);
            }
        }
        self.last_select = target;
        debug!("Selected ring {}", target.get());
    }
}

fn send_key<S: MessageSink>(sink: &mut S, ring: RingId, pressed: bool) {
    debug!("Key {} {}", ring.get(), pressed);
    sink.send(ArcMessage::Key { ring, pressed });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonState;

    fn id(i: u8) -> RingId {
        RingId::ALL[i as usize]
    }

    fn push(buttons: Buttons, held: Buttons) -> InputFrame {
        InputFrame::with_buttons(ButtonState {
            current: buttons | held,
            pushed: buttons,
            released: Buttons::NONE,
        })
    }

    fn release(buttons: Buttons, held: Buttons) -> InputFrame {
        InputFrame::with_buttons(ButtonState {
            current: held,
            pushed: Buttons::NONE,
            released: buttons,
        })
    }

    struct Fixture {
        controller: InputController,
        store: RingStore,
        sent: Vec<ArcMessage>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                controller: InputController::new(),
                store: RingStore::new(),
                sent: Vec::new(),
            }
        }

        fn tick(&mut self, frame: InputFrame) -> Vec<ArcMessage> {
            let mut sink = RecordingSink::default();
            self.controller.process(&frame, &mut self.store, &mut sink);
            self.sent.extend(sink.0.iter().copied());
            sink.0
        }

        fn selected(&self) -> Vec<RingId> {
            self.store.selected().collect()
        }
    }

    #[derive(Default)]
    struct RecordingSink(Vec<ArcMessage>);

    impl MessageSink for RecordingSink {
        fn send(&mut self, message: ArcMessage) {
            self.0.push(message);
        }
    }

    fn key(ring: u8, pressed: bool) -> ArcMessage {
        ArcMessage::Key {
            ring: id(ring),
            pressed,
        }
    }

    #[test]
    fn test_direction_selects_ring() {
        let mut f = Fixture::new();
        assert!(f.tick(push(Buttons::UP, Buttons::NONE)).is_empty());
        assert_eq!(f.selected(), vec![id(1)]);
        assert_eq!(f.controller.last_select(), id(1));
    }

    #[test]
    fn test_direction_priority() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::RIGHT | Buttons::DOWN | Buttons::UP, Buttons::NONE));
        assert_eq!(f.selected(), vec![id(1)]);

        f.tick(push(Buttons::RIGHT | Buttons::LEFT, Buttons::NONE));
        assert_eq!(f.selected(), vec![id(0)]);
    }

    #[test]
    fn test_right_then_a() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::RIGHT, Buttons::NONE));
        assert_eq!(f.selected(), vec![id(3)]);
        assert!(!f.store.is_selected(id(0)));

        let sent = f.tick(push(Buttons::A, Buttons::NONE));
        assert_eq!(sent, vec![key(3, true)]);
        assert!(f.store.is_pressed(id(3)));
    }

    #[test]
    fn test_a_held_while_moving_transfers_press() {
        let mut f = Fixture::new();
        assert_eq!(f.tick(push(Buttons::A, Buttons::NONE)), vec![key(0, true)]);

        // Moving with A still down releases the old ring and presses the new
        let sent = f.tick(push(Buttons::RIGHT, Buttons::A));
        assert_eq!(sent, vec![key(0, false), key(3, true)]);
        assert!(!f.store.is_pressed(id(0)));
        assert!(f.store.is_pressed(id(3)));

        let sent = f.tick(release(Buttons::A, Buttons::NONE));
        assert_eq!(sent, vec![key(3, false)]);
    }

    #[test]
    fn test_direction_and_a_same_tick() {
        let mut f = Fixture::new();
        let sent = f.tick(push(Buttons::DOWN | Buttons::A, Buttons::NONE));
        // Selection presses ring 2; the A edge finds it already pressed
        assert_eq!(sent, vec![key(2, true)]);
        assert_eq!(f.selected(), vec![id(2)]);
    }

    #[test]
    fn test_reselect_does_not_press() {
        let mut f = Fixture::new();
        // Ring 0 already selected, so holding A does not press it again
        let sent = f.tick(push(Buttons::LEFT, Buttons::A));
        assert!(sent.is_empty());
        assert!(!f.store.is_pressed(id(0)));
    }

    #[test]
    fn test_b_held_then_up_adds_ring() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::B, Buttons::NONE));
        assert!(f.controller.multi_select());

        let sent = f.tick(push(Buttons::UP, Buttons::B));
        assert!(sent.is_empty());
        assert_eq!(f.selected(), vec![id(0), id(1)]);
        assert_eq!(f.controller.last_select(), id(1));
    }

    #[test]
    fn test_b_release_keeps_selection() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::B, Buttons::NONE));
        f.tick(push(Buttons::DOWN, Buttons::B));
        f.tick(release(Buttons::B, Buttons::NONE));
        assert!(!f.controller.multi_select());
        assert_eq!(f.selected(), vec![id(0), id(2)]);

        // Next direction collapses back to a single ring
        f.tick(push(Buttons::RIGHT, Buttons::NONE));
        assert_eq!(f.selected(), vec![id(3)]);
    }

    #[test]
    fn test_b_push_keeps_only_last_selected() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::B, Buttons::NONE));
        f.tick(push(Buttons::UP, Buttons::B));
        f.tick(push(Buttons::DOWN, Buttons::B));
        f.tick(push(Buttons::A, Buttons::B));
        f.tick(release(Buttons::B, Buttons::A));
        assert_eq!(f.selected(), vec![id(0), id(1), id(2)]);

        // Pushing B again trims the selection but leaves press state alone
        let sent = f.tick(push(Buttons::B, Buttons::A));
        assert!(sent.is_empty());
        assert_eq!(f.selected(), vec![id(2)]);
        assert!(f.store.is_pressed(id(0)));
        assert!(f.store.is_pressed(id(1)));
    }

    #[test]
    fn test_crank_sends_to_every_selected_ring() {
        let mut f = Fixture::new();
        f.tick(push(Buttons::B, Buttons::NONE));
        f.tick(push(Buttons::RIGHT, Buttons::B));

        let sent = f.tick(InputFrame::with_crank(-2.5));
        assert_eq!(
            sent,
            vec![
                ArcMessage::EncDelta {
                    ring: id(0),
                    delta: -2.5
                },
                ArcMessage::EncDelta {
                    ring: id(3),
                    delta: -2.5
                },
            ]
        );
    }

    #[test]
    fn test_idle_tick_sends_nothing() {
        let mut f = Fixture::new();
        assert!(f.tick(InputFrame::default()).is_empty());
        assert!(f.sent.is_empty());
    }
}
