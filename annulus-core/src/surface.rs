//! The emulated surface
//!
//! [`Surface`] owns all state and is driven by the host's callbacks. The
//! host must call it sequentially; nothing here blocks.

use annulus_protocol::{ArcMessage, LineBuffer, Level, ProtocolError};

use crate::config::{ConfigError, Layout};
use crate::geometry::Geometry;
use crate::handler::{self, Applied};
use crate::input::{InputController, InputFrame};
use crate::pattern::PatternTable;
use crate::render::render;
use crate::state::RingStore;
use crate::traits::{Canvas, DisplayError, MessageSink};

/// Host lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemEvent {
    /// Application started
    Init,
    /// Application is exiting
    Terminate,
    /// Device locked
    Lock,
    /// Device unlocked
    Unlock,
}

/// Ring surface emulator
pub struct Surface {
    layout: Layout,
    geometry: Geometry,
    patterns: PatternTable,
    select_level: Level,
    store: RingStore,
    input: InputController,
    line_buffer: LineBuffer,
    active: bool,
    mod_query_pending: bool,
}

impl Surface {
    /// Validate the layout and precompute geometry and patterns
    pub fn new(layout: Layout) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self {
            geometry: Geometry::new(&layout),
            patterns: PatternTable::new(),
            select_level: layout.select_level(),
            layout,
            store: RingStore::new(),
            input: InputController::new(),
            line_buffer: LineBuffer::new(),
            active: false,
            mod_query_pending: false,
        })
    }

    /// React to a host lifecycle event
    pub fn handle_event<S: MessageSink>(&mut self, event: SystemEvent, sink: &mut S) {
        match event {
            SystemEvent::Init => {
                info!("Surface started");
                self.store.invalidate_all();
                self.set_active(true, sink);
            }
            SystemEvent::Unlock => {
                info!("Surface unlocked");
                self.set_active(true, sink);
            }
            SystemEvent::Lock => {
                info!("Surface locked");
                self.set_active(false, sink);
            }
            SystemEvent::Terminate => {
                info!("Surface terminating");
                self.set_active(false, sink);
            }
        }
    }

    fn set_active<S: MessageSink>(&mut self, active: bool, sink: &mut S) {
        self.active = active;
        if !active {
            self.mod_query_pending = false;
        }
        sink.send(ArcMessage::ModEnabled(active));
    }

    /// Handle one line received from the host
    ///
    /// LED maps are applied immediately and drawn on the next update. A
    /// capability query is answered on the next update while active.
    pub fn handle_line(&mut self, line: &[u8]) -> Result<Applied, ProtocolError> {
        let applied = handler::handle_line(line, &mut self.store)?;
        if applied == Applied::ModQuery {
            if self.active {
                self.mod_query_pending = true;
            } else {
                debug!("Ignoring mod query while inactive");
            }
        }
        Ok(applied)
    }

    /// Feed raw serial bytes
    ///
    /// Every line completed by `bytes` is handled in order, even after a
    /// bad one; the first error is returned. Partial lines are kept for
    /// the next call.
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        let mut first_error = None;
        for &byte in bytes {
            let result = match self.line_buffer.feed(byte) {
                Ok(Some(line)) => self.handle_line(&line).map(|_| ()),
                Ok(None) => Ok(()),
                Err(e) => {
                    warn!("Dropped overlong line");
                    Err(e)
                }
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Per-frame update
    ///
    /// Answers a pending query, processes input, then redraws what changed.
    pub fn update<C: Canvas, S: MessageSink>(
        &mut self,
        frame: &InputFrame,
        canvas: &mut C,
        sink: &mut S,
    ) -> Result<(), DisplayError> {
        if self.mod_query_pending {
            self.mod_query_pending = false;
            sink.send(ArcMessage::ModEnabled(true));
        }

        self.input.process(frame, &mut self.store, sink);

        render(
            &mut self.store,
            &self.geometry,
            &self.patterns,
            self.select_level,
            canvas,
        )
    }

    /// Force a full redraw on the next update
    pub fn invalidate(&mut self) {
        self.store.invalidate_all();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    pub fn rings(&self) -> &RingStore {
        &self.store
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }
}
