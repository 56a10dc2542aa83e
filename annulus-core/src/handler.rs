//! Inbound protocol handling
//!
//! Parses host lines and applies them to the ring state. The handler is
//! stateless; answering a capability query is left to the caller.

use annulus_protocol::{HostMessage, ProtocolError, RingId};

use crate::state::RingStore;

/// Outcome of applying one host message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    /// LED map written; `changed` holds the LEDs whose level changed
    Leds { ring: RingId, changed: u64 },
    /// Host asked for the module state
    ModQuery,
    /// Unknown command, nothing done
    Ignored,
}

/// Apply a parsed message to the store
pub fn apply(message: &HostMessage, store: &mut RingStore) -> Applied {
    match message {
        HostMessage::LedMap { ring, levels } => {
            let changed = store.set_levels(*ring, levels);
            debug!("Map ring {}: {} LEDs changed", ring.get(), changed.count_ones());
            Applied::Leds {
                ring: *ring,
                changed,
            }
        }
        HostMessage::ModQuery => Applied::ModQuery,
        HostMessage::Unrecognized => Applied::Ignored,
    }
}

/// Parse one line and apply it
///
/// Malformed lines leave the store untouched.
pub fn handle_line(line: &[u8], store: &mut RingStore) -> Result<Applied, ProtocolError> {
    let message = HostMessage::parse(line).map_err(|e| {
        warn!("Rejected line ({} bytes): {}", line.len(), e);
        e
    })?;
    Ok(apply(&message, store))
}
