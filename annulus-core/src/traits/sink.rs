//! Outbound message channel

use core::fmt::Write;

use annulus_protocol::ArcMessage;

/// Receiver for messages the surface sends back to the host
///
/// On the device this is the console/serial logger; in tests it is usually
/// a plain vector.
pub trait MessageSink {
    /// Deliver one message
    fn send(&mut self, message: ArcMessage);
}

/// Collects messages into a fixed-capacity vector, dropping overflow
impl<const N: usize> MessageSink for heapless::Vec<ArcMessage, N> {
    fn send(&mut self, message: ArcMessage) {
        if self.push(message).is_err() {
            warn!("Outbound queue full, dropping message");
        }
    }
}

/// Writes each message as a newline-terminated protocol line
///
/// Wraps any `core::fmt::Write` target, e.g. a UART writer or a console
/// buffer.
#[derive(Debug, Default)]
pub struct LineSink<W> {
    out: W,
}

impl<W: Write> LineSink<W> {
    /// Create a sink writing into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Access the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MessageSink for LineSink<W> {
    fn send(&mut self, message: ArcMessage) {
        let written = message
            .write_to(&mut self.out)
            .and_then(|()| self.out.write_char('\n'));
        if written.is_err() {
            warn!("Failed to write outbound line");
        }
    }
}
