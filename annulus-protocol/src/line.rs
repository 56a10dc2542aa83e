//! Line assembly for raw serial input
//!
//! Hosts that hand over complete lines can skip this module. Hosts that
//! deliver raw bytes feed them through a [`LineBuffer`], which splits on
//! `\n`, drops `\r` and discards lines that do not fit the buffer.

use core::slice;

use heapless::Vec;

/// Longest line the buffer will assemble
pub const MAX_LINE_LEN: usize = 128;

/// One assembled line, without its terminator
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Errors that can occur while assembling or parsing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// A recognized command was shorter than its fixed layout
    Truncated,
    /// A line exceeded the assembly buffer and was dropped
    LineTooLong,
}

/// State machine assembling serial bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Line,
    /// Set once the current line has overflowed; cleared at the next newline
    overflowed: bool,
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partially assembled line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a newline completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err(LineTooLong)` when the
    /// completed line did not fit and was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, ProtocolError> {
        match byte {
            b'\n' => {
                if self.overflowed {
                    self.reset();
                    return Err(ProtocolError::LineTooLong);
                }
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let line = self.buffer.clone();
                self.buffer.clear();
                Ok(Some(line))
            }
            b'\r' => Ok(None),
            _ => {
                if !self.overflowed && self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
        }
    }

    /// Feed a chunk of bytes, yielding every line it completes
    pub fn lines<'a>(&'a mut self, bytes: &'a [u8]) -> Lines<'a> {
        Lines {
            buffer: self,
            bytes: bytes.iter(),
        }
    }

    /// Number of bytes of the line currently being assembled
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Iterator over the lines completed by one chunk of input
pub struct Lines<'a> {
    buffer: &'a mut LineBuffer,
    bytes: slice::Iter<'a, u8>,
}

impl Iterator for Lines<'_> {
    type Item = Result<Line, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.buffer.feed(byte) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
