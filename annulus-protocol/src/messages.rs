//! Message types for the Annulus line protocol
//!
//! Message types are divided into two categories:
//! - Host → surface: LED map updates, module capability query
//! - Surface → host: module state, encoder deltas, key presses

use core::fmt::{self, Write};

use heapless::String;

use crate::ids::{Level, RingId, N_LEDS};
use crate::line::{ProtocolError, MAX_LINE_LEN};

/// Prefix shared by every line in both directions
pub const PREFIX: &str = "arc: ";

const MAP_COMMAND: &[u8] = b"arc: map ";
const MOD_QUERY: &[u8] = b"arc: mod?";

/// Byte offset of the ring digit in a `map` line
pub const MAP_RING_OFFSET: usize = MAP_COMMAND.len();

/// Byte offset of the first level character in a `map` line
pub const MAP_LEVELS_OFFSET: usize = MAP_RING_OFFSET + 2;

/// Minimum length of a complete `map` line
pub const MAP_LINE_LEN: usize = MAP_LEVELS_OFFSET + N_LEDS;

/// Capacity of one formatted outbound line
pub const MAX_OUT_LEN: usize = 48;

/// A formatted outbound line, without terminator
pub type OutLine = String<MAX_OUT_LEN>;

/// Messages from the host to the surface
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Replace all 64 LED levels of one ring
    LedMap {
        ring: RingId,
        levels: [Level; N_LEDS],
    },
    /// Ask whether the module is enabled
    ModQuery,
    /// Any other line; ignored
    Unrecognized,
}

impl HostMessage {
    /// Parse a message from one line
    ///
    /// Trailing `\r`/`\n` bytes are ignored. Lines that match no command
    /// become [`HostMessage::Unrecognized`]; a `map` line too short to hold
    /// all 64 levels is rejected with [`ProtocolError::Truncated`].
    pub fn parse(line: &[u8]) -> Result<Self, ProtocolError> {
        let line = trim_line_end(line);

        if line.starts_with(MAP_COMMAND) {
            return parse_map(line);
        }
        if line.starts_with(MOD_QUERY) {
            return Ok(HostMessage::ModQuery);
        }
        Ok(HostMessage::Unrecognized)
    }

    /// Write this message as a protocol line (for testing or simulation)
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            HostMessage::LedMap { ring, levels } => {
                write!(out, "{}map {} ", PREFIX, ring)?;
                for level in levels {
                    out.write_char(char::from(b'0' + level.get()))?;
                }
                Ok(())
            }
            HostMessage::ModQuery => write!(out, "{}mod?", PREFIX),
            HostMessage::Unrecognized => Err(fmt::Error),
        }
    }

    /// Format this message into a line buffer
    pub fn to_line(&self) -> Result<String<MAX_LINE_LEN>, fmt::Error> {
        let mut line = String::new();
        self.write_to(&mut line)?;
        Ok(line)
    }
}

fn trim_line_end(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\r' | b'\n'] = line {
        line = rest;
    }
    line
}

/// Protocol digits are offsets from '0', wrapped and masked by the caller
fn digit(byte: u8) -> u8 {
    byte.wrapping_sub(b'0')
}

fn parse_map(line: &[u8]) -> Result<HostMessage, ProtocolError> {
    if line.len() < MAP_LINE_LEN {
        return Err(ProtocolError::Truncated);
    }

    let ring = RingId::masked(digit(line[MAP_RING_OFFSET]));
    let mut levels = [Level::OFF; N_LEDS];
    for (level, &byte) in levels
        .iter_mut()
        .zip(&line[MAP_LEVELS_OFFSET..MAP_LINE_LEN])
    {
        *level = Level::masked(digit(byte));
    }

    Ok(HostMessage::LedMap { ring, levels })
}

/// Messages from the surface to the host
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArcMessage {
    /// Module enabled (1) or disabled (0)
    ModEnabled(bool),
    /// Crank turned while the ring was selected
    EncDelta { ring: RingId, delta: f32 },
    /// Ring key pressed (1) or released (0)
    Key { ring: RingId, pressed: bool },
}

impl ArcMessage {
    /// Write this message as a protocol line, without terminator
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            ArcMessage::ModEnabled(enabled) => {
                write!(out, "{}mod {}", PREFIX, u8::from(*enabled))
            }
            ArcMessage::EncDelta { ring, delta } => {
                write!(out, "{}enc {} {:.6}", PREFIX, ring, delta)
            }
            ArcMessage::Key { ring, pressed } => {
                write!(out, "{}key {} {}", PREFIX, ring, u8::from(*pressed))
            }
        }
    }

    /// Format this message into a line buffer
    pub fn to_line(&self) -> Result<OutLine, fmt::Error> {
        let mut line = OutLine::new();
        self.write_to(&mut line)?;
        Ok(line)
    }
}
