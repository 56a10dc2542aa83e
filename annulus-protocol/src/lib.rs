//! Annulus Serial Line Protocol
//!
//! This crate defines the line-based protocol spoken between a host
//! application and the emulated ring surface. Every message is a single
//! ASCII line beginning with the `arc: ` prefix.
//!
//! # Protocol Overview
//!
//! Host → surface:
//! ```text
//! arc: map R LLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLLL
//! │        │ │
//! │        │ └─ 64 level characters, '0' + level ('0'..='?')
//! │        └─── ring digit
//! └──────────── prefix + command (9 bytes)
//!
//! arc: mod?
//! ```
//!
//! Surface → host:
//! ```text
//! arc: mod <0|1>
//! arc: enc <ring> <delta>
//! arc: key <ring> <0|1>
//! ```
//!
//! Parsing is positional. Digits are masked into range instead of being
//! rejected, so `arc: map 7 ...` addresses ring 3.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ids;
pub mod line;
pub mod messages;

pub use ids::{LedIndex, Level, RingId, N_LEDS, N_RINGS};
pub use line::{Line, LineBuffer, ProtocolError, MAX_LINE_LEN};
pub use messages::{ArcMessage, HostMessage, OutLine, PREFIX};
