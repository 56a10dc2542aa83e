//! Configuration
//!
//! Screen layout of the rings. The topology (4 rings of 64 LEDs) is fixed
//! at compile time; only placement and sizing are configurable.

pub mod layout;

pub use layout::*;
