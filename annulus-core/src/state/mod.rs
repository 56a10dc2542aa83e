//! Ring state with change tracking
//!
//! Every mutation reports whether it changed anything and marks exactly
//! what needs redrawing. The render pass consumes and clears the marks.

pub mod ring;
pub mod store;

pub use ring::Ring;
pub use store::RingStore;
