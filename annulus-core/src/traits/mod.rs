//! Host service traits
//!
//! These traits define the interface between the surface logic and the
//! services the host provides: a rasterizer and an outbound message channel.

pub mod canvas;
pub mod sink;

pub use canvas::{Bounds, Canvas, DisplayError, Fill, Point};
pub use sink::{LineSink, MessageSink};
