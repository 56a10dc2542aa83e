//! Rasterizer adapter for the ring surface
//!
//! This crate provides:
//! - `GraphicsCanvas`, an implementation of the core `Canvas` trait on top
//!   of any `embedded-graphics` draw target with `BinaryColor` pixels
//! - `FrameBuffer`, a 1-bit 400x240 framebuffer in the host's memory
//!   layout, for hosts without one of their own and for tests
//!
//! # Color convention
//!
//! `BinaryColor::On` is black ink and `BinaryColor::Off` white paper. In
//! the framebuffer a set bit is white, so drawing `On` clears bits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod framebuffer;

pub use canvas::GraphicsCanvas;
pub use framebuffer::{FrameBuffer, HEIGHT, ROW_STRIDE, WIDTH};
