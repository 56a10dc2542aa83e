//! Host-agnostic core logic for the ring surface emulator
//!
//! This crate contains everything between the host's callbacks and its
//! rasterizer:
//!
//! - Dithered brightness patterns (ordered 8x8 Bayer matrix)
//! - Ring geometry (per-LED quadrilaterals, key and outline ellipses)
//! - Ring state with per-LED dirty tracking
//! - Input controller (selection, multi-select, key and encoder events)
//! - Protocol handler applying inbound lines to the ring state
//! - Render pass redrawing only what changed
//! - Layout configuration
//!
//! # Architecture
//!
//! The host owns a single [`Surface`] and drives it from its callbacks:
//! lifecycle notifications go to [`Surface::handle_event`], serial lines
//! to [`Surface::handle_line`] and the per-frame update to
//! [`Surface::update`]. Drawing goes through the [`traits::Canvas`] trait
//! and outbound messages through [`traits::MessageSink`], so the same core
//! runs against a real display, an `embedded-graphics` target or a test
//! recorder.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod geometry;
pub mod handler;
pub mod input;
pub mod pattern;
pub mod render;
pub mod state;
pub mod surface;
pub mod traits;

pub use config::{ConfigError, Layout};
pub use surface::{Surface, SystemEvent};
