//! Local input handling
//!
//! Turns the host's button and crank snapshot into ring selection changes
//! and outbound key/encoder messages.

pub mod buttons;
pub mod controller;

pub use buttons::{ButtonState, Buttons, InputFrame};
pub use controller::InputController;
