//! Terminal input module (viewer-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::BoardAction`] values for the board viewer. Cursor keys and
//! rotations are one-shot, so there is no repeat handling here.

pub mod map;

pub use tetrogue_types as types;

pub use map::{handle_key_event, should_quit};
