//! Terminal board renderer.
//!
//! A small, game-oriented rendering layer for viewing a dungeon board in a
//! terminal. It avoids widget/layout frameworks and instead renders into a
//! framebuffer of styled cells that is flushed to the terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of terminal concerns
//! - Consume frames through the core's `Paint` contract like any other renderer
//! - Allow precise control over aspect ratio (2 columns per tile)

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tetrogue_core as core;
pub use tetrogue_types as types;

pub use board_view::{glyph, BoardView, ViewGeometry, ViewStatus, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
