//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to a crossterm backend.
//!
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: diffing terminal writer (alternate screen, mouse capture)
//! - [`effects`]: presentation state fed by board events (flashes, shake)
//! - [`board_view`]: snapshot + effects into a framebuffer, plus the layout
//!   the host uses to map mouse input

pub mod board_view;
pub mod effects;
pub mod fb;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use board_view::{BoardView, Viewport, PANEL_W};
pub use effects::{CellFlash, EffectLayer, FlashKind, MatchInfo};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
