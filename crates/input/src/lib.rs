//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` mouse
//! events onto grid cells through a [`BoardLayout`](crate::types::BoardLayout)
//! and key events onto host commands. The rules engine only ever sees
//! [`PointerEvent`](crate::types::PointerEvent)s.

pub mod map;
pub mod pointer;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit, HostCommand};
pub use pointer::PointerMapper;
