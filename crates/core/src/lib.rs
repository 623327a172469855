//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every match-3 rule and the pacing state machine. It has
//! **no dependencies** on terminal, input devices or I/O:
//!
//! - **Deterministic**: all randomness goes through an injected [`RandomSource`]
//! - **Testable**: scripted random sources and ASCII grids make outcomes exact
//! - **Portable**: the host only feeds pointer events and elapsed time
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 cell store with an ASCII format for fixtures
//! - [`detect`]: connected same-color groups of three or more
//! - [`resolve`]: scoring, destroy policy, line/area clears, fixed-piece damage
//! - [`gravity`]: stable column compaction and top-down refill
//! - [`factory`]: spawn policy, anti-match color picks, initial board repair
//! - [`controller`]: pointer state machine (select, drag, busy)
//! - [`engine`]: [`GameState`] and its [`Phase`] machine
//! - [`feedback`]: host hooks and the event dispatcher
//! - [`rng`]: seeded LCG and a fixed-sequence source for tests
//!
//! # Game Rules
//!
//! - A swap of two adjacent pieces is kept only if a resulting group contains
//!   one of the swapped cells (unless free-swap is enabled).
//! - A group scores `size * 10 * product(multiplier values)`; 40+ is a big match.
//! - Row, col and nova pieces in a group clear their row, column or 3x3 area.
//! - Armored pieces take three hits; fixed pieces only wear down from
//!   matches next to them; inert pieces are never destroyed.
//! - After each pass pieces fall, empty cells refill, and detection repeats
//!   until the board is stable (at most 64 passes).
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{EngineConfig, GameState, Timings};
//! use tui_match3_core::types::Pos;
//!
//! let config = EngineConfig::default()
//!     .with_seed(12345)
//!     .with_timings(Timings::INSTANT);
//! let mut game = GameState::with_config(config);
//!
//! // Whether or not it matches, the swap settles within one tick.
//! assert!(game.try_swap(Pos::new(3, 3), Pos::new(3, 4)));
//! game.tick(0);
//! assert!(!game.busy());
//! ```
//!
//! # Timing
//!
//! The engine uses a fixed timestep system:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Swap**: 60ms cue, then 90ms before detection
//! - **Invalid swap**: 110ms after the pieces swap back
//! - **Explosion**: 300ms per group and per line/area effect
//! - **Drop**: 210ms after gravity and refill
//!
//! Call [`GameState::tick`](engine::GameState::tick) every frame with elapsed time.

pub mod config;
pub mod controller;
pub mod detect;
pub mod engine;
pub mod factory;
pub mod feedback;
pub mod gravity;
pub mod grid;
pub mod resolve;
pub mod rng;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use config::{EngineConfig, Timings};
pub use controller::{Controller, InputState, Intent};
pub use detect::{find_groups, has_groups, MatchGroup};
pub use engine::{GameState, Phase};
pub use factory::PieceFactory;
pub use feedback::{dispatch, dispatch_all, CameraShake, FeedbackSink, NullHost, RenderDelegate, ScoreSink};
pub use grid::Grid;
pub use resolve::{destroy_at, group_score, resolve_pass, PassReport};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use snapshot::{board_hash, GameSnapshot, PhaseKind};
