//! Game state module - ties grid, factory, controller and resolver together
//!
//! All pacing is an explicit [`Phase`] with a remaining-time countdown. The
//! host calls [`GameState::tick`] every frame; leftover time carries across
//! phase boundaries, so with zero timings a whole cascade resolves in one tick.
//!
//! Swap lifecycle:
//!
//! ```text
//! SwapCue --exchange--> Swapping --detect--> Exploding --gravity--> Dropping
//!                          |                     ^                     |
//!                          | no match            +------ groups -------+
//!                          v                                           |
//!                      Reverting ------------------------> Idle <------+ stable
//! ```

use crate::config::EngineConfig;
use crate::controller::{Controller, InputState, Intent};
use crate::detect::{find_groups, MatchGroup};
use crate::factory::{fill_initial, repair_initial, PieceFactory};
use crate::gravity;
use crate::grid::Grid;
use crate::resolve::{resolve_pass, PassReport};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{board_hash, GameSnapshot, PhaseKind};
use crate::types::{BoardEvent, PointerEvent, Pos, MAX_CASCADE_PASSES};

/// Where the engine is in a swap/cascade, with the time left in that window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Swap cue is playing; the cells have not moved yet.
    SwapCue { a: Pos, b: Pos, remaining_ms: u32 },
    /// Cells exchanged; detection runs when the window ends.
    Swapping { a: Pos, b: Pos, remaining_ms: u32 },
    /// No match: cells are back in place, waiting out the invalid cue.
    Reverting { a: Pos, b: Pos, remaining_ms: u32 },
    Exploding { remaining_ms: u32 },
    Dropping { remaining_ms: u32 },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::SwapCue { .. } => PhaseKind::SwapCue,
            Phase::Swapping { .. } => PhaseKind::Swapping,
            Phase::Reverting { .. } => PhaseKind::Reverting,
            Phase::Exploding { .. } => PhaseKind::Exploding,
            Phase::Dropping { .. } => PhaseKind::Dropping,
        }
    }

    /// Time left in the current window; `None` when idle.
    pub fn remaining_ms(&self) -> Option<u32> {
        match *self {
            Phase::Idle => None,
            Phase::SwapCue { remaining_ms, .. }
            | Phase::Swapping { remaining_ms, .. }
            | Phase::Reverting { remaining_ms, .. }
            | Phase::Exploding { remaining_ms }
            | Phase::Dropping { remaining_ms } => Some(remaining_ms),
        }
    }

    fn set_remaining(&mut self, ms: u32) {
        match self {
            Phase::Idle => {}
            Phase::SwapCue { remaining_ms, .. }
            | Phase::Swapping { remaining_ms, .. }
            | Phase::Reverting { remaining_ms, .. }
            | Phase::Exploding { remaining_ms }
            | Phase::Dropping { remaining_ms } => *remaining_ms = ms,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    factory: PieceFactory<R>,
    controller: Controller,
    phase: Phase,
    /// Pending feedback, drained by the host once per frame.
    events: Vec<BoardEvent>,
    score: u32,
    moves: u32,
    /// Passes in the current cascade (kept after it settles).
    cascade: u32,
    last_pass: PassReport,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Repair rounds the initial board needed.
    repair_tries: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed and default settings.
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig::default().with_seed(seed))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Build a repaired initial board from `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let mut state = Self::from_grid(config, Grid::new(), rng);
        state.build_initial_board();
        state
    }

    /// Start from an existing grid as-is (no fill, no repair).
    pub fn from_grid(config: EngineConfig, grid: Grid, rng: R) -> Self {
        Self {
            config,
            grid,
            factory: PieceFactory::new(rng, config.special_chance),
            controller: Controller::new(),
            phase: Phase::Idle,
            events: Vec::with_capacity(256),
            score: 0,
            moves: 0,
            cascade: 0,
            last_pass: PassReport::default(),
            episode_id: 0,
            repair_tries: 0,
        }
    }

    fn build_initial_board(&mut self) {
        self.grid.clear();
        fill_initial(&mut self.grid, &mut self.factory);
        self.repair_tries = repair_initial(&mut self.grid, &mut self.factory, self.config.repair_tries);
    }

    /// Throw the board away and deal a new one from the continuing rng stream.
    ///
    /// Refused while busy: a resolution in flight always runs to `Settled`.
    /// Undrained events stay queued.
    pub fn restart(&mut self) -> bool {
        if self.busy() {
            return false;
        }
        self.build_initial_board();
        self.controller.settle();
        self.phase = Phase::Idle;
        self.score = 0;
        self.moves = 0;
        self.cascade = 0;
        self.last_pass = PassReport::default();
        self.episode_id = self.episode_id.wrapping_add(1);
        true
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input_state(&self) -> InputState {
        self.controller.state()
    }

    pub fn busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn cascade(&self) -> u32 {
        self.cascade
    }

    pub fn last_pass(&self) -> PassReport {
        self.last_pass
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn repair_tries(&self) -> u32 {
        self.repair_tries
    }

    pub fn free_swap(&self) -> bool {
        self.config.free_swap
    }

    pub fn set_free_swap(&mut self, free_swap: bool) {
        self.config.free_swap = free_swap;
    }

    pub fn rng(&self) -> &R {
        self.factory.rng()
    }

    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move pending events into `out`, keeping both buffers' capacity.
    pub fn drain_events_into(&mut self, out: &mut Vec<BoardEvent>) {
        out.extend(self.events.drain(..));
    }

    /// Feed a pointer event through the interaction controller.
    ///
    /// Returns true if the event did something (selection, hover or swap).
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        if self.busy() {
            return false;
        }
        match self.controller.handle(event, &self.grid) {
            Some(Intent::Select(at)) => {
                self.events.push(BoardEvent::Select { at });
                true
            }
            Some(Intent::Hover(at)) => {
                self.events.push(BoardEvent::Hover { at });
                true
            }
            Some(Intent::Swap(a, b)) => {
                if self.swap_allowed(a, b) {
                    self.begin_swap(a, b);
                    true
                } else {
                    self.controller.settle();
                    false
                }
            }
            None => false,
        }
    }

    /// Request a swap directly (bypassing pointer input).
    ///
    /// Rejected while busy, for non-adjacent cells and for empty cells.
    pub fn try_swap(&mut self, a: Pos, b: Pos) -> bool {
        if self.busy() || !self.swap_allowed(a, b) {
            return false;
        }
        self.controller.set_busy();
        self.begin_swap(a, b);
        true
    }

    fn swap_allowed(&self, a: Pos, b: Pos) -> bool {
        a.is_adjacent(b) && self.grid.is_occupied(a) && self.grid.is_occupied(b)
    }

    fn begin_swap(&mut self, a: Pos, b: Pos) {
        self.moves = self.moves.wrapping_add(1);
        self.cascade = 0;
        self.last_pass = PassReport::default();
        self.events.push(BoardEvent::SwapStart { a, b });
        self.phase = Phase::SwapCue {
            a,
            b,
            remaining_ms: self.config.timings.swap_cue_ms,
        };
    }

    /// Advance time. Returns true if the grid or phase changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut budget = elapsed_ms;
        let mut changed = false;

        while let Some(remaining) = self.phase.remaining_ms() {
            if remaining > budget {
                self.phase.set_remaining(remaining - budget);
                break;
            }
            budget -= remaining;
            self.advance();
            changed = true;
        }

        changed
    }

    /// The current window has elapsed: do its work and enter the next phase.
    fn advance(&mut self) {
        let timings = self.config.timings;
        match self.phase {
            Phase::Idle => {}

            Phase::SwapCue { a, b, .. } => {
                self.grid.swap(a, b);
                self.events.push(BoardEvent::Swapped { a, b });
                self.phase = Phase::Swapping {
                    a,
                    b,
                    remaining_ms: timings.swap_ms,
                };
            }

            Phase::Swapping { a, b, .. } => {
                let groups = find_groups(&self.grid);
                let involved = groups.iter().any(|g| g.contains(a) || g.contains(b));
                if involved {
                    self.run_pass(&groups);
                } else if self.config.free_swap {
                    self.finish();
                } else {
                    self.grid.swap(a, b);
                    self.events.push(BoardEvent::Swapped { a, b });
                    self.phase = Phase::Reverting {
                        a,
                        b,
                        remaining_ms: timings.invalid_swap_ms,
                    };
                }
            }

            Phase::Reverting { a, b, .. } => {
                self.events.push(BoardEvent::SwapInvalid { a, b });
                self.finish();
            }

            Phase::Exploding { .. } => {
                gravity::settle(&mut self.grid, &mut self.factory, &mut self.events);
                self.phase = Phase::Dropping {
                    remaining_ms: timings.drop_ms,
                };
            }

            Phase::Dropping { .. } => {
                let groups = find_groups(&self.grid);
                if !groups.is_empty() && self.cascade < MAX_CASCADE_PASSES {
                    self.run_pass(&groups);
                } else {
                    self.finish();
                }
            }
        }
    }

    fn run_pass(&mut self, groups: &[MatchGroup]) {
        let report = resolve_pass(&mut self.grid, groups, &mut self.events);
        self.score = self.score.saturating_add(report.score);
        self.cascade += 1;
        self.last_pass = report;
        self.phase = Phase::Exploding {
            remaining_ms: self
                .config
                .timings
                .explosion_ms
                .saturating_mul(report.explosion_units()),
        };
    }

    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.controller.settle();
        self.events.push(BoardEvent::Settled {
            passes: self.cascade,
        });
    }

    /// Copy the grid into `out` and refresh its hash.
    pub fn snapshot_board_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.cells);
        out.board_hash = board_hash(&out.cells);
    }

    /// Copy everything except the grid.
    pub fn snapshot_meta_into(&self, out: &mut GameSnapshot) {
        out.selected = self.controller.selected();
        out.drag_target = self.controller.drag_target();
        out.busy = self.busy();
        out.phase = self.phase.kind();
        out.phase_remaining_ms = self.phase.remaining_ms().unwrap_or(0);
        out.free_swap = self.config.free_swap;
        out.seed = self.config.seed;
        out.score = self.score;
        out.moves = self.moves;
        out.cascade = self.cascade;
        out.last_pass = self.last_pass;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.snapshot_board_into(out);
        self.snapshot_meta_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
