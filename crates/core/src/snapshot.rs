use crate::resolve::PassReport;
use crate::types::{Cell, Pos, COLS, ROWS};

/// Coarse phase tag for observers that do not need the countdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseKind {
    #[default]
    Idle,
    SwapCue,
    Swapping,
    Reverting,
    Exploding,
    Dropping,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::SwapCue => "swapCue",
            PhaseKind::Swapping => "swapping",
            PhaseKind::Reverting => "reverting",
            PhaseKind::Exploding => "exploding",
            PhaseKind::Dropping => "dropping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: [[Cell; COLS as usize]; ROWS as usize],
    /// FNV-1a 64 over the encoded cells, row-major.
    pub board_hash: u64,
    pub selected: Option<Pos>,
    pub drag_target: Option<Pos>,
    pub busy: bool,
    pub phase: PhaseKind,
    pub phase_remaining_ms: u32,
    pub free_swap: bool,
    pub seed: u32,
    pub score: u32,
    /// Swaps accepted by the engine (valid or not).
    pub moves: u32,
    /// Resolution passes in the current (or last) cascade.
    pub cascade: u32,
    pub last_pass: PassReport,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn playable(&self) -> bool {
        !self.busy
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let cells = [[None; COLS as usize]; ROWS as usize];
        Self {
            cells,
            board_hash: board_hash(&cells),
            selected: None,
            drag_target: None,
            busy: false,
            phase: PhaseKind::Idle,
            phase_remaining_ms: 0,
            free_swap: false,
            seed: 0,
            score: 0,
            moves: 0,
            cascade: 0,
            last_pass: PassReport::default(),
        }
    }
}

/// FNV-1a 64-bit over each cell's 3-byte encoding (empty = `[0, 0, 0]`).
pub fn board_hash(cells: &[[Cell; COLS as usize]; ROWS as usize]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for cell in cells.iter().flat_map(|row| row.iter()) {
        let bytes = cell.map(|p| p.encode()).unwrap_or([0; 3]);
        for b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
    }
    h
}
