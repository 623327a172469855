//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal rendering, event journal).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 8x8 grid:
//!
//! - **Rows**: 8 (indexed 0-7, row 0 is the top)
//! - **Cols**: 8 (indexed 0-7, col 0 is the left edge)
//!
//! # Pacing Constants
//!
//! Timing values are in milliseconds. They are the fixed windows the engine
//! waits so visual/audio feedback can play out before the next grid mutation:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SWAP_CUE_MS` | 60 | Swap cue lead-in before positions exchange |
//! | `SWAP_MS` | 90 | Swap animation before match detection |
//! | `INVALID_SWAP_MS` | 110 | Revert window after a swap with no match |
//! | `EXPLOSION_MS` | 300 | Per group / per line or area effect |
//! | `DROP_MS` | 210 | Gravity and refill animation |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Color, Piece, Pos, SpecialKind, COLS, ROWS};
//!
//! let red = Piece::normal(Color::Red);
//! assert_eq!(red.match_key(), Some(Color::Red));
//!
//! // Fixed obstacles never match, even when given a color.
//! let fixed = Piece::special(SpecialKind::Fixed, Some(Color::Red));
//! assert_eq!(fixed.match_key(), None);
//! assert_eq!(fixed.hp(), Some(2));
//!
//! assert!(Pos::new(3, 3).is_adjacent(Pos::new(3, 4)));
//! assert!(!Pos::new(3, 3).is_adjacent(Pos::new(4, 4)));
//!
//! assert_eq!((ROWS, COLS), (8, 8));
//! ```

/// Board height in cells (8 rows)
pub const ROWS: u8 = 8;

/// Board width in cells (8 columns)
pub const COLS: u8 = 8;

/// Total number of cells on the board
pub const CELL_COUNT: usize = (ROWS as usize) * (COLS as usize);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap cue lead-in. Positions exchange only after this window.
pub const SWAP_CUE_MS: u32 = 60;

/// Swap animation window before the post-swap match scan.
pub const SWAP_MS: u32 = 90;

/// Window after an invalid swap is reverted.
pub const INVALID_SWAP_MS: u32 = 110;

/// Explosion window, paid once per group and once per line/area effect.
pub const EXPLOSION_MS: u32 = 300;

/// Drop-and-refill window.
pub const DROP_MS: u32 = 210;

/// Minimum connected size that counts as a match.
pub const MIN_GROUP_SIZE: usize = 3;

/// Points per matched piece before multipliers.
pub const POINTS_PER_PIECE: u32 = 10;

/// Group score at which a match counts as "big".
pub const BIG_MATCH_SCORE: u32 = 40;

/// Chance (percent) that a refill spawn is a special piece.
pub const SPECIAL_CHANCE_PERCENT: u32 = 8;

/// Starting hit points of an armored piece.
pub const ARMORED_HP: u8 = 3;

/// Starting hit points of a fixed piece.
pub const FIXED_HP: u8 = 2;

/// Default score factor of a multiplier piece.
pub const MULTIPLIER_VALUE: u8 = 2;

/// Bounded retry count for the initial anti-match repair loop.
pub const INITIAL_REPAIR_TRIES: u32 = 24;

/// Upper bound on resolution passes in one cascade.
pub const MAX_CASCADE_PASSES: u32 = (ROWS as u32) * (COLS as u32);

/// Camera shake for a regular destruction.
pub const SHAKE_INTENSITY: u8 = 4;
pub const SHAKE_MS: u32 = 60;

/// Camera shake for a big destruction (big match, line or area clear).
pub const SHAKE_INTENSITY_BIG: u8 = 8;
pub const SHAKE_MS_BIG: u32 = 100;

/// The ten piece colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Cyan,
    Orange,
    White,
    Magenta,
    Silver,
}

impl Color {
    pub const ALL: [Color; 10] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
        Color::Orange,
        Color::White,
        Color::Magenta,
        Color::Silver,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// ```
    /// use tui_match3_types::Color;
    ///
    /// assert_eq!(Color::from_str("Magenta"), Some(Color::Magenta));
    /// assert_eq!(Color::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
            Color::Orange => "orange",
            Color::White => "white",
            Color::Magenta => "magenta",
            Color::Silver => "silver",
        }
    }

    /// Stable index into [`Color::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single-letter code used by the ASCII grid format.
    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::Cyan => 'C',
            Color::Orange => 'O',
            Color::White => 'W',
            Color::Magenta => 'M',
            Color::Silver => 'S',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.letter() == ch)
    }
}

/// Special piece kinds.
///
/// - **Row** / **Col**: clear the whole row / column when matched
/// - **Nova**: clears the 3x3 neighborhood when matched
/// - **Armored**: survives hits until its hp runs out
/// - **Fixed**: never matches; only adjacency damage wears it down
/// - **Inert**: never matches and is never destroyed
/// - **Multiplier**: multiplies the score of its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    Row,
    Col,
    Nova,
    Armored,
    Fixed,
    Inert,
    Multiplier,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 7] = [
        SpecialKind::Row,
        SpecialKind::Col,
        SpecialKind::Nova,
        SpecialKind::Armored,
        SpecialKind::Fixed,
        SpecialKind::Inert,
        SpecialKind::Multiplier,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "row" => Some(SpecialKind::Row),
            "col" => Some(SpecialKind::Col),
            "nova" => Some(SpecialKind::Nova),
            "armored" => Some(SpecialKind::Armored),
            "fixed" => Some(SpecialKind::Fixed),
            "inert" => Some(SpecialKind::Inert),
            "multiplier" => Some(SpecialKind::Multiplier),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::Row => "row",
            SpecialKind::Col => "col",
            SpecialKind::Nova => "nova",
            SpecialKind::Armored => "armored",
            SpecialKind::Fixed => "fixed",
            SpecialKind::Inert => "inert",
            SpecialKind::Multiplier => "multiplier",
        }
    }

    /// Whether pieces of this kind carry a color at all.
    pub fn is_colored(&self) -> bool {
        !matches!(self, SpecialKind::Fixed | SpecialKind::Inert)
    }
}

/// Payload of a special piece.
///
/// `hp` is only present for armored and fixed pieces, `value` only for
/// multipliers. `kill` is set when adjacency damage has worn a fixed piece
/// down and it must be destroyed despite its immunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Special {
    pub kind: SpecialKind,
    pub color: Option<Color>,
    pub hp: Option<u8>,
    pub value: Option<u8>,
    pub kill: bool,
}

impl Special {
    /// Build a special piece with the default fields of its kind.
    ///
    /// Colorless kinds drop any color passed in.
    pub fn new(kind: SpecialKind, color: Option<Color>) -> Self {
        let color = if kind.is_colored() { color } else { None };
        let hp = match kind {
            SpecialKind::Armored => Some(ARMORED_HP),
            SpecialKind::Fixed => Some(FIXED_HP),
            _ => None,
        };
        let value = match kind {
            SpecialKind::Multiplier => Some(MULTIPLIER_VALUE),
            _ => None,
        };
        Self {
            kind,
            color,
            hp,
            value,
            kill: false,
        }
    }
}

/// A piece on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Normal { color: Color },
    Special(Special),
}

impl Piece {
    pub fn normal(color: Color) -> Self {
        Piece::Normal { color }
    }

    pub fn special(kind: SpecialKind, color: Option<Color>) -> Self {
        Piece::Special(Special::new(kind, color))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Piece::Normal { color } => Some(*color),
            Piece::Special(s) => s.color,
        }
    }

    pub fn special_kind(&self) -> Option<SpecialKind> {
        match self {
            Piece::Normal { .. } => None,
            Piece::Special(s) => Some(s.kind),
        }
    }

    pub fn is(&self, kind: SpecialKind) -> bool {
        self.special_kind() == Some(kind)
    }

    /// Fixed and inert pieces never take part in a match.
    pub fn is_matchable(&self) -> bool {
        !(self.is(SpecialKind::Fixed) || self.is(SpecialKind::Inert))
    }

    /// Grouping identity. `None` means the piece never groups.
    pub fn match_key(&self) -> Option<Color> {
        if !self.is_matchable() {
            return None;
        }
        self.color()
    }

    /// Whether gravity moves this piece. True for every current kind.
    pub fn falls(&self) -> bool {
        true
    }

    pub fn hp(&self) -> Option<u8> {
        match self {
            Piece::Normal { .. } => None,
            Piece::Special(s) => s.hp,
        }
    }

    /// Score factor contributed to a group (1 unless this is a multiplier).
    pub fn score_factor(&self) -> u32 {
        match self {
            Piece::Special(s) if s.kind == SpecialKind::Multiplier => {
                s.value.unwrap_or(MULTIPLIER_VALUE) as u32
            }
            _ => 1,
        }
    }

    /// Compact byte encoding: (kind, color, hp).
    ///
    /// Kind byte: 1 = normal, 2..=8 = special kinds in [`SpecialKind::ALL`] order.
    /// Color byte: 0 = none, otherwise `index + 1`.
    pub fn encode(&self) -> [u8; 3] {
        let kind = match self {
            Piece::Normal { .. } => 1,
            Piece::Special(s) => 2 + SpecialKind::ALL.iter().position(|k| *k == s.kind).unwrap_or(0) as u8,
        };
        let color = self.color().map(|c| c.index() as u8 + 1).unwrap_or(0);
        [kind, color, self.hp().unwrap_or(0)]
    }
}

/// A grid cell: `None` is empty.
pub type Cell = Option<Piece>;

/// Grid coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Row-major flat index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (COLS as usize) + (self.col as usize)
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / COLS as usize) as u8,
            col: (idx % COLS as usize) as u8,
        }
    }

    /// Offset by (dr, dc); `None` when the result leaves the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Pos> {
        let r = self.row as i16 + dr as i16;
        let c = self.col as i16 + dc as i16;
        if r < 0 || c < 0 || r >= ROWS as i16 || c >= COLS as i16 {
            return None;
        }
        Some(Pos::new(r as u8, c as u8))
    }

    /// Orthogonal neighbors inside the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Pos> {
        let me = *self;
        [(1i8, 0i8), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(move |(dr, dc)| me.offset(dr, dc))
    }

    pub fn is_adjacent(&self, other: Pos) -> bool {
        let dr = (self.row as i16 - other.row as i16).abs();
        let dc = (self.col as i16 - other.col as i16).abs();
        dr + dc == 1
    }

    /// All board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT).map(Pos::from_index)
    }
}

/// Line clear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Col => "col",
        }
    }
}

/// Pointer input, already mapped to grid cells.
///
/// `Move(None)` means the pointer is outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Pos),
    Move(Option<Pos>),
    Up,
}

/// Events emitted by the engine, in the order they happen.
///
/// They are fire-and-forget: the engine never waits on their consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Select { at: Pos },
    Hover { at: Pos },
    /// Awaited swap cue; positions exchange after the lead-in window.
    SwapStart { a: Pos, b: Pos },
    Swapped { a: Pos, b: Pos },
    SwapInvalid { a: Pos, b: Pos },
    Score { amount: u32 },
    Match { at: Pos, size: u8, key: Color, score: u32 },
    BigMatch { at: Pos },
    Explode { at: Pos, big: bool },
    LineClear { axis: Axis, index: u8 },
    AreaClear { center: Pos },
    Shake { intensity: u8, duration_ms: u32 },
    Spawn { at: Pos, piece: Piece },
    Move { from: Pos, to: Pos },
    Remove { at: Pos },
    Damage { at: Pos, hp: u8 },
    /// The board is stable again after `passes` resolution passes.
    Settled { passes: u32 },
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::Select { .. } => "select",
            BoardEvent::Hover { .. } => "hover",
            BoardEvent::SwapStart { .. } => "swapStart",
            BoardEvent::Swapped { .. } => "swapped",
            BoardEvent::SwapInvalid { .. } => "swapInvalid",
            BoardEvent::Score { .. } => "score",
            BoardEvent::Match { .. } => "match",
            BoardEvent::BigMatch { .. } => "bigMatch",
            BoardEvent::Explode { .. } => "explode",
            BoardEvent::LineClear { .. } => "lineClear",
            BoardEvent::AreaClear { .. } => "areaClear",
            BoardEvent::Shake { .. } => "shake",
            BoardEvent::Spawn { .. } => "spawn",
            BoardEvent::Move { .. } => "move",
            BoardEvent::Remove { .. } => "remove",
            BoardEvent::Damage { .. } => "damage",
            BoardEvent::Settled { .. } => "settled",
        }
    }
}

/// Screen placement of the board, computed by the host from its viewport.
///
/// Cell size is irrelevant to the rules; it only maps pointer coordinates to
/// grid cells and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardLayout {
    /// Fit the board into a `width` x `height` area, keeping cells twice as
    /// wide as tall and leaving `pad` cells on every side.
    pub fn fit(width: u16, height: u16, pad: u16) -> Self {
        let avail_w = width.saturating_sub(pad * 2);
        let avail_h = height.saturating_sub(pad * 2);
        let by_h = avail_h / ROWS as u16;
        let by_w = avail_w / (COLS as u16 * 2);
        let cell_h = by_h.min(by_w).max(1);
        let cell_w = cell_h * 2;
        let board_w = cell_w * COLS as u16;
        let board_h = cell_h * ROWS as u16;
        Self {
            origin_x: width.saturating_sub(board_w) / 2,
            origin_y: height.saturating_sub(board_h) / 2,
            cell_w,
            cell_h,
        }
    }

    pub fn width(&self) -> u16 {
        self.cell_w * COLS as u16
    }

    pub fn height(&self) -> u16 {
        self.cell_h * ROWS as u16
    }

    /// Map a screen coordinate to a grid cell.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Pos> {
        if x < self.origin_x || y < self.origin_y || self.cell_w == 0 || self.cell_h == 0 {
            return None;
        }
        let col = (x - self.origin_x) / self.cell_w;
        let row = (y - self.origin_y) / self.cell_h;
        if row >= ROWS as u16 || col >= COLS as u16 {
            return None;
        }
        Some(Pos::new(row as u8, col as u8))
    }

    /// Top-left screen coordinate of a cell.
    pub fn cell_origin(&self, pos: Pos) -> (u16, u16) {
        (
            self.origin_x + pos.col as u16 * self.cell_w,
            self.origin_y + pos.row as u16 * self.cell_h,
        )
    }
}
