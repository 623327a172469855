//! Protocol module - JSON-lines record types for the event journal
//!
//! Every line is one object with `type`, `seq` (per-journal sequence number)
//! and `ts` (unix time in ms), followed by the event's payload fields.

use serde::{Deserialize, Serialize};

use crate::types::{BoardEvent, Piece, Pos};

/// Grid coordinate on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub r: u8,
    pub c: u8,
}

impl From<Pos> for CellRef {
    fn from(p: Pos) -> Self {
        Self { r: p.row, c: p.col }
    }
}

/// Piece on the wire: `kind` is `normal` or a special kind name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
}

impl From<Piece> for PieceRecord {
    fn from(p: Piece) -> Self {
        Self {
            kind: p
                .special_kind()
                .map(|k| k.as_str())
                .unwrap_or("normal")
                .to_string(),
            color: p.color().map(|c| c.as_str().to_string()),
            hp: p.hp(),
            value: match p {
                Piece::Special(s) => s.value,
                Piece::Normal { .. } => None,
            },
        }
    }
}

/// Record payload, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordBody {
    /// First line of every journal.
    Session { seed: u32, free_swap: bool },
    Restart { episode: u32 },
    Select { at: CellRef },
    Hover { at: CellRef },
    SwapStart { a: CellRef, b: CellRef },
    Swapped { a: CellRef, b: CellRef },
    SwapInvalid { a: CellRef, b: CellRef },
    Score { amount: u32 },
    Match { at: CellRef, size: u8, key: String, score: u32 },
    BigMatch { at: CellRef },
    Explode { at: CellRef, big: bool },
    LineClear { axis: String, index: u8 },
    AreaClear { center: CellRef },
    Shake { intensity: u8, duration_ms: u32 },
    Spawn { at: CellRef, piece: PieceRecord },
    Move { from: CellRef, to: CellRef },
    Remove { at: CellRef },
    Damage { at: CellRef, hp: u8 },
    Settled { passes: u32 },
}

impl From<&BoardEvent> for RecordBody {
    fn from(e: &BoardEvent) -> Self {
        match *e {
            BoardEvent::Select { at } => Self::Select { at: at.into() },
            BoardEvent::Hover { at } => Self::Hover { at: at.into() },
            BoardEvent::SwapStart { a, b } => Self::SwapStart {
                a: a.into(),
                b: b.into(),
            },
            BoardEvent::Swapped { a, b } => Self::Swapped {
                a: a.into(),
                b: b.into(),
            },
            BoardEvent::SwapInvalid { a, b } => Self::SwapInvalid {
                a: a.into(),
                b: b.into(),
            },
            BoardEvent::Score { amount } => Self::Score { amount },
            BoardEvent::Match {
                at,
                size,
                key,
                score,
            } => Self::Match {
                at: at.into(),
                size,
                key: key.as_str().to_string(),
                score,
            },
            BoardEvent::BigMatch { at } => Self::BigMatch { at: at.into() },
            BoardEvent::Explode { at, big } => Self::Explode { at: at.into(), big },
            BoardEvent::LineClear { axis, index } => Self::LineClear {
                axis: axis.as_str().to_string(),
                index,
            },
            BoardEvent::AreaClear { center } => Self::AreaClear {
                center: center.into(),
            },
            BoardEvent::Shake {
                intensity,
                duration_ms,
            } => Self::Shake {
                intensity,
                duration_ms,
            },
            BoardEvent::Spawn { at, piece } => Self::Spawn {
                at: at.into(),
                piece: piece.into(),
            },
            BoardEvent::Move { from, to } => Self::Move {
                from: from.into(),
                to: to.into(),
            },
            BoardEvent::Remove { at } => Self::Remove { at: at.into() },
            BoardEvent::Damage { at, hp } => Self::Damage { at: at.into(), hp },
            BoardEvent::Settled { passes } => Self::Settled { passes },
        }
    }
}

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub body: RecordBody,
}
