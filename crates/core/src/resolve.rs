//! Resolution module - scoring, destruction and special effects for one pass
//!
//! A pass takes the groups found by the detector and, group by group:
//! reports the score, fires the match cues, destroys the members, runs the
//! row/col/nova effects the group triggered and finally wears down fixed
//! pieces next to the group. Gravity is not part of a pass.

use crate::detect::MatchGroup;
use crate::grid::Grid;
use crate::types::{
    Axis, BoardEvent, Piece, Pos, SpecialKind, BIG_MATCH_SCORE, COLS, POINTS_PER_PIECE, ROWS,
    SHAKE_INTENSITY, SHAKE_INTENSITY_BIG, SHAKE_MS, SHAKE_MS_BIG,
};

/// Summary of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PassReport {
    pub groups: u32,
    pub score: u32,
    /// Line and area effects triggered by the pass.
    pub effects: u32,
    /// Pieces actually removed from the grid.
    pub removed: u32,
    /// At least one group scored as a big match.
    pub big: bool,
}

impl PassReport {
    /// Number of explosion windows the pass should pay for.
    pub fn explosion_units(&self) -> u32 {
        self.groups + self.effects
    }
}

/// Score of a group: `size * 10 * product(multipliers)`.
///
/// Uses the piece values captured at detection time. Saturates at `u32::MAX`.
pub fn group_score(group: &MatchGroup) -> u32 {
    let factor = group
        .members()
        .iter()
        .fold(1u32, |f, (_, p)| f.saturating_mul(p.score_factor()));
    (group.len() as u32)
        .saturating_mul(POINTS_PER_PIECE)
        .saturating_mul(factor)
}

/// Resolve every group against the grid, appending feedback to `events`.
pub fn resolve_pass(grid: &mut Grid, groups: &[MatchGroup], events: &mut Vec<BoardEvent>) -> PassReport {
    let mut report = PassReport::default();

    for group in groups {
        let score = group_score(group);
        let big = score >= BIG_MATCH_SCORE;
        let anchor = group.anchor();

        report.groups += 1;
        report.score = report.score.saturating_add(score);
        report.big |= big;

        events.push(BoardEvent::Score { amount: score });
        events.push(BoardEvent::Match {
            at: anchor,
            size: group.len() as u8,
            key: group.key,
            score,
        });
        if big {
            events.push(BoardEvent::BigMatch { at: anchor });
        }

        for pos in group.positions() {
            if destroy_at(grid, pos, big, events) {
                report.removed += 1;
            }
        }

        // Effects fire in kind order: every row clear, then columns, then novas.
        for kind in [SpecialKind::Row, SpecialKind::Col, SpecialKind::Nova] {
            for &(pos, piece) in group.members() {
                if !piece.is(kind) {
                    continue;
                }
                report.effects += 1;
                report.removed += match kind {
                    SpecialKind::Row => clear_row(grid, pos.row, events),
                    SpecialKind::Col => clear_col(grid, pos.col, events),
                    _ => clear_area(grid, pos, events),
                };
            }
        }

        report.removed += damage_adjacent_fixed(grid, group, events);
    }

    report
}

/// Apply the destroy policy to one cell. Returns true if the cell was emptied.
///
/// Inert pieces are never destroyed, fixed pieces only once killed, and
/// armored pieces lose one hp per hit until they run out.
pub fn destroy_at(grid: &mut Grid, pos: Pos, big: bool, events: &mut Vec<BoardEvent>) -> bool {
    let Some(piece) = grid.piece_mut(pos) else {
        return false;
    };

    if let Piece::Special(special) = piece {
        match special.kind {
            SpecialKind::Inert => return false,
            SpecialKind::Fixed if !special.kill => return false,
            SpecialKind::Armored => {
                let hp = special.hp.unwrap_or(1).saturating_sub(1);
                special.hp = Some(hp);
                if hp > 0 {
                    events.push(BoardEvent::Damage { at: pos, hp });
                    return false;
                }
            }
            _ => {}
        }
    }

    let (intensity, duration_ms) = if big {
        (SHAKE_INTENSITY_BIG, SHAKE_MS_BIG)
    } else {
        (SHAKE_INTENSITY, SHAKE_MS)
    };
    events.push(BoardEvent::Explode { at: pos, big });
    events.push(BoardEvent::Shake {
        intensity,
        duration_ms,
    });
    events.push(BoardEvent::Remove { at: pos });
    grid.take(pos);
    true
}

fn clear_row(grid: &mut Grid, row: u8, events: &mut Vec<BoardEvent>) -> u32 {
    events.push(BoardEvent::LineClear {
        axis: Axis::Row,
        index: row,
    });
    (0..COLS)
        .filter(|&c| destroy_at(grid, Pos::new(row, c), true, events))
        .count() as u32
}

fn clear_col(grid: &mut Grid, col: u8, events: &mut Vec<BoardEvent>) -> u32 {
    events.push(BoardEvent::LineClear {
        axis: Axis::Col,
        index: col,
    });
    (0..ROWS)
        .filter(|&r| destroy_at(grid, Pos::new(r, col), true, events))
        .count() as u32
}

fn clear_area(grid: &mut Grid, center: Pos, events: &mut Vec<BoardEvent>) -> u32 {
    events.push(BoardEvent::AreaClear { center });
    let mut removed = 0;
    for dr in -1i8..=1 {
        for dc in -1i8..=1 {
            if let Some(pos) = center.offset(dr, dc) {
                if destroy_at(grid, pos, true, events) {
                    removed += 1;
                }
            }
        }
    }
    removed
}

/// Every fixed piece orthogonally next to a group member loses one hp, once
/// per group. At zero it is killed and destroyed.
fn damage_adjacent_fixed(grid: &mut Grid, group: &MatchGroup, events: &mut Vec<BoardEvent>) -> u32 {
    let mut targets: Vec<Pos> = Vec::new();
    for pos in group.positions() {
        for n in pos.neighbors() {
            let is_fixed = grid
                .piece(n)
                .is_some_and(|p| p.is(SpecialKind::Fixed));
            if is_fixed && !targets.contains(&n) {
                targets.push(n);
            }
        }
    }

    let mut removed = 0;
    for pos in targets {
        let Some(Piece::Special(special)) = grid.piece_mut(pos) else {
            continue;
        };
        let hp = special.hp.unwrap_or(1).saturating_sub(1);
        special.hp = Some(hp);
        events.push(BoardEvent::Damage { at: pos, hp });
        if hp == 0 {
            special.kill = true;
            if destroy_at(grid, pos, true, events) {
                removed += 1;
            }
        }
    }
    removed
}
