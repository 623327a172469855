//! Gravity and refill
//!
//! Each column is compacted downward (stable, never reorders pieces), then
//! every empty cell is refilled top-to-bottom with a fresh non-initial spawn.

use crate::factory::PieceFactory;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{BoardEvent, Pos, COLS, ROWS};

/// Let pieces fall. Returns the number of pieces that moved.
///
/// Every piece kind falls, obstacles included.
pub fn compact(grid: &mut Grid, events: &mut Vec<BoardEvent>) -> u32 {
    let mut moved = 0;
    for col in 0..COLS {
        // Next free slot, scanning from the bottom up.
        let mut write: i16 = ROWS as i16 - 1;
        for row in (0..ROWS).rev() {
            let from = Pos::new(row, col);
            let Some(piece) = grid.piece(from) else {
                continue;
            };
            let to = Pos::new(write as u8, col);
            if to != from {
                grid.set(to, Some(piece));
                grid.set(from, None);
                events.push(BoardEvent::Move { from, to });
                moved += 1;
            }
            write -= 1;
        }
    }
    moved
}

/// Fill every empty cell with a refill spawn. Returns the number spawned.
pub fn refill<R: RandomSource>(
    grid: &mut Grid,
    factory: &mut PieceFactory<R>,
    events: &mut Vec<BoardEvent>,
) -> u32 {
    let mut spawned = 0;
    for col in 0..COLS {
        for row in 0..ROWS {
            let pos = Pos::new(row, col);
            if grid.is_occupied(pos) {
                continue;
            }
            let piece = factory.spawn(false);
            grid.set(pos, Some(piece));
            events.push(BoardEvent::Spawn { at: pos, piece });
            spawned += 1;
        }
    }
    spawned
}

/// Compact then refill. No-op on a full grid.
pub fn settle<R: RandomSource>(
    grid: &mut Grid,
    factory: &mut PieceFactory<R>,
    events: &mut Vec<BoardEvent>,
) -> (u32, u32) {
    let moved = compact(grid, events);
    let spawned = refill(grid, factory, events);
    (moved, spawned)
}
