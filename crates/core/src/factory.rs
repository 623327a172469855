//! Piece factory - spawn policy and initial board setup
//!
//! Spawns are either "initial" (always a normal piece, used for the first fill)
//! or refills, which roll for a special piece first. The initial board is then
//! repaired so that it starts without any match.

use crate::detect::find_groups;
use crate::grid::Grid;
use crate::rng::{RandomSource, SimpleRng};
use crate::types::{Color, Piece, Pos, SpecialKind, SPECIAL_CHANCE_PERCENT};

/// Generates pieces from an injected random source.
#[derive(Debug, Clone)]
pub struct PieceFactory<R: RandomSource = SimpleRng> {
    rng: R,
    special_chance: u32,
}

impl PieceFactory<SimpleRng> {
    /// Factory backed by the seeded LCG with the default special chance.
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed), SPECIAL_CHANCE_PERCENT)
    }
}

impl<R: RandomSource> PieceFactory<R> {
    pub fn new(rng: R, special_chance: u32) -> Self {
        Self {
            rng,
            special_chance: special_chance.min(100),
        }
    }

    pub fn special_chance(&self) -> u32 {
        self.special_chance
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn random_color(&mut self) -> Color {
        Color::ALL[self.rng.next_range(Color::ALL.len() as u32) as usize]
    }

    /// Spawn a piece.
    ///
    /// Initial spawns are always normal. Refills roll the special chance
    /// first, then pick a kind uniformly; colored kinds draw their color next.
    pub fn spawn(&mut self, initial: bool) -> Piece {
        if !initial && self.rng.chance_percent(self.special_chance) {
            let kind = SpecialKind::ALL[self.rng.next_range(SpecialKind::ALL.len() as u32) as usize];
            let color = if kind.is_colored() {
                Some(self.random_color())
            } else {
                None
            };
            return Piece::special(kind, color);
        }
        Piece::normal(self.random_color())
    }

    /// Pick a color for `pos` that is unlikely to complete a match.
    ///
    /// Colors are ranked by how many orthogonal neighbors are normal pieces of
    /// that color; the pick is uniform among colors with fewer than two such
    /// neighbors (or among all colors, ranked, if none qualify).
    pub fn pick_color_avoid(&mut self, grid: &Grid, pos: Pos) -> Color {
        let mut ranked: Vec<(Color, usize)> = Color::ALL
            .iter()
            .map(|&color| {
                let count = pos
                    .neighbors()
                    .filter(|&n| grid.piece(n) == Some(Piece::normal(color)))
                    .count();
                (color, count)
            })
            .collect();
        // Stable: ties keep palette order.
        ranked.sort_by_key(|&(_, count)| count);

        let qualifying = ranked.iter().take_while(|&&(_, count)| count < 2).count();
        let pool = if qualifying > 0 {
            &ranked[..qualifying]
        } else {
            &ranked[..]
        };
        pool[self.rng.next_range(pool.len() as u32) as usize].0
    }
}

/// Fill every cell with an initial (normal) piece, row-major.
pub fn fill_initial<R: RandomSource>(grid: &mut Grid, factory: &mut PieceFactory<R>) {
    for pos in Pos::all() {
        let piece = factory.spawn(true);
        grid.set(pos, Some(piece));
    }
}

/// Re-color matched cells until the grid has no group or `max_tries` runs out.
///
/// Returns the number of repair rounds performed. Running out of tries is not
/// an error; the board is used as-is.
pub fn repair_initial<R: RandomSource>(
    grid: &mut Grid,
    factory: &mut PieceFactory<R>,
    max_tries: u32,
) -> u32 {
    let mut tries = 0;
    while tries < max_tries {
        let groups = find_groups(grid);
        if groups.is_empty() {
            break;
        }
        for group in &groups {
            for pos in group.positions() {
                let color = factory.pick_color_avoid(grid, pos);
                grid.set(pos, Some(Piece::normal(color)));
            }
        }
        tries += 1;
    }
    tries
}
