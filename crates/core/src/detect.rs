//! Match detection - connected same-key groups of three or more
//!
//! A pure function of the grid: flood-fills 4-directional components of
//! matchable pieces sharing a match-key. Each cell lands in at most one group.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, Piece, Pos, CELL_COUNT, MIN_GROUP_SIZE};

/// A connected group of matchable pieces sharing `key`.
///
/// Members carry the piece value seen at detection time, so scoring and
/// effect triggers survive earlier groups of the same pass clearing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub key: Color,
    members: ArrayVec<(Pos, Piece), CELL_COUNT>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[(Pos, Piece)] {
        &self.members
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.members.iter().map(|(p, _)| *p)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.members.iter().any(|(p, _)| *p == pos)
    }

    /// Smallest member in row-major order; a stable representative for feedback.
    pub fn anchor(&self) -> Pos {
        self.positions().min().unwrap_or(Pos::new(0, 0))
    }
}

/// Find every group of at least [`MIN_GROUP_SIZE`] connected pieces.
pub fn find_groups(grid: &Grid) -> Vec<MatchGroup> {
    let mut groups = Vec::new();
    let mut visited = [false; CELL_COUNT];

    for start in Pos::all() {
        if visited[start.index()] {
            continue;
        }
        let Some(key) = grid.piece(start).and_then(|p| p.match_key()) else {
            continue;
        };

        let mut members = ArrayVec::<(Pos, Piece), CELL_COUNT>::new();
        let mut stack = ArrayVec::<Pos, CELL_COUNT>::new();
        visited[start.index()] = true;
        stack.push(start);

        while let Some(pos) = stack.pop() {
            let Some(piece) = grid.piece(pos) else {
                continue;
            };
            members.push((pos, piece));

            for next in pos.neighbors() {
                if visited[next.index()] {
                    continue;
                }
                if grid.piece(next).and_then(|p| p.match_key()) == Some(key) {
                    visited[next.index()] = true;
                    stack.push(next);
                }
            }
        }

        if members.len() >= MIN_GROUP_SIZE {
            groups.push(MatchGroup { key, members });
        }
    }

    groups
}

/// Cheap check used by the initial-board repair loop and tests.
pub fn has_groups(grid: &Grid) -> bool {
    !find_groups(grid).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpecialKind;

    fn grid(rows: [&str; 8]) -> Grid {
        Grid::from_ascii(&rows).unwrap()
    }

    #[test]
    fn finds_straight_line() {
        let g = grid([
            "RRR.....", "........", "........", "........", "........", "........", "........",
            "........",
        ]);
        let groups = find_groups(&g);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, Color::Red);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].anchor(), Pos::new(0, 0));
    }

    #[test]
    fn pairs_do_not_match() {
        let g = grid([
            "RR.BB...", "......GG", "Y.......", "Y.......", "........", "........", "........",
            "........",
        ]);
        assert!(find_groups(&g).is_empty());
    }

    #[test]
    fn l_shapes_and_blobs_are_single_groups() {
        let g = grid([
            "R.......", "R.......", "RRR.....", "........", "...BB...", "...BB...", "........",
            "........",
        ]);
        let mut groups = find_groups(&g);
        groups.sort_by_key(|g| g.anchor());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[1].len(), 4);
        assert_eq!(groups[1].key, Color::Blue);
    }

    #[test]
    fn colored_specials_group_by_color() {
        let mut g = grid([
            "RR......", "........", "........", "........", "........", "........", "........",
            "........",
        ]);
        g.set(
            Pos::new(0, 2),
            Some(Piece::special(SpecialKind::Multiplier, Some(Color::Red))),
        );
        let groups = find_groups(&g);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].contains(Pos::new(0, 2)));
    }

    #[test]
    fn fixed_and_inert_break_runs() {
        let mut g = grid([
            "RR#RR...", "BB%BB...", "........", "........", "........", "........", "........",
            "........",
        ]);
        // A fixed piece that somehow carries a color still never groups.
        if let Some(Piece::Special(s)) = g.piece_mut(Pos::new(0, 2)) {
            s.color = Some(Color::Red);
        }
        assert!(find_groups(&g).is_empty());
    }

    #[test]
    fn colorless_specials_never_group() {
        let mut g = Grid::new();
        for c in 0..4 {
            g.set(Pos::new(3, c), Some(Piece::special(SpecialKind::Nova, None)));
        }
        assert!(find_groups(&g).is_empty());
    }

    #[test]
    fn empty_grid_has_no_groups() {
        assert!(!has_groups(&Grid::new()));
    }
}
