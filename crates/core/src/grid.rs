//! Grid module - the 8x8 cell store
//!
//! The grid maps coordinates to plain piece values and knows nothing about
//! rules. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) with row 0 at the top.

use crate::types::{Cell, Color, Piece, Pos, SpecialKind, CELL_COUNT, COLS, ROWS};

/// The game grid - 8 rows x 8 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    pub fn rows(&self) -> u8 {
        ROWS
    }

    pub fn cols(&self) -> u8 {
        COLS
    }

    /// Get cell at `pos`. Returns None if out of bounds.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if !pos.in_bounds() {
            return None;
        }
        Some(self.cells[pos.index()])
    }

    /// The piece at `pos`, if any.
    pub fn piece(&self, pos: Pos) -> Option<Piece> {
        self.get(pos).flatten()
    }

    pub fn piece_mut(&mut self, pos: Pos) -> Option<&mut Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.index()].as_mut()
    }

    /// Set cell at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        self.cells[pos.index()] = cell;
        true
    }

    /// Remove and return the piece at `pos`.
    pub fn take(&mut self, pos: Pos) -> Cell {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.index()].take()
    }

    /// Exchange two cells. Returns false if either is out of bounds.
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        if !a.in_bounds() || !b.in_bounds() {
            return false;
        }
        self.cells.swap(a.index(), b.index());
        true
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.piece(pos).is_some()
    }

    /// Every cell holds a piece.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|p| (Pos::from_index(i), p)))
    }

    /// Copy into a 2D array (row-major).
    pub fn write_rows(&self, out: &mut [[Cell; COLS as usize]; ROWS as usize]) {
        for (i, cell) in self.cells.iter().enumerate() {
            out[i / COLS as usize][i % COLS as usize] = *cell;
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Parse the ASCII grid format, one string per row.
    ///
    /// Color letters (`R B G Y P C O W M S`) are normal pieces, `.` is empty,
    /// `#` a fixed piece and `%` an inert piece. Whitespace is ignored.
    /// Returns None unless there are exactly 8 rows of 8 cells.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    ///
    /// let grid = Grid::from_ascii(&[
    ///     "RRB.....", "........", "........", "........",
    ///     "........", "........", "........", "#%......",
    /// ])
    /// .unwrap();
    /// assert_eq!(grid.to_ascii()[0], "RRB.....");
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() != ROWS as usize {
            return None;
        }
        let mut grid = Self::new();
        for (r, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != COLS as usize {
                return None;
            }
            for (c, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(Piece::special(SpecialKind::Fixed, None)),
                    '%' => Some(Piece::special(SpecialKind::Inert, None)),
                    other => Some(Piece::normal(Color::from_letter(other)?)),
                };
                grid.set(Pos::new(r as u8, c as u8), cell);
            }
        }
        Some(grid)
    }

    /// Render to the ASCII grid format.
    ///
    /// Colored specials show their color letter in lowercase.
    pub fn to_ascii(&self) -> Vec<String> {
        (0..ROWS)
            .map(|r| {
                (0..COLS)
                    .map(|c| match self.piece(Pos::new(r, c)) {
                        None => '.',
                        Some(p) if p.is(SpecialKind::Fixed) => '#',
                        Some(p) if p.is(SpecialKind::Inert) => '%',
                        Some(Piece::Normal { color }) => color.letter(),
                        Some(p) => p
                            .color()
                            .map(|c| c.letter().to_ascii_lowercase())
                            .unwrap_or('?'),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        let mut grid = Grid::new();
        assert_eq!(grid.get(Pos::new(0, 0)), Some(None));
        assert_eq!(grid.get(Pos::new(8, 0)), None);
        assert_eq!(grid.get(Pos::new(0, 8)), None);
        assert!(!grid.set(Pos::new(8, 8), Some(Piece::normal(Color::Red))));
        assert!(!grid.swap(Pos::new(0, 0), Pos::new(0, 8)));
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();
        grid.set(Pos::new(0, 0), Some(Piece::normal(Color::Red)));
        grid.set(Pos::new(5, 3), Some(Piece::normal(Color::Blue)));

        assert_eq!(grid.cells[0], Some(Piece::normal(Color::Red)));
        assert_eq!(grid.cells[5 * 8 + 3], Some(Piece::normal(Color::Blue)));
        assert_eq!(grid.empty_count(), 62);
    }

    #[test]
    fn test_take_and_swap() {
        let mut grid = Grid::new();
        let a = Pos::new(2, 2);
        let b = Pos::new(2, 3);
        grid.set(a, Some(Piece::normal(Color::Red)));
        grid.set(b, Some(Piece::normal(Color::Blue)));

        assert!(grid.swap(a, b));
        assert_eq!(grid.piece(a), Some(Piece::normal(Color::Blue)));
        assert_eq!(grid.piece(b), Some(Piece::normal(Color::Red)));

        assert_eq!(grid.take(a), Some(Piece::normal(Color::Blue)));
        assert!(!grid.is_occupied(a));
        assert_eq!(grid.take(a), None);
    }

    #[test]
    fn test_ascii_roundtrip_with_obstacles() {
        let rows = [
            "RGBYPCOW", "MS......", "........", "........", "........", "........", "........",
            "#%#%#%#%",
        ];
        let grid = Grid::from_ascii(&rows).unwrap();
        let back = grid.to_ascii();
        for (a, b) in rows.iter().zip(back.iter()) {
            assert_eq!(a, b);
        }
        assert!(grid.piece(Pos::new(7, 0)).unwrap().is(SpecialKind::Fixed));
        assert!(grid.piece(Pos::new(7, 1)).unwrap().is(SpecialKind::Inert));
    }

    #[test]
    fn test_ascii_rejects_bad_shapes() {
        assert!(Grid::from_ascii(&["RRR"]).is_none());
        let mut rows = vec!["........"; 8];
        rows[3] = ".......";
        assert!(Grid::from_ascii(&rows).is_none());
        rows[3] = "...X....";
        assert!(Grid::from_ascii(&rows).is_none());
    }

    #[test]
    fn test_write_rows() {
        let mut grid = Grid::new();
        grid.set(Pos::new(7, 6), Some(Piece::normal(Color::Green)));
        let mut out = [[None; 8]; 8];
        grid.write_rows(&mut out);
        assert_eq!(out[7][6], Some(Piece::normal(Color::Green)));
        assert_eq!(out[6][7], None);
    }
}
