//! Interaction controller - pointer input to swap intents
//!
//! A small state machine between raw pointer events and the engine. It only
//! decides *what the player asked for*; legality of the swap (does it make a
//! match?) is the engine's business.
//!
//! ```text
//! Idle --down(occupied)--> Selected(a)
//! Selected(a) --down(b), adjacent--> Busy            (swap a,b)
//! Selected(a) --down(b), not adjacent--> Selected(b)
//! Selected(a) --move(adjacent), held--> Dragging(a, Some(t))
//! Dragging(a, Some(t)) --up--> Busy                  (swap a,t)
//! Dragging(a, None) --up--> Idle
//! Busy --settle--> Idle
//! ```

use crate::grid::Grid;
use crate::types::{PointerEvent, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputState {
    #[default]
    Idle,
    Selected(Pos),
    Dragging {
        origin: Pos,
        target: Option<Pos>,
    },
    /// A swap or cascade is in flight; all pointer input is ignored.
    Busy,
}

/// What the controller asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Select(Pos),
    Hover(Pos),
    Swap(Pos, Pos),
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: InputState,
    /// Pointer button is down since the last accepted press.
    held: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == InputState::Busy
    }

    /// Currently selected cell, including the origin of a drag.
    pub fn selected(&self) -> Option<Pos> {
        match self.state {
            InputState::Selected(p) => Some(p),
            InputState::Dragging { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn drag_target(&self) -> Option<Pos> {
        match self.state {
            InputState::Dragging { target, .. } => target,
            _ => None,
        }
    }

    /// Enter `Busy` regardless of the current state (programmatic swaps).
    pub fn set_busy(&mut self) {
        self.state = InputState::Busy;
        self.held = false;
    }

    /// The engine is idle again.
    pub fn settle(&mut self) {
        self.state = InputState::Idle;
        self.held = false;
    }

    /// Feed one pointer event. Returns the intent it produced, if any.
    pub fn handle(&mut self, event: PointerEvent, grid: &Grid) -> Option<Intent> {
        match (self.state, event) {
            (InputState::Busy, _) => None,

            (InputState::Idle, PointerEvent::Down(pos)) => {
                if !grid.is_occupied(pos) {
                    return None;
                }
                self.state = InputState::Selected(pos);
                self.held = true;
                Some(Intent::Select(pos))
            }

            (InputState::Selected(a), PointerEvent::Down(b)) => {
                if !grid.is_occupied(b) {
                    return None;
                }
                if a.is_adjacent(b) {
                    self.set_busy();
                    return Some(Intent::Swap(a, b));
                }
                self.state = InputState::Selected(b);
                self.held = true;
                Some(Intent::Select(b))
            }

            (InputState::Selected(a), PointerEvent::Move(Some(t))) => {
                if !self.held || !a.is_adjacent(t) || !grid.is_occupied(t) {
                    return None;
                }
                self.state = InputState::Dragging {
                    origin: a,
                    target: Some(t),
                };
                Some(Intent::Hover(t))
            }

            (InputState::Selected(_), PointerEvent::Up) => {
                self.held = false;
                None
            }

            (InputState::Dragging { origin, target }, PointerEvent::Move(at)) => {
                let next = at.filter(|t| origin.is_adjacent(*t) && grid.is_occupied(*t));
                self.state = InputState::Dragging {
                    origin,
                    target: next,
                };
                match next {
                    Some(t) if target != Some(t) => Some(Intent::Hover(t)),
                    _ => None,
                }
            }

            (InputState::Dragging { origin, target }, PointerEvent::Up) => match target {
                Some(t) => {
                    self.set_busy();
                    Some(Intent::Swap(origin, t))
                }
                None => {
                    self.settle();
                    None
                }
            },

            // A press during a drag means the release was lost; start over.
            (InputState::Dragging { .. }, PointerEvent::Down(pos)) => {
                self.settle();
                self.handle(PointerEvent::Down(pos), grid)
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece};

    fn full_grid() -> Grid {
        let mut grid = Grid::new();
        for pos in Pos::all() {
            grid.set(pos, Some(Piece::normal(Color::ALL[pos.index() % 10])));
        }
        grid
    }

    #[test]
    fn click_click_adjacent_swaps() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        let a = Pos::new(3, 3);
        let b = Pos::new(3, 4);

        assert_eq!(
            ctl.handle(PointerEvent::Down(a), &grid),
            Some(Intent::Select(a))
        );
        assert_eq!(ctl.handle(PointerEvent::Up, &grid), None);
        assert_eq!(ctl.state(), InputState::Selected(a));
        assert_eq!(
            ctl.handle(PointerEvent::Down(b), &grid),
            Some(Intent::Swap(a, b))
        );
        assert!(ctl.is_busy());
    }

    #[test]
    fn click_far_cell_reselects() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        ctl.handle(PointerEvent::Down(Pos::new(0, 0)), &grid);
        ctl.handle(PointerEvent::Up, &grid);
        assert_eq!(
            ctl.handle(PointerEvent::Down(Pos::new(5, 5)), &grid),
            Some(Intent::Select(Pos::new(5, 5)))
        );
        assert_eq!(ctl.state(), InputState::Selected(Pos::new(5, 5)));
    }

    #[test]
    fn drag_to_neighbor_swaps_on_release() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        let a = Pos::new(4, 4);
        let t = Pos::new(5, 4);

        ctl.handle(PointerEvent::Down(a), &grid);
        assert_eq!(
            ctl.handle(PointerEvent::Move(Some(t)), &grid),
            Some(Intent::Hover(t))
        );
        assert_eq!(ctl.drag_target(), Some(t));
        // Same target again: no repeated hover.
        assert_eq!(ctl.handle(PointerEvent::Move(Some(t)), &grid), None);
        assert_eq!(
            ctl.handle(PointerEvent::Up, &grid),
            Some(Intent::Swap(a, t))
        );
        assert!(ctl.is_busy());
    }

    #[test]
    fn drag_released_off_target_cancels() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        let a = Pos::new(4, 4);
        ctl.handle(PointerEvent::Down(a), &grid);
        ctl.handle(PointerEvent::Move(Some(Pos::new(4, 5))), &grid);
        ctl.handle(PointerEvent::Move(None), &grid);
        assert_eq!(
            ctl.state(),
            InputState::Dragging {
                origin: a,
                target: None
            }
        );
        assert_eq!(ctl.handle(PointerEvent::Up, &grid), None);
        assert_eq!(ctl.state(), InputState::Idle);
    }

    #[test]
    fn move_without_held_button_does_not_drag() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        let a = Pos::new(1, 1);
        ctl.handle(PointerEvent::Down(a), &grid);
        ctl.handle(PointerEvent::Up, &grid);
        assert_eq!(ctl.handle(PointerEvent::Move(Some(Pos::new(1, 2))), &grid), None);
        assert_eq!(ctl.state(), InputState::Selected(a));
    }

    #[test]
    fn busy_ignores_everything() {
        let grid = full_grid();
        let mut ctl = Controller::new();
        ctl.set_busy();
        assert_eq!(ctl.handle(PointerEvent::Down(Pos::new(0, 0)), &grid), None);
        assert_eq!(ctl.handle(PointerEvent::Move(Some(Pos::new(0, 1))), &grid), None);
        assert_eq!(ctl.handle(PointerEvent::Up, &grid), None);
        assert!(ctl.is_busy());
        ctl.settle();
        assert_eq!(ctl.state(), InputState::Idle);
    }

    #[test]
    fn empty_cells_are_ignored() {
        let mut grid = full_grid();
        grid.set(Pos::new(2, 2), None);
        let mut ctl = Controller::new();
        assert_eq!(ctl.handle(PointerEvent::Down(Pos::new(2, 2)), &grid), None);
        assert_eq!(ctl.state(), InputState::Idle);

        ctl.handle(PointerEvent::Down(Pos::new(2, 1)), &grid);
        assert_eq!(ctl.handle(PointerEvent::Down(Pos::new(2, 2)), &grid), None);
        assert_eq!(ctl.state(), InputState::Selected(Pos::new(2, 1)));
    }
}
