//! Mouse mapping from terminal events to pointer events.
//!
//! Terminals report mouse coordinates in character cells. The mapper turns
//! them into grid positions with the current layout and tracks the left
//! button so drags that started outside the board are ignored.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{BoardLayout, PointerEvent};

#[derive(Debug, Clone)]
pub struct PointerMapper {
    layout: BoardLayout,
    pressed: bool,
}

impl PointerMapper {
    pub fn new(layout: BoardLayout) -> Self {
        Self {
            layout,
            pressed: false,
        }
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    /// Replace the layout after a resize. Grid contents are unaffected.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn map(&mut self, event: MouseEvent) -> Option<PointerEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let pos = self.layout.cell_at(event.column, event.row)?;
                self.pressed = true;
                Some(PointerEvent::Down(pos))
            }
            MouseEventKind::Drag(MouseButton::Left) if self.pressed => Some(PointerEvent::Move(
                self.layout.cell_at(event.column, event.row),
            )),
            MouseEventKind::Up(MouseButton::Left) if self.pressed => {
                self.pressed = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }
}
