//! BoardView: maps a `core::GameSnapshot` plus the effect layer into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::effects::{EffectLayer, FlashKind};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BoardLayout, Color, Piece, Pos, SpecialKind};

/// Width reserved for the side panel when the terminal is wide enough.
pub const PANEL_W: u16 = 22;

const BOARD_BG: Rgb = Rgb::new(24, 24, 34);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH_WHITE: Rgb = Rgb::new(255, 255, 255);
const FLASH_CYAN: Rgb = Rgb::new(57, 228, 255);
const FLASH_RED: Rgb = Rgb::new(230, 40, 60);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the match-3 board.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Empty cells kept around the board (for the border).
    pad: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        Self { pad: 1 }
    }
}

impl BoardView {
    pub fn new(pad: u16) -> Self {
        Self { pad }
    }

    /// Board placement for `viewport`. The host maps mouse input with the
    /// same layout, so this must stay in sync with `render_into`.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let board_w = if viewport.width >= PANEL_W * 3 {
            viewport.width - PANEL_W
        } else {
            viewport.width
        };
        BoardLayout::fit(board_w, viewport.height, self.pad)
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        fx: &EffectLayer,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::blank(CellStyle::default().with_bg(SCREEN_BG)));

        let layout = self.layout(viewport);
        // Shake moves the picture, never the hit-test layout.
        let shaken = BoardLayout {
            origin_x: (layout.origin_x as i32 + fx.shake_offset() as i32).max(0) as u16,
            ..layout
        };

        self.draw_border(fb, shaken);
        for pos in Pos::all() {
            self.draw_cell(fb, snap, fx, shaken, pos);
        }
        self.draw_side_panel(fb, snap, fx, viewport, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, fx: &EffectLayer, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, fx, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout) {
        if layout.origin_x == 0 || layout.origin_y == 0 {
            return;
        }
        fb.draw_box(
            layout.origin_x - 1,
            layout.origin_y - 1,
            layout.width() + 2,
            layout.height() + 2,
            CellStyle::new(Rgb::new(120, 120, 140), SCREEN_BG),
        );
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        fx: &EffectLayer,
        layout: BoardLayout,
        pos: Pos,
    ) {
        let (x, y) = layout.cell_origin(pos);
        let (w, h) = (layout.cell_w, layout.cell_h);
        let mid_x = x + w / 2;
        let mid_y = y + h / 2;

        let piece = snap.cell(pos);
        let (mut bg, mut marker, mut fg) = match piece {
            None => (BOARD_BG, '·', Rgb::new(70, 70, 90)),
            Some(p) => (piece_rgb(p), piece_marker(p), Rgb::new(16, 16, 20)),
        };

        if fx.line_lit(pos) {
            bg = bg.mix(FLASH_CYAN, 140);
        }

        let flash = fx.flash_at(pos);
        if flash.active() {
            let t = flash.strength();
            match flash.kind {
                FlashKind::Explode => {
                    bg = bg.mix(FLASH_WHITE, t);
                    marker = '*';
                }
                FlashKind::BigExplode => {
                    bg = bg.mix(FLASH_CYAN, t);
                    marker = '✦';
                }
                FlashKind::Damage => {
                    fg = FLASH_RED;
                    marker = '!';
                }
                FlashKind::Spawn => bg = bg.mix(BOARD_BG, t / 2),
                FlashKind::Invalid => bg = bg.mix(FLASH_RED, t / 2),
                FlashKind::Hover => bg = bg.mix(FLASH_WHITE, t / 4),
                FlashKind::None => {}
            }
        }

        let style = CellStyle::new(fg, bg).bold();
        fb.fill_rect(x, y, w, h, ' ', style);
        fb.put_char(mid_x, mid_y, marker, style);
        // Armored and fixed show their remaining hp next to the marker.
        if let Some(hp) = piece.and_then(|p| p.hp()) {
            if w >= 3 {
                fb.put_u32(mid_x + 1, mid_y, hp as u32, style);
            }
        }

        let bracket = style.with_fg(FLASH_WHITE);
        if snap.selected == Some(pos) {
            fb.put_char(x, mid_y, '[', bracket);
            fb.put_char(x + w - 1, mid_y, ']', bracket);
        } else if snap.drag_target == Some(pos) {
            fb.put_char(x, mid_y, '<', bracket);
            fb.put_char(x + w - 1, mid_y, '>', bracket);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        fx: &EffectLayer,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout
            .origin_x
            .saturating_add(layout.width())
            .saturating_add(3);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = layout.origin_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "MOVES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.moves, value);
        y += 2;

        fb.put_str(panel_x, y, "LAST MATCH", label);
        y += 1;
        match fx.last_match() {
            Some(m) => {
                let n = fb.put_u32(panel_x, y, m.size as u32, value);
                let key_style = value.with_fg(color_rgb(m.key));
                let name = fb.put_str(panel_x + n + 1, y, m.key.as_str(), key_style);
                let sx = panel_x + n + 2 + name;
                fb.put_char(sx, y, '+', value);
                fb.put_u32(sx + 1, y, m.score, value);
            }
            None => {
                fb.put_str(panel_x, y, "-", dim);
            }
        }
        y += 2;

        fb.put_str(panel_x, y, "CASCADE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.cascade, value);
        y += 2;

        fb.put_str(panel_x, y, "MODE", label);
        y += 1;
        fb.put_str(
            panel_x,
            y,
            if snap.free_swap { "free swap" } else { "classic" },
            value,
        );
        y += 2;

        if let Some(status) = fx.status() {
            fb.put_str(panel_x, y, status, value.with_fg(Rgb::new(255, 220, 80)).bold());
        } else if snap.busy {
            fb.put_str(panel_x, y, snap.phase.as_str(), dim);
        }
        y += 2;

        for help in ["click/drag: swap", "r: restart", "f: free swap", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y += 1;
        }
    }
}

/// Display color of a piece. Colorless specials get neutral tones.
pub fn piece_rgb(piece: Piece) -> Rgb {
    match piece.color() {
        Some(c) => color_rgb(c),
        None if piece.is(SpecialKind::Fixed) => Rgb::new(110, 110, 120),
        None if piece.is(SpecialKind::Inert) => Rgb::new(60, 60, 70),
        None => Rgb::new(150, 150, 150),
    }
}

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(230, 70, 70),
        Color::Blue => Rgb::new(70, 120, 235),
        Color::Green => Rgb::new(80, 200, 100),
        Color::Yellow => Rgb::new(240, 215, 70),
        Color::Purple => Rgb::new(150, 90, 220),
        Color::Cyan => Rgb::new(70, 215, 225),
        Color::Orange => Rgb::new(250, 150, 40),
        Color::White => Rgb::new(235, 235, 235),
        Color::Magenta => Rgb::new(230, 80, 200),
        Color::Silver => Rgb::new(170, 180, 195),
    }
}

/// Center glyph of a piece.
pub fn piece_marker(piece: Piece) -> char {
    match piece.special_kind() {
        None => ' ',
        Some(SpecialKind::Row) => '↔',
        Some(SpecialKind::Col) => '↕',
        Some(SpecialKind::Nova) => '✸',
        Some(SpecialKind::Armored) => '◆',
        Some(SpecialKind::Fixed) => '#',
        Some(SpecialKind::Inert) => '░',
        Some(SpecialKind::Multiplier) => '×',
    }
}
