//! Effect layer: presentation state driven by board events.
//!
//! The grid only holds plain piece values. Everything that makes a frame look
//! alive (explosion flashes, damage marks, line sweeps, camera shake, the
//! status line) lives here, keyed by grid coordinate and decayed by `tick`.
//! The layer implements every feedback hook, so the host can hand it to
//! [`dispatch`](crate::core::dispatch) directly.

use crate::core::{CameraShake, FeedbackSink, RenderDelegate, ScoreSink};
use crate::types::{Axis, Color, Piece, Pos, CELL_COUNT, COLS, ROWS};

const EXPLODE_FLASH_MS: u32 = 220;
const BIG_FLASH_MS: u32 = 320;
const DAMAGE_FLASH_MS: u32 = 260;
const SPAWN_FLASH_MS: u32 = 140;
const INVALID_FLASH_MS: u32 = 300;
const LINE_FLASH_MS: u32 = 260;
const STATUS_MS: u32 = 1500;

/// What a cell is currently flashing for. Later flashes overwrite earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashKind {
    #[default]
    None,
    Explode,
    BigExplode,
    Damage,
    Spawn,
    Invalid,
    Hover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlash {
    pub kind: FlashKind,
    pub remaining_ms: u32,
    pub total_ms: u32,
}

impl CellFlash {
    fn new(kind: FlashKind, ms: u32) -> Self {
        Self {
            kind,
            remaining_ms: ms,
            total_ms: ms,
        }
    }

    pub fn active(&self) -> bool {
        self.kind != FlashKind::None && self.remaining_ms > 0
    }

    /// Remaining strength, 255 at the start down to 0.
    pub fn strength(&self) -> u8 {
        if self.total_ms == 0 {
            return 0;
        }
        ((self.remaining_ms as u64 * 255) / self.total_ms as u64) as u8
    }
}

/// Last match summary for the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchInfo {
    pub size: u8,
    pub key: Color,
    pub score: u32,
    pub big: bool,
}

#[derive(Debug, Clone)]
pub struct EffectLayer {
    cells: [CellFlash; CELL_COUNT],
    rows: [u32; ROWS as usize],
    cols: [u32; COLS as usize],
    shake_intensity: u8,
    shake_ms: u32,
    /// Running clock for shake jitter.
    clock_ms: u32,
    score: u32,
    last_match: Option<MatchInfo>,
    status: Option<(&'static str, u32)>,
    settled_passes: u32,
}

impl Default for EffectLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectLayer {
    pub fn new() -> Self {
        Self {
            cells: [CellFlash::default(); CELL_COUNT],
            rows: [0; ROWS as usize],
            cols: [0; COLS as usize],
            shake_intensity: 0,
            shake_ms: 0,
            clock_ms: 0,
            score: 0,
            last_match: None,
            status: None,
            settled_passes: 0,
        }
    }

    /// Forget everything (used on restart).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Decay every timer by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.clock_ms = self.clock_ms.wrapping_add(elapsed_ms);
        for flash in self.cells.iter_mut() {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
            if flash.remaining_ms == 0 {
                *flash = CellFlash::default();
            }
        }
        for t in self.rows.iter_mut().chain(self.cols.iter_mut()) {
            *t = t.saturating_sub(elapsed_ms);
        }
        self.shake_ms = self.shake_ms.saturating_sub(elapsed_ms);
        if self.shake_ms == 0 {
            self.shake_intensity = 0;
        }
        if let Some((_, ms)) = self.status.as_mut() {
            *ms = ms.saturating_sub(elapsed_ms);
        }
        if matches!(self.status, Some((_, 0))) {
            self.status = None;
        }
    }

    pub fn flash_at(&self, pos: Pos) -> CellFlash {
        if !pos.in_bounds() {
            return CellFlash::default();
        }
        self.cells[pos.index()]
    }

    /// Whether a row or column sweep currently covers `pos`.
    pub fn line_lit(&self, pos: Pos) -> bool {
        pos.in_bounds() && (self.rows[pos.row as usize] > 0 || self.cols[pos.col as usize] > 0)
    }

    /// Horizontal screen offset for camera shake, in terminal columns.
    ///
    /// Alternates direction every tick-ish and shrinks as the shake runs out.
    pub fn shake_offset(&self) -> i16 {
        if self.shake_ms == 0 || self.shake_intensity == 0 {
            return 0;
        }
        let amp = (self.shake_intensity as i16 / 4).max(1);
        if (self.clock_ms / 16) % 2 == 0 {
            amp
        } else {
            -amp
        }
    }

    pub fn shaking(&self) -> bool {
        self.shake_ms > 0
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_match(&self) -> Option<MatchInfo> {
        self.last_match
    }

    pub fn status(&self) -> Option<&'static str> {
        self.status.map(|(s, _)| s)
    }

    pub fn settled_passes(&self) -> u32 {
        self.settled_passes
    }

    /// Show a transient message in the side panel.
    pub fn set_status(&mut self, text: &'static str) {
        self.status = Some((text, STATUS_MS));
    }

    /// Any animation still running.
    pub fn animating(&self) -> bool {
        self.shaking()
            || self.cells.iter().any(|c| c.active())
            || self.rows.iter().chain(self.cols.iter()).any(|t| *t > 0)
    }

    fn flash(&mut self, pos: Pos, kind: FlashKind, ms: u32) {
        if pos.in_bounds() {
            self.cells[pos.index()] = CellFlash::new(kind, ms);
        }
    }
}

impl ScoreSink for EffectLayer {
    fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}

impl FeedbackSink for EffectLayer {
    fn on_hover(&mut self, at: Pos) {
        self.flash(at, FlashKind::Hover, SPAWN_FLASH_MS);
    }

    fn on_swap_invalid(&mut self, a: Pos, b: Pos) {
        self.flash(a, FlashKind::Invalid, INVALID_FLASH_MS);
        self.flash(b, FlashKind::Invalid, INVALID_FLASH_MS);
        self.set_status("no match");
    }

    fn on_match(&mut self, _at: Pos, size: u8, key: Color, score: u32) {
        self.last_match = Some(MatchInfo {
            size,
            key,
            score,
            big: false,
        });
    }

    fn on_big_match(&mut self, _at: Pos) {
        if let Some(m) = self.last_match.as_mut() {
            m.big = true;
        }
        self.set_status("BIG MATCH!");
    }

    fn on_explode(&mut self, at: Pos, big: bool) {
        if big {
            self.flash(at, FlashKind::BigExplode, BIG_FLASH_MS);
        } else {
            self.flash(at, FlashKind::Explode, EXPLODE_FLASH_MS);
        }
    }

    fn on_line_clear(&mut self, axis: Axis, index: u8) {
        match axis {
            Axis::Row if index < ROWS => self.rows[index as usize] = LINE_FLASH_MS,
            Axis::Col if index < COLS => self.cols[index as usize] = LINE_FLASH_MS,
            _ => {}
        }
    }

    fn on_area_clear(&mut self, center: Pos) {
        for dr in -1i8..=1 {
            for dc in -1i8..=1 {
                if let Some(p) = center.offset(dr, dc) {
                    self.flash(p, FlashKind::BigExplode, BIG_FLASH_MS);
                }
            }
        }
    }

    fn on_settled(&mut self, passes: u32) {
        self.settled_passes = passes;
        if passes >= 3 {
            self.set_status("cascade!");
        }
    }
}

impl CameraShake for EffectLayer {
    fn shake(&mut self, intensity: u8, duration_ms: u32) {
        // Overlapping shakes keep the strongest.
        self.shake_intensity = self.shake_intensity.max(intensity);
        self.shake_ms = self.shake_ms.max(duration_ms);
    }
}

impl RenderDelegate for EffectLayer {
    fn on_spawn(&mut self, at: Pos, _piece: Piece) {
        self.flash(at, FlashKind::Spawn, SPAWN_FLASH_MS);
    }

    fn on_move(&mut self, from: Pos, to: Pos) {
        // A falling piece carries its flash with it.
        if from.in_bounds() && to.in_bounds() {
            self.cells[to.index()] = self.cells[from.index()];
            self.cells[from.index()] = CellFlash::default();
        }
    }

    fn on_damage(&mut self, at: Pos, _hp: u8) {
        self.flash(at, FlashKind::Damage, DAMAGE_FLASH_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch_all;
    use crate::types::BoardEvent;

    #[test]
    fn flashes_decay_to_nothing() {
        let mut fx = EffectLayer::new();
        let at = Pos::new(2, 3);
        fx.on_explode(at, false);
        assert_eq!(fx.flash_at(at).kind, FlashKind::Explode);
        assert_eq!(fx.flash_at(at).strength(), 255);
        fx.tick(110);
        assert!(fx.flash_at(at).active());
        fx.tick(110);
        assert!(!fx.flash_at(at).active());
        assert!(!fx.animating());
    }

    #[test]
    fn shake_keeps_the_strongest_and_alternates() {
        let mut fx = EffectLayer::new();
        fx.shake(4, 60);
        fx.shake(8, 100);
        fx.shake(4, 60);
        let first = fx.shake_offset();
        assert_eq!(first.abs(), 2);
        fx.tick(16);
        assert_eq!(fx.shake_offset(), -first);
        fx.tick(100);
        assert_eq!(fx.shake_offset(), 0);
    }

    #[test]
    fn line_clear_lights_the_whole_row() {
        let mut fx = EffectLayer::new();
        fx.on_line_clear(Axis::Row, 4);
        for c in 0..COLS {
            assert!(fx.line_lit(Pos::new(4, c)));
        }
        assert!(!fx.line_lit(Pos::new(3, 0)));
        fx.on_line_clear(Axis::Col, 200);
        fx.tick(LINE_FLASH_MS);
        assert!(!fx.line_lit(Pos::new(4, 0)));
    }

    #[test]
    fn events_feed_score_and_status() {
        let at = Pos::new(0, 0);
        let events = [
            BoardEvent::Score { amount: 40 },
            BoardEvent::Match {
                at,
                size: 4,
                key: Color::Red,
                score: 40,
            },
            BoardEvent::BigMatch { at },
            BoardEvent::Settled { passes: 1 },
        ];
        let mut fx = EffectLayer::new();
        dispatch_all(&events, &mut fx);
        assert_eq!(fx.score(), 40);
        assert_eq!(
            fx.last_match(),
            Some(MatchInfo {
                size: 4,
                key: Color::Red,
                score: 40,
                big: true
            })
        );
        assert_eq!(fx.status(), Some("BIG MATCH!"));
        fx.tick(STATUS_MS);
        assert_eq!(fx.status(), None);
    }

    #[test]
    fn falling_piece_carries_its_flash() {
        let mut fx = EffectLayer::new();
        fx.on_spawn(Pos::new(0, 1), Piece::normal(Color::Blue));
        fx.on_move(Pos::new(0, 1), Pos::new(3, 1));
        assert_eq!(fx.flash_at(Pos::new(3, 1)).kind, FlashKind::Spawn);
        assert!(!fx.flash_at(Pos::new(0, 1)).active());
    }
}
