//! Feedback seams between the rules engine and its host
//!
//! The engine records [`BoardEvent`]s in order and the host drains them once
//! per frame. [`dispatch`] routes each event to the matching hook so a host
//! can implement only the traits it cares about. Every hook is
//! fire-and-forget: the engine never waits on a return value.

use crate::types::{Axis, BoardEvent, Color, Piece, Pos};

/// Receives score increments, once per resolved group.
pub trait ScoreSink {
    fn add_score(&mut self, amount: u32);
}

/// Audio/visual cues keyed by event and grid position.
#[allow(unused_variables)]
pub trait FeedbackSink {
    fn on_select(&mut self, at: Pos) {}
    fn on_hover(&mut self, at: Pos) {}
    fn on_swap_start(&mut self, a: Pos, b: Pos) {}
    fn on_swap_invalid(&mut self, a: Pos, b: Pos) {}
    fn on_match(&mut self, at: Pos, size: u8, key: Color, score: u32) {}
    fn on_explode(&mut self, at: Pos, big: bool) {}
    fn on_line_clear(&mut self, axis: Axis, index: u8) {}
    fn on_area_clear(&mut self, center: Pos) {}
    fn on_big_match(&mut self, at: Pos) {}
    fn on_settled(&mut self, passes: u32) {}
}

pub trait CameraShake {
    fn shake(&mut self, intensity: u8, duration_ms: u32);
}

/// Grid mutations for a renderer that animates pieces.
#[allow(unused_variables)]
pub trait RenderDelegate {
    fn on_spawn(&mut self, at: Pos, piece: Piece) {}
    fn on_move(&mut self, from: Pos, to: Pos) {}
    fn on_swap(&mut self, a: Pos, b: Pos) {}
    fn on_remove(&mut self, at: Pos) {}
    fn on_damage(&mut self, at: Pos, hp: u8) {}
}

/// Route one event to the host's hooks.
pub fn dispatch<H>(event: &BoardEvent, host: &mut H)
where
    H: ScoreSink + FeedbackSink + CameraShake + RenderDelegate,
{
    match *event {
        BoardEvent::Select { at } => host.on_select(at),
        BoardEvent::Hover { at } => host.on_hover(at),
        BoardEvent::SwapStart { a, b } => host.on_swap_start(a, b),
        BoardEvent::Swapped { a, b } => host.on_swap(a, b),
        BoardEvent::SwapInvalid { a, b } => host.on_swap_invalid(a, b),
        BoardEvent::Score { amount } => host.add_score(amount),
        BoardEvent::Match {
            at,
            size,
            key,
            score,
        } => host.on_match(at, size, key, score),
        BoardEvent::BigMatch { at } => host.on_big_match(at),
        BoardEvent::Explode { at, big } => host.on_explode(at, big),
        BoardEvent::LineClear { axis, index } => host.on_line_clear(axis, index),
        BoardEvent::AreaClear { center } => host.on_area_clear(center),
        BoardEvent::Shake {
            intensity,
            duration_ms,
        } => host.shake(intensity, duration_ms),
        BoardEvent::Spawn { at, piece } => host.on_spawn(at, piece),
        BoardEvent::Move { from, to } => host.on_move(from, to),
        BoardEvent::Remove { at } => host.on_remove(at),
        BoardEvent::Damage { at, hp } => host.on_damage(at, hp),
        BoardEvent::Settled { passes } => host.on_settled(passes),
    }
}

/// Route a batch of events in order.
pub fn dispatch_all<'a, H, I>(events: I, host: &mut H)
where
    H: ScoreSink + FeedbackSink + CameraShake + RenderDelegate,
    I: IntoIterator<Item = &'a BoardEvent>,
{
    for event in events {
        dispatch(event, host);
    }
}

/// Host that accepts and discards everything (headless runs, benches).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl ScoreSink for NullHost {
    fn add_score(&mut self, _amount: u32) {}
}

impl FeedbackSink for NullHost {}

impl CameraShake for NullHost {
    fn shake(&mut self, _intensity: u8, _duration_ms: u32) {}
}

impl RenderDelegate for NullHost {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        score: u32,
        shakes: Vec<(u8, u32)>,
        calls: Vec<&'static str>,
    }

    impl ScoreSink for Recorder {
        fn add_score(&mut self, amount: u32) {
            self.score += amount;
        }
    }

    impl FeedbackSink for Recorder {
        fn on_match(&mut self, _at: Pos, _size: u8, _key: Color, _score: u32) {
            self.calls.push("match");
        }
        fn on_big_match(&mut self, _at: Pos) {
            self.calls.push("big");
        }
    }

    impl CameraShake for Recorder {
        fn shake(&mut self, intensity: u8, duration_ms: u32) {
            self.shakes.push((intensity, duration_ms));
        }
    }

    impl RenderDelegate for Recorder {
        fn on_remove(&mut self, _at: Pos) {
            self.calls.push("remove");
        }
    }

    #[test]
    fn events_reach_the_right_hooks_in_order() {
        let at = Pos::new(1, 1);
        let events = [
            BoardEvent::Score { amount: 40 },
            BoardEvent::Match {
                at,
                size: 4,
                key: Color::Red,
                score: 40,
            },
            BoardEvent::BigMatch { at },
            BoardEvent::Shake {
                intensity: 8,
                duration_ms: 100,
            },
            BoardEvent::Remove { at },
            BoardEvent::Hover { at },
        ];
        let mut rec = Recorder::default();
        dispatch_all(&events, &mut rec);
        assert_eq!(rec.score, 40);
        assert_eq!(rec.shakes, vec![(8, 100)]);
        assert_eq!(rec.calls, vec!["match", "big", "remove"]);
    }

    #[test]
    fn null_host_accepts_everything() {
        let mut host = NullHost;
        dispatch(&BoardEvent::Settled { passes: 3 }, &mut host);
        dispatch(
            &BoardEvent::Spawn {
                at: Pos::new(0, 0),
                piece: Piece::normal(Color::Red),
            },
            &mut host,
        );
    }
}
