use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use tui_match3::core::{dispatch_all, EngineConfig, GameState, Grid, SimpleRng, Timings};
use tui_match3::input::PointerMapper;
use tui_match3::term::{BoardView, EffectLayer, Viewport};
use tui_match3::types::{Color, Piece, PointerEvent, Pos};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn mapper_hits_the_cells_the_view_draws() {
    let view = BoardView::default();
    for vp in [Viewport::new(100, 30), Viewport::new(40, 20), Viewport::new(200, 60)] {
        let layout = view.layout(vp);
        let mut mapper = PointerMapper::new(layout);
        for pos in Pos::all() {
            let (x, y) = layout.cell_origin(pos);
            let ev = mapper.map(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
            assert_eq!(ev, Some(PointerEvent::Down(pos)), "{:?} in {:?}", pos, vp);
            assert_eq!(
                mapper.map(mouse(MouseEventKind::Up(MouseButton::Left), x, y)),
                Some(PointerEvent::Up)
            );
        }
    }
}

#[test]
fn effect_layer_tracks_engine_score() {
    let mut grid = Grid::new();
    for pos in Pos::all() {
        let idx = (pos.row as usize * 3 + pos.col as usize) % 10;
        grid.set(pos, Some(Piece::normal(Color::ALL[idx])));
    }
    grid.set(Pos::new(0, 1), Some(Piece::normal(Color::Red)));
    grid.set(Pos::new(1, 2), Some(Piece::normal(Color::Red)));

    let config = EngineConfig::default().with_timings(Timings::INSTANT);
    let mut game = GameState::from_grid(config, grid, SimpleRng::new(8));
    assert!(game.try_swap(Pos::new(0, 2), Pos::new(1, 2)));
    game.tick(0);

    let mut fx = EffectLayer::new();
    let events = game.drain_events();
    dispatch_all(&events, &mut fx);

    assert_eq!(fx.score(), game.score());
    assert!(fx.last_match().is_some());
    assert!(fx.animating());
    assert_eq!(fx.settled_passes(), game.cascade());

    fx.tick(10_000);
    assert!(!fx.animating());
}

#[test]
fn tiny_viewports_render_without_panicking() {
    let game = GameState::new(1);
    let snap = game.snapshot();
    let fx = EffectLayer::new();
    let view = BoardView::default();
    for (w, h) in [(0, 0), (1, 1), (8, 8), (17, 9), (30, 4)] {
        let fb = view.render(&snap, &fx, Viewport::new(w, h));
        assert_eq!(fb.width(), w);
        assert_eq!(fb.height(), h);
    }
}
