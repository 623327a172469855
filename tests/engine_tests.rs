//! Engine tests - swaps, cascades and pointer play through `GameState`

use tui_match3::core::{
    has_groups, EngineConfig, GameState, Grid, InputState, PhaseKind, SimpleRng, Timings,
};
use tui_match3::types::{BoardEvent, Color, Piece, PointerEvent, Pos, COLS, MAX_CASCADE_PASSES, ROWS};

/// No two orthogonal neighbours share a color.
fn checker() -> Grid {
    let mut grid = Grid::new();
    for pos in Pos::all() {
        let idx = (pos.row as usize * 3 + pos.col as usize) % 10;
        grid.set(pos, Some(Piece::normal(Color::ALL[idx])));
    }
    grid
}

/// Swapping (0,2) with (1,2) completes a red triple in row 0.
fn one_move_grid() -> Grid {
    let mut grid = checker();
    grid.set(Pos::new(0, 1), Some(Piece::normal(Color::Red)));
    grid.set(Pos::new(1, 2), Some(Piece::normal(Color::Red)));
    grid
}

fn instant(seed: u32) -> EngineConfig {
    EngineConfig::default()
        .with_seed(seed)
        .with_timings(Timings::INSTANT)
}

fn run_until_idle(game: &mut GameState, step_ms: u32) {
    for _ in 0..10_000 {
        if !game.busy() {
            return;
        }
        game.tick(step_ms);
    }
    panic!("engine never settled");
}

#[test]
fn test_invalid_swap_reverts_board() {
    let grid = checker();
    let mut game = GameState::from_grid(EngineConfig::default(), grid.clone(), SimpleRng::new(1));
    let a = Pos::new(4, 4);
    let b = Pos::new(4, 5);

    assert!(game.try_swap(a, b));
    assert!(game.busy());
    run_until_idle(&mut game, 16);

    assert_eq!(game.grid(), &grid);
    assert_eq!(game.score(), 0);
    assert_eq!(game.moves(), 1);
    assert_eq!(
        game.drain_events(),
        vec![
            BoardEvent::SwapStart { a, b },
            BoardEvent::Swapped { a, b },
            BoardEvent::Swapped { a, b },
            BoardEvent::SwapInvalid { a, b },
            BoardEvent::Settled { passes: 0 },
        ]
    );
}

#[test]
fn test_valid_swap_scores_and_refills() {
    let mut game = GameState::from_grid(instant(3), one_move_grid(), SimpleRng::new(3));
    assert!(game.try_swap(Pos::new(0, 2), Pos::new(1, 2)));
    game.tick(0);

    assert!(!game.busy());
    assert!(game.score() >= 30);
    assert!(game.cascade() >= 1);
    assert!(game.grid().is_full());

    let events = game.drain_events();
    assert!(events.contains(&BoardEvent::Match {
        at: Pos::new(0, 0),
        size: 3,
        key: Color::Red,
        score: 30
    }));
    assert!(matches!(events.last(), Some(BoardEvent::Settled { passes }) if *passes >= 1));
}

#[test]
fn test_swap_is_rejected_while_busy() {
    let mut game = GameState::from_grid(EngineConfig::default(), checker(), SimpleRng::new(1));
    assert!(game.try_swap(Pos::new(0, 0), Pos::new(0, 1)));
    assert!(!game.try_swap(Pos::new(2, 2), Pos::new(2, 3)));
    assert!(!game.pointer(PointerEvent::Down(Pos::new(5, 5))));
    assert_eq!(game.moves(), 1);
}

#[test]
fn test_pointer_drag_swaps() {
    let mut game = GameState::from_grid(instant(5), one_move_grid(), SimpleRng::new(5));
    let a = Pos::new(1, 2);
    let b = Pos::new(0, 2);

    assert!(game.pointer(PointerEvent::Down(a)));
    assert_eq!(game.input_state(), InputState::Selected(a));
    assert!(game.pointer(PointerEvent::Move(Some(b))));
    assert!(matches!(game.input_state(), InputState::Dragging { .. }));
    assert!(game.pointer(PointerEvent::Up));
    assert!(game.busy());

    game.tick(0);
    assert!(!game.busy());
    assert_eq!(game.input_state(), InputState::Idle);
    assert!(game.score() >= 30);
}

#[test]
fn test_drag_released_off_board_cancels() {
    let mut game = GameState::from_grid(instant(5), checker(), SimpleRng::new(5));
    let a = Pos::new(3, 3);
    game.pointer(PointerEvent::Down(a));
    game.pointer(PointerEvent::Move(Some(Pos::new(3, 4))));
    game.pointer(PointerEvent::Move(None));
    assert!(!game.pointer(PointerEvent::Up));
    assert_eq!(game.input_state(), InputState::Idle);
    assert_eq!(game.moves(), 0);
}

#[test]
fn test_random_play_always_settles_stable() {
    let mut game = GameState::with_config(instant(2024));
    let mut lcg: u32 = 99;
    let mut next = |max: u32| {
        lcg = lcg.wrapping_mul(1103515245).wrapping_add(12345);
        (lcg >> 8) % max
    };

    for _ in 0..300 {
        let a = Pos::new(next(ROWS as u32) as u8, next(COLS as u32) as u8);
        let b = if next(2) == 0 { a.offset(0, 1) } else { a.offset(1, 0) };
        let Some(b) = b else {
            continue;
        };
        if !game.try_swap(a, b) {
            continue;
        }
        game.tick(0);

        assert!(!game.busy());
        assert_eq!(game.phase().kind(), PhaseKind::Idle);
        assert!(game.grid().is_full());
        assert!(!has_groups(game.grid()) || game.cascade() == MAX_CASCADE_PASSES);
        let events = game.drain_events();
        assert!(matches!(events.last(), Some(BoardEvent::Settled { .. })));
    }
}

#[test]
fn test_restart_deals_a_fresh_stable_board() {
    let mut game = GameState::new(77);
    let first = game.grid().clone();
    assert!(game.restart());
    assert_eq!(game.episode_id(), 1);
    assert_ne!(game.grid(), &first);
    assert!(game.grid().is_full());
    assert!(!has_groups(game.grid()));
}

#[test]
fn test_restart_is_refused_mid_swap() {
    let mut game = GameState::from_grid(EngineConfig::default(), checker(), SimpleRng::new(2));
    let a = Pos::new(0, 0);
    let b = Pos::new(0, 1);
    assert!(game.try_swap(a, b));
    game.tick(70);
    assert_eq!(game.phase().kind(), PhaseKind::Swapping);

    assert!(!game.restart());
    assert!(game.busy());
    assert_eq!(game.phase().kind(), PhaseKind::Swapping);

    run_until_idle(&mut game, 16);
    let events = game.drain_events();
    assert_eq!(events.first(), Some(&BoardEvent::SwapStart { a, b }));
    assert_eq!(events.last(), Some(&BoardEvent::Settled { passes: 0 }));
    assert_eq!(game.episode_id(), 0);
}
