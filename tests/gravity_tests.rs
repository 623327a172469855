//! Gravity tests - compaction and refill

use tui_match3::core::gravity::{compact, settle};
use tui_match3::core::{Grid, PieceFactory};
use tui_match3::types::{BoardEvent, Pos};

fn grid(rows: [&str; 8]) -> Grid {
    Grid::from_ascii(&rows).unwrap()
}

#[test]
fn test_compact_keeps_column_order() {
    let mut g = grid([
        "R.......", ".......B", "G.......", "........", "Y.......", "........", "........",
        "........",
    ]);
    let mut events = Vec::new();
    let moved = compact(&mut g, &mut events);
    assert_eq!(moved, 4);
    let ascii = g.to_ascii();
    assert_eq!(ascii[5], "R.......");
    assert_eq!(ascii[6], "G.......");
    assert_eq!(ascii[7], "Y......B");
    assert!(events.contains(&BoardEvent::Move {
        from: Pos::new(1, 7),
        to: Pos::new(7, 7)
    }));
}

#[test]
fn test_obstacles_fall_like_pieces() {
    let mut g = grid([
        "#.......", "%.......", "........", "........", "........", "........", "........",
        "R.......",
    ]);
    let mut events = Vec::new();
    compact(&mut g, &mut events);
    let ascii = g.to_ascii();
    assert_eq!(ascii[5], "#.......");
    assert_eq!(ascii[6], "%.......");
    assert_eq!(ascii[7], "R.......");
}

#[test]
fn test_settle_fills_every_hole() {
    let mut g = grid([
        "........", "RGB.....", "........", "....Y...", "........", "........", "........",
        "........",
    ]);
    let mut factory = PieceFactory::seeded(11);
    let mut events = Vec::new();
    let (moved, spawned) = settle(&mut g, &mut factory, &mut events);
    assert_eq!(moved, 4);
    assert_eq!(spawned, 60);
    assert!(g.is_full());

    // Moves are reported before any spawn.
    let first_spawn = events
        .iter()
        .position(|e| matches!(e, BoardEvent::Spawn { .. }))
        .unwrap();
    assert!(events[first_spawn..]
        .iter()
        .all(|e| matches!(e, BoardEvent::Spawn { .. })));
}
