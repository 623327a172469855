use tui_match3::core::{GameSnapshot, GameState, Timings};
use tui_match3::types::{Pos, COLS, ROWS};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn fnv1a64_cells(snap: &GameSnapshot) -> u64 {
    fnv1a64_bytes((0..ROWS).flat_map(|r| {
        (0..COLS).flat_map(move |c| {
            snap.cell(Pos::new(r, c))
                .map(|p| p.encode())
                .unwrap_or([0; 3])
        })
    }))
}

#[test]
fn snapshot_board_into_sets_board_hash() {
    let mut gs = GameState::new(1);

    let mut snap = GameSnapshot::default();
    gs.snapshot_board_into(&mut snap);

    assert_eq!(snap.board_hash, fnv1a64_cells(&snap));

    let _ = gs.try_swap(Pos::new(3, 3), Pos::new(3, 4));
    let _ = gs.tick(5000);

    gs.snapshot_board_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_cells(&snap));
}

#[test]
fn snapshot_meta_into_does_not_change_board_hash() {
    let mut gs = GameState::new(1);

    let mut snap = GameSnapshot::default();
    gs.snapshot_board_into(&mut snap);
    let before = snap.board_hash;

    let _ = gs.try_swap(Pos::new(0, 0), Pos::new(1, 0));
    gs.snapshot_meta_into(&mut snap);
    assert_eq!(snap.board_hash, before);
    assert_eq!(snap.board_hash, fnv1a64_cells(&snap));
    assert!(snap.busy);
    assert_eq!(snap.moves, 1);
}

#[test]
fn snapshot_tracks_phase_countdown() {
    let mut gs = GameState::new(9);
    assert!(gs.try_swap(Pos::new(2, 2), Pos::new(2, 3)));
    let _ = gs.tick(20);

    let snap = gs.snapshot();
    assert_eq!(snap.phase.as_str(), "swapCue");
    assert_eq!(snap.phase_remaining_ms, Timings::default().swap_cue_ms - 20);
    assert!(!snap.playable());
}
