use battleships::{Board, BoardError, Shot, ShotResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_field_size_limits() {
    assert!(Board::new(84, 1, false).is_ok());
    assert_eq!(
        Board::new(85, 10, false).unwrap_err(),
        BoardError::FieldTooLarge { width: 85, height: 10 }
    );
    assert!(matches!(Board::new(0, 10, false), Err(BoardError::FieldTooLarge { .. })));
    assert!(matches!(Board::new(10, 0, false), Err(BoardError::FieldTooLarge { .. })));
}

#[test]
fn test_sink_sequence_on_small_board() {
    let mut board = Board::new(4, 4, false).unwrap();
    board.place_ship(&[0, 1, 2]).unwrap();

    assert_eq!(board.shoot(0).unwrap(), ShotResult::Hit);
    assert_eq!(board.ship_just_sunk(), None);
    assert_eq!(board.shoot(1).unwrap(), ShotResult::Hit);
    assert!(!board.game_over());
    assert_eq!(board.shoot(2).unwrap(), ShotResult::Sunk(3));
    assert!(board.last_shot_hit());
    assert_eq!(board.ship_just_sunk(), Some(3));
    assert!(board.game_over());
    assert_eq!(board.sunk(), &[true]);
}

#[test]
fn test_misses_never_sink() {
    let mut board = Board::new(4, 4, false).unwrap();
    board.place_ship(&[0, 1, 2]).unwrap();

    for pos in [3, 4] {
        assert_eq!(board.shoot(pos).unwrap(), ShotResult::Miss);
        assert!(!board.last_shot_hit());
        assert_eq!(board.ship_just_sunk(), None);
    }
    assert_eq!(board.shoot(0).unwrap(), ShotResult::Hit);
    assert_eq!(board.shoot(1).unwrap(), ShotResult::Hit);
    assert_eq!(board.shoot(2).unwrap(), ShotResult::Sunk(3));
    assert!(board.game_over());
    assert_eq!(board.shots()[3], Shot::Miss);
    assert_eq!(board.shot_counts(), (11, 3, 2));
}

#[test]
fn test_sunk_flag_is_transient() {
    let mut board = Board::new(5, 5, false).unwrap();
    board.place_ship(&[0, 1]).unwrap();
    board.place_ship(&[10, 11]).unwrap();
    board.shoot(0).unwrap();
    assert_eq!(board.shoot(1).unwrap(), ShotResult::Sunk(2));
    assert_eq!(board.shoot(10).unwrap(), ShotResult::Hit);
    assert_eq!(board.ship_just_sunk(), None);
    assert_eq!(board.sunk(), &[true, false]);
    assert!(!board.game_over());
}

#[test]
fn test_place_ship_sorts_and_rejects_overlap() {
    let mut board = Board::new(10, 10, false).unwrap();
    board.place_ship(&[22, 2, 12]).unwrap();
    assert_eq!(board.placements()[0].cells(), &[2, 12, 22]);
    for c in [2, 12, 22] {
        assert!(board.occupancy()[c]);
    }
    assert!(matches!(
        board.place_ship(&[11, 12, 13]),
        Err(BoardError::InvalidPlacement { .. })
    ));
    assert_eq!(board.placements().len(), 1);
    assert_eq!(board.occupancy().iter().filter(|&&o| o).count(), 3);
}

#[test]
fn test_place_ship_rejects_illegal_shapes() {
    let mut board = Board::new(4, 4, false).unwrap();
    // wraps from row 0 into row 1
    assert!(matches!(board.place_ship(&[3, 4]), Err(BoardError::InvalidPlacement { .. })));
    // gap
    assert!(matches!(board.place_ship(&[0, 2]), Err(BoardError::InvalidPlacement { .. })));
    // off the board
    assert!(matches!(board.place_ship(&[15, 16]), Err(BoardError::InvalidPlacement { .. })));
    // longer than any line
    assert!(matches!(
        board.place_ship(&[0, 1, 2, 3, 4]),
        Err(BoardError::InvalidPlacement { .. })
    ));
    assert!(matches!(board.place_ship(&[]), Err(BoardError::InvalidPlacement { .. })));
    assert!(board.placements().is_empty());
    assert!(board.occupancy().iter().all(|&o| !o));
}

#[test]
fn test_no_touch_spacing() {
    let mut board = Board::new(5, 5, true).unwrap();
    board.place_ship(&[6, 7]).unwrap();
    // orthogonally adjacent
    assert!(board.place_ship(&[8, 9]).is_err());
    assert!(board.place_ship(&[11, 12]).is_err());
    // diagonal contact is allowed
    board.place_ship(&[13, 14]).unwrap();

    let mut loose = Board::new(5, 5, false).unwrap();
    loose.place_ship(&[6, 7]).unwrap();
    loose.place_ship(&[8, 9]).unwrap();
}

#[test]
fn test_random_fleet_places_every_ship() {
    let mut board = Board::new(10, 10, true).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    board.place_random_fleet(&mut rng, &[5, 4, 3, 3, 2]).unwrap();
    let lens: Vec<usize> = board.placements().iter().map(|p| p.len()).collect();
    assert_eq!(lens, vec![5, 4, 3, 3, 2]);
    assert_eq!(board.occupancy().iter().filter(|&&o| o).count(), 17);
    assert_eq!(board.sunk().len(), 5);
}

#[test]
fn test_random_fleet_exhaustion_rolls_back() {
    let mut board = Board::new(3, 3, false).unwrap();
    board.place_ship(&[0]).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let err = board
        .place_random_fleet(&mut rng, &[3, 3, 3, 3])
        .unwrap_err();
    assert!(matches!(err, BoardError::PlacementExhausted { length: 3 }));
    // only the ship placed before the call survives
    assert_eq!(board.placements().len(), 1);
    assert_eq!(board.occupancy().iter().filter(|&&o| o).count(), 1);
}

#[test]
fn test_random_fleet_rejects_oversized_ship() {
    let mut board = Board::new(3, 3, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(matches!(
        board.place_random_fleet(&mut rng, &[4]),
        Err(BoardError::ShipTooLong { length: 4, max: 3 })
    ));
}

#[test]
fn test_shoot_errors() {
    let mut board = Board::new(4, 4, false).unwrap();
    board.place_ship(&[0]).unwrap();
    assert_eq!(
        board.shoot(16).unwrap_err(),
        BoardError::OutOfRange { position: 16, size: 16 }
    );
    board.shoot(5).unwrap();
    assert_eq!(board.shoot(5).unwrap_err(), BoardError::AlreadyShot { position: 5 });
    assert_eq!(board.shoot(0).unwrap(), ShotResult::Sunk(1));
    assert_eq!(board.shoot(1).unwrap_err(), BoardError::GameOver);
}

#[test]
fn test_forfeit_ends_game() {
    let mut board = Board::new(10, 10, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    board.place_random_fleet(&mut rng, &[5, 4]).unwrap();
    board.forfeit();
    assert!(board.forfeited());
    assert!(board.game_over());
    assert!(board.sunk().iter().all(|&s| s));

    let mut empty = Board::new(4, 4, false).unwrap();
    empty.forfeit();
    assert!(empty.game_over());
}

#[test]
fn test_reset_keeps_geometry() {
    let mut board = Board::new(6, 4, true).unwrap();
    let before = board.legal_placements(3).unwrap();
    board.place_ship(&[0, 1, 2]).unwrap();
    board.shoot(0).unwrap();
    board.forfeit();
    board.reset();

    assert!(board.placements().is_empty());
    assert!(board.sunk().is_empty());
    assert!(board.shots().iter().all(|s| !s.is_shot()));
    assert!(board.occupancy().iter().all(|&o| !o));
    assert!(!board.game_over());
    assert!(!board.forfeited());
    assert!(!board.last_shot_hit());
    assert_eq!((board.width(), board.height(), board.no_touch()), (6, 4, true));
    assert_eq!(board.legal_placements(3).unwrap(), before);
    board.place_ship(&[0, 1, 2]).unwrap();
}

#[test]
fn test_state_snapshot() {
    let mut board = Board::new(4, 4, false).unwrap();
    board.place_ship(&[0, 4]).unwrap();
    board.shoot(4).unwrap();
    let state = board.state();
    assert_eq!(state.placements, board.placements().to_vec());
    assert_eq!(state.shots[4], Shot::Hit);
    assert_eq!(state.sunk, vec![false]);
    assert!(state.last_shot_hit);
    assert_eq!(state.ship_just_sunk, None);

    // the snapshot does not follow later shots
    board.shoot(0).unwrap();
    assert_eq!(state.shots[0], Shot::Untouched);
    assert!(!state.game_over);

    let sunk = board.state();
    assert_eq!(sunk.ship_just_sunk, Some(2));
    assert!(sunk.last_shot_hit && sunk.game_over);
}
