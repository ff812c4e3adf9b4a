use std::io::{self, Cursor};

use battleships::{Board, DensityTargeter, HumanPlayer, Player, DEFAULT_FLEET};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn scripted(input: &str) -> HumanPlayer {
    HumanPlayer::with_input("Tester", &DEFAULT_FLEET, Cursor::new(input.to_string()))
}

fn lengths(board: &Board) -> Vec<usize> {
    board.placements().iter().map(|p| p.len()).collect()
}

#[test]
fn test_closed_input_places_whole_fleet() {
    let mut player = HumanPlayer::with_input("Tester", &DEFAULT_FLEET, io::empty());
    let mut board = Board::new(10, 10, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    player.place_ships(&mut rng, &mut board, &DEFAULT_FLEET).unwrap();
    assert_eq!(lengths(&board), vec![5, 4, 3, 3, 2]);
    assert_eq!(board.occupancy().iter().filter(|&&o| o).count(), 17);
}

#[test]
fn test_input_closing_at_orientation_places_rest() {
    let mut player = scripted("A1\n");
    let mut board = Board::new(10, 10, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(2);
    player.place_ships(&mut rng, &mut board, &DEFAULT_FLEET).unwrap();
    assert_eq!(lengths(&board), vec![5, 4, 3, 3, 2]);
}

#[test]
fn test_manual_then_random_placement() {
    // bad label and bad orientation are re-prompted, ENTER places randomly
    let mut player = scripted("Z99\nA1\nsideways\nA1\nd\nc3\nr\n\n");
    let mut board = Board::new(10, 10, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    player.place_ships(&mut rng, &mut board, &DEFAULT_FLEET).unwrap();
    assert_eq!(board.placements()[0].cells(), &[0, 10, 20, 30, 40]);
    assert_eq!(board.placements()[1].cells(), &[22, 23, 24, 25]);
    assert_eq!(lengths(&board), vec![5, 4, 3, 3, 2]);
}

#[test]
fn test_obstructed_placement_is_retried() {
    let mut player = scripted("A1\nr\nA1\nd\nB2\nr\n");
    let mut board = Board::new(10, 10, true).unwrap();
    let mut rng = SmallRng::seed_from_u64(4);
    player.place_ships(&mut rng, &mut board, &[5, 4]).unwrap();
    // A1 down overlaps the first ship, B2 right touches it under no-touch,
    // so the second ship falls back to random placement
    assert_eq!(board.placements()[0].cells(), &[0, 1, 2, 3, 4]);
    assert_eq!(lengths(&board), vec![5, 4]);
}

#[test]
fn test_target_selection() {
    let mut board = Board::new(10, 10, false).unwrap();
    board.place_ship(&[50, 51]).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);

    let mut player = scripted("b1\n");
    assert_eq!(player.select_target(&mut rng, &board), Some(1));

    board.shoot(1).unwrap();
    let mut player = scripted("B1\nK1\nC1\n");
    assert_eq!(player.select_target(&mut rng, &board), Some(2));

    let mut advisor = DensityTargeter::new(&DEFAULT_FLEET);
    advisor.initialize(&board);
    let mut player = scripted("\n");
    assert_eq!(player.select_target(&mut rng, &board), advisor.next_shot(&board));
}

#[test]
fn test_forfeit_and_closed_input_give_up() {
    let board = Board::new(10, 10, false).unwrap();
    let mut rng = SmallRng::seed_from_u64(6);
    assert_eq!(scripted("FF\n").select_target(&mut rng, &board), None);
    assert_eq!(scripted("").select_target(&mut rng, &board), None);
}
