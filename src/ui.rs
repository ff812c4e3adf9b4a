#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;

use crate::board::{Board, Shot};
use crate::coord::column_label;

/// Render a board as text: `.` for unknown, `X` for hits and `o` for misses.
/// Revealed boards also number the untouched cells of each ship.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let width = board.width();
    let row_digits = board.height().to_string().len();
    let mut ship_at = vec![None; board.size()];
    if reveal {
        for (i, ship) in board.placements().iter().enumerate() {
            for c in ship.iter() {
                ship_at[c] = Some(i + 1);
            }
        }
    }
    let cell_width = if reveal {
        board.placements().len().to_string().len().max(1)
    } else {
        1
    };

    let mut out = String::new();
    let _ = write!(out, "{:>w$} ", "", w = row_digits);
    for c in 0..width {
        let _ = write!(out, " {:>w$}", column_label(c).unwrap_or('?'), w = cell_width);
    }
    out.push('\n');
    for r in 0..board.height() {
        let _ = write!(out, "{:>w$} ", r + 1, w = row_digits);
        for c in 0..width {
            let pos = r * width + c;
            let glyph = match (board.shots()[pos], ship_at[pos]) {
                (Shot::Hit, _) => "X".to_string(),
                (Shot::Miss, _) => "o".to_string(),
                (Shot::Untouched, Some(n)) => n.to_string(),
                (Shot::Untouched, None) => ".".to_string(),
            };
            let _ = write!(out, " {:>w$}", glyph, w = cell_width);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_board_shows_shots_only() {
        let mut board = Board::new(3, 2, false).unwrap();
        board.place_ship(&[0, 1]).unwrap();
        board.shoot(0).unwrap();
        board.shoot(5).unwrap();
        let text = render_board(&board, false);
        assert_eq!(text, "   A B C\n1  X . .\n2  . . o\n");
    }

    #[test]
    fn revealed_board_numbers_ships() {
        let mut board = Board::new(3, 2, false).unwrap();
        board.place_ship(&[0, 1]).unwrap();
        board.place_ship(&[5]).unwrap();
        let text = render_board(&board, true);
        assert_eq!(text, "   A B C\n1  1 1 .\n2  . . 2\n");
    }

    #[test]
    fn revealed_hits_stay_marked() {
        let mut board = Board::new(3, 1, false).unwrap();
        board.place_ship(&[0, 1]).unwrap();
        board.shoot(1).unwrap();
        board.shoot(2).unwrap();
        assert_eq!(render_board(&board, true), "   A B C\n1  1 X o\n");
    }
}
