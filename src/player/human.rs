#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;
use std::vec::Vec;

use rand::rngs::SmallRng;

use super::Player;
use crate::ai::DensityTargeter;
use crate::board::Board;
use crate::common::{BoardError, ShotResult};
use crate::coord::{parse_label, render_label, CoordError};
use crate::ui::render_board;

/// Interactive player reading placements and shots line by line, from
/// stdin unless another reader is supplied.
pub struct HumanPlayer {
    name: String,
    advisor: DensityTargeter,
    input: Box<dyn BufRead + Send>,
}

impl HumanPlayer {
    pub fn new(name: &str, fleet: &[usize]) -> Self {
        Self::with_input(name, fleet, io::BufReader::new(io::stdin()))
    }

    pub fn with_input(name: &str, fleet: &[usize], input: impl BufRead + Send + 'static) -> Self {
        Self {
            name: name.to_string(),
            advisor: DensityTargeter::new(fleet),
            input: Box::new(input),
        }
    }

    /// Read one trimmed line, `None` on end of input.
    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{}", message);
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

/// Parse a label, accepting lowercase columns on boards that only use `A-Z`.
fn parse_input(input: &str, board: &Board) -> Result<usize, CoordError> {
    if board.width() <= 26 {
        parse_label(&input.to_ascii_uppercase(), board.width(), board.height())
    } else {
        parse_label(input, board.width(), board.height())
    }
}

/// Cells of a ship of `length` starting at `start` and running right or down.
/// Runs leaving the board are returned as-is and rejected by the board.
fn ship_cells(board: &Board, start: usize, length: usize, down: bool) -> Vec<usize> {
    let step = if down { board.width() } else { 1 };
    (0..length).map(|i| start + i * step).collect()
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, opponent: &Board) {
        self.advisor.initialize(opponent);
    }

    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[usize],
    ) -> Result<(), BoardError> {
        println!(
            "{}, it's time to place your ships. Ships extend right or down from the starting field.",
            self.name
        );
        for (i, &length) in fleet.iter().enumerate() {
            loop {
                println!("\nPlace ship of length {}. This is your board:", length);
                print!("{}", render_board(board, true));
                // input closed: the rest of the fleet goes down at random
                let Some(input) = self.prompt("Starting field (ENTER for random): ") else {
                    return board.place_random_fleet(rng, &fleet[i..]);
                };
                if input.is_empty() {
                    board.place_random_fleet(rng, &[length])?;
                    break;
                }
                let start = match parse_input(&input, board) {
                    Ok(pos) => pos,
                    Err(e) => {
                        println!("This is not a valid position: {}. Please try again.", e);
                        continue;
                    }
                };
                let Some(orient) = self.prompt("Orientation [down/d/right/r]: ") else {
                    return board.place_random_fleet(rng, &fleet[i..]);
                };
                let orient = orient.to_ascii_lowercase();
                let down = match orient.as_str() {
                    "down" | "d" => true,
                    "right" | "r" => false,
                    _ => {
                        println!("This is not a valid orientation. Please try again.");
                        continue;
                    }
                };
                match board.place_ship(&ship_cells(board, start, length, down)) {
                    Ok(()) => break,
                    Err(BoardError::InvalidPlacement { .. }) => {
                        println!("Some locations seem to be obstructed or off the board.");
                        if board.no_touch() {
                            println!(
                                "Spacing is enforced: ships may not touch directly (diagonals are fine)."
                            );
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    fn select_target(&mut self, _rng: &mut SmallRng, opponent: &Board) -> Option<usize> {
        println!("\n{}, it is your turn. This is the opponent board:", self.name);
        print!("{}", render_board(opponent, false));
        let suggestion = self.advisor.next_shot(opponent);
        loop {
            let hint = suggestion
                .map(|p| format!(" [suggested: {}]", render_label(p, opponent.width())))
                .unwrap_or_default();
            let input = self.prompt(&format!("Target{} ('ff' to forfeit): ", hint))?;
            if input.eq_ignore_ascii_case("ff") {
                return None;
            }
            if input.is_empty() {
                if let Some(pos) = suggestion {
                    return Some(pos);
                }
                continue;
            }
            match parse_input(&input, opponent) {
                Ok(pos) if opponent.shots()[pos].is_shot() => {
                    println!("This position was already shot at. Please try again.");
                }
                Ok(pos) => return Some(pos),
                Err(e) => println!("This is not a valid position: {}. Please try again.", e),
            }
        }
    }

    fn handle_shot_result(&mut self, opponent: &Board, pos: usize, result: ShotResult) {
        self.advisor.on_shot_result(opponent, pos, result);
    }

    fn reset(&mut self) {
        self.advisor.reset();
    }
}
