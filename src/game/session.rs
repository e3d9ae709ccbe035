//! Interactive Game Session
//!
//! Runs the draw-to-play loop: every input is a coordinate trace read from
//! the sensor seam and classified against the reference library. Empty
//! reads, unrecognized drawings, bad digits, and taken cells all re-prompt;
//! only the coordinate source itself failing ends the session early.

use crate::game::board::{Board, Mark};
use crate::matching::PatternClassifier;
use crate::store::ReferenceLibrary;
use crate::trace::CoordinateSource;
use std::time::Duration;
use tracing::{debug, info};

/// Consecutive unusable reads tolerated before giving up.
///
/// Interactive players get plenty of retries; a scripted source that ran
/// dry stops the session instead of spinning forever.
const MAX_CONSECUTIVE_RETRIES: usize = 25;

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    /// The winning mark, or None on a draw
    pub winner: Option<Mark>,
    /// Total moves placed on the board
    pub moves: usize,
}

/// Tic-tac-toe session over a coordinate source.
pub struct GameSession<S> {
    source: S,
    classifier: PatternClassifier,
    library: ReferenceLibrary,
    timeout: Duration,
}

impl<S: CoordinateSource> GameSession<S> {
    pub fn new(
        source: S,
        classifier: PatternClassifier,
        library: ReferenceLibrary,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            classifier,
            library,
            timeout,
        }
    }

    /// Run a full game: choose a symbol, then alternate drawn moves until
    /// a win or a draw.
    pub fn play(&mut self) -> crate::Result<GameOutcome> {
        println!("Welcome to Tic Tac Toe! First, choose your symbol.");
        let player = self.choose_symbol()?;
        println!("You have chosen: {player}");
        println!("Starting Tic Tac Toe... Draw numbers (1-9) to place your move.");

        let mut board = Board::new();
        let mut current = player;
        let mut moves = 0;
        println!("{board}");

        loop {
            let cell = self.read_move(current, &board)?;
            board.place(cell, current);
            moves += 1;
            println!("{board}");

            if let Some(winner) = board.winner() {
                println!("Player {winner} wins!");
                info!(winner = %winner, moves, "Game over");
                return Ok(GameOutcome {
                    winner: Some(winner),
                    moves,
                });
            }
            if board.is_full() {
                println!("It's a draw!");
                info!(moves, "Game over: draw");
                return Ok(GameOutcome {
                    winner: None,
                    moves,
                });
            }

            current = current.opponent();
        }
    }

    /// Ask the user to draw X or O until one is recognized.
    fn choose_symbol(&mut self) -> crate::Result<Mark> {
        let mut retries = 0;
        loop {
            println!("Draw 'X' or 'O' to choose your symbol:");
            match self.read_label()? {
                Some(label) => {
                    if let Some(mark) = Mark::from_label(&label) {
                        return Ok(mark);
                    }
                    println!("Invalid choice. Please draw 'X' or 'O' to continue.");
                }
                None => {
                    println!("No usable drawing received. Please try again.");
                }
            }
            retries += 1;
            if retries >= MAX_CONSECUTIVE_RETRIES {
                return Err(crate::Error::Sensor(
                    "no usable input after repeated attempts".to_string(),
                ));
            }
        }
    }

    /// Ask the current player for a digit naming a free cell.
    fn read_move(&mut self, player: Mark, board: &Board) -> crate::Result<usize> {
        let mut retries = 0;
        loop {
            println!("Player {player}, draw a number (1-9) to place your move:");
            match self.read_label()? {
                Some(label) => match label.parse::<usize>() {
                    Ok(cell) if (1..=9).contains(&cell) => {
                        if board.is_free(cell) {
                            return Ok(cell);
                        }
                        println!("That position is already taken. Try another.");
                    }
                    _ => {
                        println!("Invalid input. Please draw a valid number (1-9).");
                    }
                },
                None => {
                    println!("No usable drawing received. Please try again.");
                }
            }
            retries += 1;
            if retries >= MAX_CONSECUTIVE_RETRIES {
                return Err(crate::Error::Sensor(
                    "no usable input after repeated attempts".to_string(),
                ));
            }
        }
    }

    /// One read-and-classify round.
    ///
    /// Returns the recognized label, or None for anything worth a retry:
    /// an empty (timed-out) read, an unusable trace, or a low-confidence
    /// classification.
    fn read_label(&mut self) -> crate::Result<Option<String>> {
        let trace = self.source.read_coordinates(self.timeout)?;
        if trace.is_empty() {
            println!("Error: No coordinates received. Check if the sensor is connected properly.");
            return Ok(None);
        }

        match self.classifier.classify(&trace, &self.library) {
            Ok(Some(m)) => {
                debug!(label = %m.label, similarity = m.similarity, "Drawing recognized");
                Ok(Some(m.label))
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_retryable() => {
                debug!(error = %e, "Unusable trace");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
