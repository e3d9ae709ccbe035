//! Tic-tac-toe played by drawing
//!
//! The game consumes the classifier as an input modality: players choose a
//! symbol by drawing `X` or `O` and place moves by drawing digits 1-9.

pub mod board;
pub mod session;

pub use board::{Board, Mark};
pub use session::{GameOutcome, GameSession};
