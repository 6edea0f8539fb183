//! Interactive N-Queens puzzle.
//!
//! The player places queens on an N×N board; [`evaluator`] decides which
//! cells are threatened and whether the board is solved, [`game`] turns
//! clicks into placements, and [`app`] draws everything with egui.

pub mod app;
pub mod board;
pub mod clock;
pub mod evaluator;
pub mod game;

pub use app::QueensApp;
pub use board::{BoardSize, BoardSizeError, Position, QueenSet};
pub use evaluator::{
    has_queen, is_attacked, is_game_complete, is_in_range, is_valid_queen_placement, CellState,
};
pub use game::{ClickOutcome, Game, PlacementRule, RejectReason};
