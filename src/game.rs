//! Placement controller: owns the queens, the board size and the clock.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BoardSize, Position, QueenSet};
use crate::clock::{GameClock, Instant};
use crate::evaluator::{self, CellState};

/// How strictly clicks on empty cells are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementRule {
    /// Any empty in-bounds cell is accepted while the board has room;
    /// conflicting queens stay on the board and show as attacked.
    #[default]
    Free,
    /// Only cells out of range of every queen are accepted.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OutOfBounds,
    BoardFull,
    UnderAttack,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RejectReason::OutOfBounds => "outside the board",
            RejectReason::BoardFull => "every queen is already placed",
            RejectReason::UnderAttack => "square is under attack",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed,
    /// A queen was placed and the board is now solved.
    Solved,
    Removed,
    Rejected(RejectReason),
    /// The board is frozen because the puzzle is already solved.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Game {
    board_size: BoardSize,
    queens: QueenSet,
    clock: GameClock,
    complete: bool,
    placement: PlacementRule,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl Game {
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            queens: QueenSet::new(),
            clock: GameClock::default(),
            complete: false,
            placement: PlacementRule::default(),
        }
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn queens(&self) -> &QueenSet {
        &self.queens
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn placement_rule(&self) -> PlacementRule {
        self.placement
    }

    pub fn set_placement_rule(&mut self, rule: PlacementRule) {
        if self.placement != rule {
            log::debug!("placement rule {:?} -> {:?}", self.placement, rule);
            self.placement = rule;
        }
    }

    pub fn cell_state(&self, position: Position) -> CellState {
        evaluator::cell_state(position, self.queens.as_slice())
    }

    /// Text of the completion banner, present exactly while the board is solved.
    pub fn banner(&self) -> Option<String> {
        self.complete.then(|| {
            format!(
                "Congratulations! You solved the {}-Queens puzzle!",
                self.board_size.get()
            )
        })
    }

    /// Changes the board dimension. Any size change discards every placement.
    pub fn set_board_size(&mut self, board_size: BoardSize) {
        if board_size == self.board_size {
            return;
        }
        log::info!("board size {} -> {}", self.board_size, board_size);
        self.board_size = board_size;
        self.clear();
    }

    /// Starts over on the current board.
    pub fn reset(&mut self) {
        log::info!("new game on {} board", self.board_size);
        self.clear();
    }

    fn clear(&mut self) {
        self.queens = QueenSet::new();
        self.clock.reset();
        self.complete = false;
    }

    /// Handles a click on `position`: toggles a queen there if allowed.
    pub fn click(&mut self, position: Position, now: Instant) -> ClickOutcome {
        if self.complete {
            return ClickOutcome::Ignored;
        }
        self.clock.start(now);

        let n = self.board_size.get();
        let queens = self.queens.as_slice();
        let outcome = if !position.is_within(n) {
            ClickOutcome::Rejected(RejectReason::OutOfBounds)
        } else if evaluator::has_queen(position, queens) {
            self.queens = self.queens.without(position);
            ClickOutcome::Removed
        } else if queens.len() >= n {
            ClickOutcome::Rejected(RejectReason::BoardFull)
        } else if self.placement == PlacementRule::Strict
            && !evaluator::is_valid_queen_placement(position, queens, n)
        {
            ClickOutcome::Rejected(RejectReason::UnderAttack)
        } else {
            self.queens = self.queens.with(position);
            ClickOutcome::Placed
        };

        match outcome {
            ClickOutcome::Placed | ClickOutcome::Removed => {
                log::debug!("{:?} {} ({} queens)", outcome, position.label(), self.queens.len());
                if self.refresh_completion(now) {
                    return ClickOutcome::Solved;
                }
            }
            ClickOutcome::Rejected(reason) => {
                log::debug!("rejected {}: {:?}", position, reason);
            }
            ClickOutcome::Solved | ClickOutcome::Ignored => {}
        }
        outcome
    }

    /// Re-evaluates the win condition; true on the transition to solved.
    fn refresh_completion(&mut self, now: Instant) -> bool {
        let n = self.board_size.get();
        let solved = evaluator::is_game_complete(self.queens.as_slice(), n);
        let newly_solved = solved && !self.complete;
        self.complete = solved;
        if newly_solved {
            self.clock.stop(now);
            log::info!(
                "solved {} board in {}",
                self.board_size,
                crate::clock::format_elapsed(self.clock.elapsed(now))
            );
        }
        newly_solved
    }
}
