//! Board model: cell coordinates, the placed queens and the board dimension.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Smallest board the size selector offers.
pub const MIN_SELECTABLE: usize = 4;
/// Largest board the size selector offers.
pub const MAX_SELECTABLE: usize = 15;
/// Board size a fresh game starts with.
pub const DEFAULT_SIZE: usize = 8;

/// A zero-based board coordinate.
///
/// Coordinates are signed so that positions outside the board (for example
/// `(-1, 0)`) can be expressed and rejected by bounds checks instead of
/// being unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True when both coordinates lie in `[0, size)`.
    pub fn is_within(&self, size: usize) -> bool {
        let inside = |v: i32| usize::try_from(v).is_ok_and(|v| v < size);
        inside(self.row) && inside(self.col)
    }

    /// Chess-style label: files `a..` for columns, ranks `1..` for rows.
    pub fn label(&self) -> String {
        match u8::try_from(self.col) {
            Ok(c) if c < 26 => format!("{}{}", (b'a' + c) as char, self.row + 1),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Queens currently on the board, in the order they were placed.
///
/// Entries are unique. Updates never happen in place: [`QueenSet::with`] and
/// [`QueenSet::without`] return the replacement set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueenSet {
    queens: Vec<Position>,
}

impl QueenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.queens.iter()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.queens
    }

    pub fn contains(&self, position: Position) -> bool {
        self.queens.contains(&position)
    }

    /// Returns a set with `position` appended. Adding a queen that is already
    /// present leaves the set unchanged.
    #[must_use]
    pub fn with(&self, position: Position) -> Self {
        let mut queens = self.queens.clone();
        if !queens.contains(&position) {
            queens.push(position);
        }
        Self { queens }
    }

    /// Returns a set without the queen at `position`, keeping the order of
    /// the remaining queens.
    #[must_use]
    pub fn without(&self, position: Position) -> Self {
        Self {
            queens: self
                .queens
                .iter()
                .copied()
                .filter(|q| *q != position)
                .collect(),
        }
    }
}

impl FromIterator<Position> for QueenSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |set, p| set.with(p))
    }
}

impl<'a> IntoIterator for &'a QueenSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.queens.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardSizeError {
    #[error("board size must be at least 1")]
    Zero,
    #[error("board size {size} is outside the selectable range {min}..={max}")]
    OutOfRange { size: usize, min: usize, max: usize },
    #[error("invalid board size {0:?}")]
    Parse(String),
}

/// Side length of the square board. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    pub fn new(n: usize) -> Result<Self, BoardSizeError> {
        if n == 0 {
            return Err(BoardSizeError::Zero);
        }
        Ok(Self(n))
    }

    /// Like [`BoardSize::new`], but restricted to what the size selector offers.
    pub fn selectable(n: usize) -> Result<Self, BoardSizeError> {
        if !(MIN_SELECTABLE..=MAX_SELECTABLE).contains(&n) {
            return Err(BoardSizeError::OutOfRange {
                size: n,
                min: MIN_SELECTABLE,
                max: MAX_SELECTABLE,
            });
        }
        Self::new(n)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self(DEFAULT_SIZE)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}

impl FromStr for BoardSize {
    type Err = BoardSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<usize>()
            .map_err(|_| BoardSizeError::Parse(s.to_owned()))?;
        Self::selectable(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_bounds() {
        assert!(Position::new(0, 0).is_within(4));
        assert!(Position::new(3, 3).is_within(4));
        assert!(!Position::new(4, 0).is_within(4));
        assert!(!Position::new(0, 4).is_within(4));
        assert!(!Position::new(-1, 0).is_within(4));
        assert!(!Position::new(0, -1).is_within(4));
        assert!(!Position::new(0, 0).is_within(0));
    }

    #[test]
    fn position_labels() {
        assert_eq!(Position::new(0, 0).label(), "a1");
        assert_eq!(Position::new(7, 7).label(), "h8");
        assert_eq!(Position::new(2, -1).label(), "(2, -1)");
    }

    #[test]
    fn queen_set_keeps_click_order_and_uniqueness() {
        let set = QueenSet::new()
            .with(Position::new(2, 0))
            .with(Position::new(0, 1))
            .with(Position::new(2, 0));
        assert_eq!(set.as_slice(), &[Position::new(2, 0), Position::new(0, 1)]);

        let set = set.with(Position::new(3, 2)).without(Position::new(0, 1));
        assert_eq!(set.as_slice(), &[Position::new(2, 0), Position::new(3, 2)]);
    }

    #[test]
    fn removing_absent_queen_is_noop() {
        let set: QueenSet = [Position::new(1, 1)].into_iter().collect();
        assert_eq!(set.without(Position::new(0, 0)), set);
    }

    #[test]
    fn board_size_validation() {
        assert_eq!(BoardSize::new(0), Err(BoardSizeError::Zero));
        assert_eq!(BoardSize::new(1).map(BoardSize::get), Ok(1));
        assert_eq!(BoardSize::new(40).map(BoardSize::get), Ok(40));
        assert!(matches!(
            BoardSize::selectable(3),
            Err(BoardSizeError::OutOfRange { size: 3, .. })
        ));
        assert!(BoardSize::selectable(16).is_err());
        assert_eq!(BoardSize::selectable(15).map(BoardSize::get), Ok(15));
    }

    #[test]
    fn board_size_from_text() {
        assert_eq!(" 10 ".parse::<BoardSize>().map(BoardSize::get), Ok(10));
        assert_eq!(
            "ten".parse::<BoardSize>(),
            Err(BoardSizeError::Parse("ten".to_owned()))
        );
        assert!("30".parse::<BoardSize>().is_err());
    }

    #[test]
    fn selector_offers_four_through_fifteen() {
        assert!(BoardSize::selectable(MIN_SELECTABLE - 1).is_err());
        assert!((MIN_SELECTABLE..=MAX_SELECTABLE).all(|n| BoardSize::selectable(n).is_ok()));
        assert!(BoardSize::selectable(MAX_SELECTABLE + 1).is_err());
        assert_eq!(BoardSize::default().to_string(), "8×8");
    }
}
