use crate::board::BoardState;
use crate::error::ParseError;
use crate::game::GameStatus;
use crate::game::GameStatus::Ongoing;
use crate::pieces::Side;
use std::fmt::Display;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The minimum information needed to tell whether two positions in a game are the same.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position<'a> {
    pub board: &'a BoardState,
    pub side_to_play: Side,
}

impl<'a> From<&'a GameplayState> for Position<'a> {
    fn from(state: &'a GameplayState) -> Self {
        Self { board: &state.board, side_to_play: state.side_to_play }
    }
}

impl Display for Position<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.board.to_fen(), self.side_to_play)
    }
}

/// Everything that changes from one ply to the next. A game's history is a list of these, one
/// per ply plus the starting position, and any of them can be restored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameplayState {
    /// Board state, ie, the current pieces on the board.
    pub board: BoardState,
    /// The side whose turn it is.
    pub side_to_play: Side,
    /// The text of the play that led to this state, if any.
    pub last_move: Option<String>,
    /// Current status of the game.
    pub status: GameStatus,
}

impl GameplayState {
    /// The state at the start of a game.
    pub fn new(board: BoardState, side_to_play: Side) -> Self {
        Self { board, side_to_play, last_move: None, status: Ongoing }
    }

    /// Build a starting state from a board in FEN format.
    pub fn from_fen(fen: &str, side_to_play: Side) -> Result<Self, ParseError> {
        Ok(Self::new(BoardState::from_fen(fen)?, side_to_play))
    }

    pub fn position(&self) -> Position<'_> {
        Position::from(self)
    }
}

/// Count how many of the given states share a position with the given board and side to play.
pub fn count_occurrences(history: &[GameplayState], board: &BoardState, side_to_play: Side) -> usize {
    let posn = Position { board, side_to_play };
    history.iter().filter(|s| s.position() == posn).count()
}
