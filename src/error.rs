use crate::tiles::Tile;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors encountered when parsing tiles, pieces, board strings or move text.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// Tried to parse a string, but it was not the expected length. The given `usize` is the
    /// actual length.
    #[error("unexpected string length {0}")]
    BadStringLen(usize),
    /// Tried to parse a multi-line (or multi-row) string but encountered a row that was not the
    /// expected length. The given `usize` is the actual length.
    #[error("unexpected row length {0}")]
    BadLineLen(usize),
    /// Encountered an unexpected character in a string.
    #[error("unexpected character '{0}'")]
    BadChar(char),
    /// Tried to parse an empty string.
    #[error("empty string")]
    EmptyString,
    /// Could not parse an integer from a string.
    #[error("bad integer: {0}")]
    BadInt(#[from] ParseIntError),
    /// The string could not be parsed as a tile.
    #[error("bad tile '{0}'")]
    BadTile(String),
    /// The string could not be parsed as a move segment.
    #[error("bad move segment '{0}'")]
    BadSegment(String),
    /// A generic error type where the given string could not be parsed for some reason.
    #[error("could not parse '{0}'")]
    BadString(String),
}

/// A ruleset could not be built. These errors are fatal for the game being constructed.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// The variant identifier does not have the form `family-size-setup-marker`.
    #[error("malformed variant identifier '{0}'")]
    BadVariantId(String),
    /// The board size component is not a number, or is outside the supported range.
    #[error("unsupported board size '{0}'")]
    BadBoardSize(String),
    /// The first player marker is not recognised.
    #[error("unknown first player marker '{0}'")]
    BadFirstPlayer(String),
    /// No ruleset family has the given name.
    #[error("unknown ruleset family '{0}'")]
    UnknownFamily(String),
    /// There is no setup of the given name for the given board size.
    #[error("no setup '{name}' for a {size}x{size} board")]
    UnsupportedSetup { size: u8, name: String },
    /// A persisted history does not fit the variant it was saved with.
    #[error("history does not match the variant's board")]
    HistoryMismatch,
    /// A built-in setup or a persisted board could not be parsed.
    #[error("bad board: {0}")]
    BadBoard(#[from] ParseError),
}

/// A board operation would break one of the board's invariants. These indicate a bug in the
/// caller and are never the result of bad user input.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// Tried to move or remove a piece from an empty tile.
    #[error("no piece at {0}")]
    NoPiece(Tile),
    /// Tried to place a piece on a tile that is already occupied.
    #[error("tile {0} is already occupied")]
    TileOccupied(Tile),
    /// The tile is not on the board.
    #[error("tile {0} is out of bounds")]
    OutOfBounds(Tile),
    /// Tried to place a second defending king.
    #[error("the board already has a king")]
    DuplicateKing,
}

/// The reasons a piece of move text may be rejected. These are reason codes only; turning them
/// into messages for humans is left to the hosting application.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum InvalidPlay {
    /// The text could not be parsed.
    #[error("malformed move text: {0}")]
    Malformed(#[from] ParseError),
    /// A tile named in the move is not on the board.
    #[error("tile {0} is out of bounds")]
    OutOfBounds(Tile),
    /// There is no piece on the move's initial origin.
    #[error("no piece at {0}")]
    NoPiece(Tile),
    /// The piece on the move's initial origin belongs to the other player.
    #[error("the piece at {0} belongs to the other player")]
    WrongPlayer(Tile),
    /// A segment does not start where the previous one ended.
    #[error("segment starts at {found} but the previous segment ended at {expected}")]
    NotContiguous { expected: Tile, found: Tile },
    /// A tile carries the wrong piece prefix.
    #[error("wrong piece prefix at {0}")]
    WrongPrefix(Tile),
    /// The destination is not reachable by the moving piece at this point in the move.
    #[error("{0} is not a legal destination")]
    IllegalDestination(Tile),
    /// A further segment was given but the move may not continue.
    #[error("the move cannot continue from {0}")]
    NoContinuation(Tile),
    /// A capture names a tile with no piece on it.
    #[error("no piece to capture at {0}")]
    CaptureEmptyTile(Tile),
    /// A capture names one of the mover's own pieces.
    #[error("cannot capture own piece at {0}")]
    CaptureOwnPiece(Tile),
    /// The captures listed for a segment differ from the captures the segment makes.
    #[error("wrong captures for segment ending at {0}")]
    WrongCaptures(Tile),
    /// The text is a legal move but not written in its canonical form (given).
    #[error("non-canonical move text, expected '{0}'")]
    NotCanonical(String),
}

/// Errors returned when trying to apply a play to a game.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PlayError {
    /// The game is already over.
    #[error("the game is over")]
    GameOver,
    /// The move text describes a move that has not been finished.
    #[error("the move is incomplete")]
    Incomplete,
    /// The move text is invalid.
    #[error(transparent)]
    Invalid(#[from] InvalidPlay),
    /// Applying the move broke a board invariant.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A history index does not refer to a stored state.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum HistoryError {
    #[error("history index {index} out of range for history of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}
