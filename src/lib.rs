#[macro_use]
mod utils;
pub mod board;
pub mod collections;
pub mod error;
pub mod game;
pub mod pieces;
pub mod play;
pub mod preset;
pub mod rules;
pub mod tile_iter;
pub mod tiles;
#[cfg(feature = "serde")]
mod serde_utils;

pub use crate::{
    game::{
        Game,
        GameStatus,
        GameOutcome,
        WinReason,
        DrawReason,
        validate::MoveValidity,
        state::GameplayState,
    },
    board::{
        BoardState,
        BoardGeometry,
    },
    collections::PieceSet,
    error::{
        ParseError,
        ConfigError,
        BoardError,
        PlayError,
        InvalidPlay,
        HistoryError,
    },
    pieces::{
        Piece,
        PieceKind,
        Side,
    },
    rules::{
        Ruleset,
        EscapeType,
        Strength,
        CapturePower,
        JumpMode,
        Movement,
        RepetitionRule,
    },
    tiles::{
        Coords,
        Tile,
        Direction,
    },
    play::{
        Play,
        PartialPlay,
        normalize,
        extract_captures,
    },
    preset::Variant,
};
