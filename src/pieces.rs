use crate::error::ParseError;
use crate::error::ParseError::BadChar;
use crate::pieces::PieceKind::{Commander, King, Knight, Taflman};
use crate::pieces::Side::{Attacker, Defender};
use std::fmt::{Display, Formatter};
use std::ops::Not;
use std::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two sides of a tafl game.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// The side surrounding the king (player 1).
    Attacker = 0,
    /// The king's side (player 2).
    Defender = 1,
}

impl Side {
    /// The other side.
    pub fn other(&self) -> Self {
        match self {
            Attacker => Defender,
            Defender => Attacker,
        }
    }

    /// The player number (1 or 2) used by hosting applications.
    pub fn player(&self) -> u8 {
        match self {
            Attacker => 1,
            Defender => 2,
        }
    }

    /// The side controlled by the given player number.
    pub fn from_player(player: u8) -> Option<Self> {
        match player {
            1 => Some(Attacker),
            2 => Some(Defender),
            _ => None,
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.other()
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Attacker => write!(f, "attacker"),
            Defender => write!(f, "defender"),
        }
    }
}

/// The different kinds of piece. How each kind behaves is looked up in the
/// [`crate::rules::PieceRulesTable`] of the game's ruleset.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    King = 0,
    Taflman = 1,
    Knight = 2,
    Commander = 3,
}

impl PieceKind {
    pub const ALL: [PieceKind; 4] = [King, Taflman, Knight, Commander];

    /// The lowercase letter used for this kind in setup strings.
    pub fn letter(&self) -> char {
        match self {
            King => 'k',
            Taflman => 't',
            Knight => 'n',
            Commander => 'c',
        }
    }

    /// The prefix written before a tile in move text. The taflman is the default kind and has no
    /// prefix.
    pub fn prefix(&self) -> Option<char> {
        match self {
            Taflman => None,
            other => Some(other.letter().to_ascii_uppercase()),
        }
    }

    /// Parse a kind from a letter of either case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(King),
            't' => Some(Taflman),
            'n' => Some(Knight),
            'c' => Some(Commander),
            _ => None,
        }
    }
}

/// A single piece, ie, a kind of piece belonging to a side.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub const fn attacker(kind: PieceKind) -> Self {
        Self::new(kind, Attacker)
    }

    pub const fn defender(kind: PieceKind) -> Self {
        Self::new(kind, Defender)
    }

    pub const fn king() -> Self {
        Self::new(King, Defender)
    }

    pub fn is_king(&self) -> bool {
        self.kind == King
    }

    /// A stable index in `0..8`, used for per-piece lookup tables.
    pub const fn index(&self) -> usize {
        (self.side as usize) * 4 + (self.kind as usize)
    }
}

impl TryFrom<char> for Piece {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::from_letter(value).ok_or(BadChar(value))?;
        let side = if value.is_ascii_lowercase() { Attacker } else { Defender };
        Ok(Self::new(kind, side))
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        match piece.side {
            Attacker => piece.kind.letter(),
            Defender => piece.kind.letter().to_ascii_uppercase(),
        }
    }
}

impl FromStr for Piece {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::try_from(c),
            (None, _) => Err(ParseError::EmptyString),
            _ => Err(ParseError::BadStringLen(s.len())),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
