use crate::pieces::{Piece, PieceKind, Side};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of (unplaced) pieces, ie, combinations of side and piece kind. Rulesets use these to
/// describe which pieces a rule applies to (who may enter the throne, what a corner is hostile
/// to, etc).
///
/// Implemented as a single byte with one bit per [`Piece::index`].
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceSet(u8);

impl From<PieceKind> for PieceSet {
    /// Create a new [`PieceSet`] which includes only the given kind (on each side).
    fn from(value: PieceKind) -> Self {
        Self::from_kind(value)
    }
}

impl From<Piece> for PieceSet {
    fn from(value: Piece) -> Self {
        Self::from_piece(value)
    }
}

impl From<Side> for PieceSet {
    /// Create a new [`PieceSet`] which includes every kind belonging to the given side.
    fn from(value: Side) -> Self {
        Self::from_side(value)
    }
}

impl From<Vec<Piece>> for PieceSet {
    fn from(value: Vec<Piece>) -> Self {
        value.into_iter().fold(Self::none(), |acc, piece| acc.with_piece(piece))
    }
}

impl PieceSet {
    /// Create a new empty [`PieceSet`].
    pub const fn none() -> Self {
        Self(0)
    }

    /// Create a new [`PieceSet`] which includes all pieces on both sides.
    pub const fn all() -> Self {
        Self(0b1111_1111)
    }

    /// Create a new [`PieceSet`] which includes the given kind (on both sides).
    ///
    /// **NOTE**: You can also use `PieceSet::from(kind)` for the same effect, but this function
    /// is `const`.
    pub const fn from_kind(kind: PieceKind) -> Self {
        Self(Self::kind_mask(kind))
    }

    /// Create a new [`PieceSet`] which includes only the given piece.
    pub const fn from_piece(piece: Piece) -> Self {
        Self(1 << piece.index())
    }

    /// Create a new [`PieceSet`] which includes every kind belonging to the given side.
    pub const fn from_side(side: Side) -> Self {
        Self(0b1111 << ((side as u8) * 4))
    }

    /// Every piece except those of the given kind.
    pub const fn all_but_kind(kind: PieceKind) -> Self {
        Self(!Self::kind_mask(kind))
    }

    const fn kind_mask(kind: PieceKind) -> u8 {
        (1 << (kind as u8)) | (1 << (kind as u8 + 4))
    }

    /// Return a copy of this [`PieceSet`] but with the given piece included.
    pub const fn with_piece(&self, piece: Piece) -> Self {
        Self(self.0 | (1 << piece.index()))
    }

    /// Return a copy of this [`PieceSet`] but with the given kind (both sides) included.
    pub const fn with_kind(&self, kind: PieceKind) -> Self {
        Self(self.0 | Self::kind_mask(kind))
    }

    /// Return a copy of this [`PieceSet`] but with the given piece removed.
    pub const fn without_piece(&self, piece: Piece) -> Self {
        Self(self.0 & !(1 << piece.index()))
    }

    /// Check whether the set contains the given piece.
    pub const fn contains(&self, piece: Piece) -> bool {
        self.0 & (1 << piece.index()) != 0
    }

    /// Check whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check whether the set contains all pieces.
    pub const fn is_all(&self) -> bool {
        self.0 == 0b1111_1111
    }
}
