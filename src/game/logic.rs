use crate::board::{BoardGeometry, BoardState};
use crate::pieces::PieceKind::{Commander, King, Knight, Taflman};
use crate::pieces::Side::{Attacker, Defender};
use crate::pieces::{Piece, PieceKind, Side};
use crate::play::PlaySegment;
use crate::rules::{EscapeType, PieceRules, Ruleset, Strength};
use crate::tiles::{Coords, Tile};
use std::collections::BTreeSet;

const ALL_PIECES: [Piece; 8] = [
    Piece::new(King, Attacker),
    Piece::new(Taflman, Attacker),
    Piece::new(Knight, Attacker),
    Piece::new(Commander, Attacker),
    Piece::new(King, Defender),
    Piece::new(Taflman, Defender),
    Piece::new(Knight, Defender),
    Piece::new(Commander, Defender),
];

/// This struct contains the information necessary to implement the game logic, including the game
/// rules and information about the geometry of the board (size, positions of special tiles, etc).
/// It provides methods for evaluating a given play or board based on that logic.
///
/// The information stored in this struct is not expected to change over the course of a game. It
/// does not contain the current game state (piece placement, history, etc), but rather, its
/// methods take references to such state where necessary. Everything that can be worked out from
/// the rules alone is worked out once, in [`GameLogic::new`].
#[derive(Clone, Debug)]
pub struct GameLogic {
    pub rules: Ruleset,
    pub board_geo: BoardGeometry,
    /// Per piece (indexed by [`Piece::index`]), the special tiles it may never stop on.
    forbidden: [BTreeSet<Tile>; 8],
    /// Per piece, the special tiles reserved for a restricted set of pieces that includes it.
    reserved: [BTreeSet<Tile>; 8],
}

impl GameLogic {
    /// Build the logic for the given rules on a board with the given side length.
    pub fn new(rules: Ruleset, side_len: u8) -> Self {
        let board_geo = BoardGeometry::new(side_len, rules.throne.enabled, rules.corners.enabled);
        let mut forbidden: [BTreeSet<Tile>; 8] = Default::default();
        let mut reserved: [BTreeSet<Tile>; 8] = Default::default();
        for piece in ALL_PIECES {
            let i = piece.index();
            if let Some(throne) = board_geo.throne {
                if !rules.throne.entry.contains(piece) {
                    forbidden[i].insert(throne);
                } else if !rules.throne.entry.is_all() {
                    reserved[i].insert(throne);
                }
            }
            for corner in &board_geo.corners {
                if !rules.corners.entry.contains(piece) {
                    forbidden[i].insert(*corner);
                } else if !rules.corners.entry.is_all() {
                    reserved[i].insert(*corner);
                }
            }
        }
        Self { rules, board_geo, forbidden, reserved }
    }

    /// Shorthand for the rules governing the given piece.
    pub fn piece_rules(&self, piece: Piece) -> &PieceRules {
        self.rules.piece(piece.kind)
    }

    /// Whether the given piece may stop on the given tile (ignoring what is on it).
    pub fn may_enter(&self, piece: Piece, tile: Tile) -> bool {
        !self.forbidden[piece.index()].contains(&tile)
    }

    /// Whether the given special tile is reserved for a restricted set of pieces that includes
    /// the given piece.
    pub fn is_reserved_for(&self, piece: Piece, tile: Tile) -> bool {
        self.reserved[piece.index()].contains(&tile)
    }

    /// Whether the given piece may slide past the given (empty) tile.
    pub fn may_pass(&self, piece: Piece, tile: Tile, board: &BoardState) -> bool {
        if self.board_geo.is_throne(tile) && !board.tile_occupied(tile) {
            self.rules.throne.pass.contains(piece)
        } else {
            true
        }
    }

    /// Whether the king wins by reaching the given tile.
    pub fn is_escape_tile(&self, tile: Tile) -> bool {
        let max = self.board_geo.side_len - 1;
        match self.rules.escape {
            EscapeType::Edge => self.board_geo.tile_at_edge(tile),
            EscapeType::Corner => (tile.col == 0 || tile.col == max) && (tile.row == 0 || tile.row == max),
        }
    }

    /// Whether the given piece, standing on the given tile, needs to be surrounded on all sides to
    /// be captured.
    pub fn is_strong(&self, piece: Piece, tile: Tile) -> bool {
        match self.piece_rules(piece).strength {
            Strength::Weak => false,
            Strength::Strong => true,
            Strength::StrongNearThrone => self.board_geo.near_throne(tile),
        }
    }

    /// Determine whether the given tile is hostile specifically by reference to the rules regarding
    /// hostility of special tiles. Only empty special tiles are hostile.
    pub fn special_tile_hostile(&self, tile: Tile, piece: Piece) -> bool {
        (self.board_geo.is_throne(tile) && self.rules.throne.hostile.contains(piece))
            || (self.board_geo.is_corner(tile) && self.rules.corners.hostile.contains(piece))
    }

    /// Determine whether the position at the given coordinates may act as an anvil against
    /// `victim` for a capture made by `capturer`. An anvil is an allied piece able to act as one,
    /// an empty special tile hostile to the victim, or a hostile board edge. If `any_ally` is set,
    /// every allied piece counts regardless of its capture power.
    pub fn coords_hostile(
        &self,
        coords: Coords,
        victim: Piece,
        capturer: Side,
        any_ally: bool,
        board: &BoardState,
    ) -> bool {
        match self.board_geo.coords_to_tile(coords) {
            None => self.rules.hostile_edge.contains(victim),
            Some(tile) => match board.get_piece(tile) {
                Some(other) => other.side == capturer
                    && (any_ally || self.piece_rules(other).power.is_anvil()),
                None => self.special_tile_hostile(tile, victim),
            },
        }
    }
}

/// Which part of a chain a segment is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// The first segment of a play.
    Initial,
    /// A berserk continuation after a capture.
    Continuation,
}

/// What move generation and capture resolution need to know about the chain being built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ChainContext {
    /// The moving piece.
    pub piece: Piece,
    /// Where the moving piece started the play. The tile is treated as empty for the rest of the
    /// chain.
    pub origin: Tile,
    /// Tiles already captured earlier in the chain.
    pub captured: BTreeSet<Tile>,
    pub phase: Phase,
}

impl ChainContext {
    pub fn new(piece: Piece, origin: Tile) -> Self {
        Self { piece, origin, captured: BTreeSet::new(), phase: Phase::Initial }
    }

    /// The context for the segment following the given one.
    pub fn continued(&self, segment: &PlaySegment) -> Self {
        let mut captured = self.captured.clone();
        captured.extend(segment.captured_tiles());
        Self { piece: self.piece, origin: self.origin, captured, phase: Phase::Continuation }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }
}
