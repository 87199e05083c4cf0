use crate::error::ParseError::{BadLineLen, BadStringLen, EmptyString};
use crate::error::{BoardError, ParseError};
use crate::pieces::{Piece, Side};
use crate::tile_iter::TileIterator;
use crate::tiles::Tile;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store information on the current board state (ie, pieces). This is a mapping from tiles to
/// pieces, where a tile absent from the mapping is empty.
///
/// The board performs no legality checking of its own: it offers primitive placement, removal
/// and movement, and those only fail when an invariant would be broken (a piece placed on an
/// occupied tile, a missing piece removed, a second king placed). Game logic lives in
/// [`crate::game::logic::GameLogic`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct BoardState {
    side_len: u8,
    pieces: BTreeMap<Tile, Piece>,
}

impl BoardState {
    /// Create an empty board with the given side length.
    pub fn new(side_len: u8) -> Self {
        Self { side_len, pieces: BTreeMap::new() }
    }

    /// Return the length of the board's side.
    pub fn side_len(&self) -> u8 {
        self.side_len
    }

    pub fn tile_in_bounds(&self, t: Tile) -> bool {
        t.col < self.side_len && t.row < self.side_len
    }

    /// Get the piece that occupies the given tile, if any.
    pub fn get_piece(&self, t: Tile) -> Option<Piece> {
        self.pieces.get(&t).copied()
    }

    /// Check if there is any piece occupying a tile.
    pub fn tile_occupied(&self, t: Tile) -> bool {
        self.pieces.contains_key(&t)
    }

    /// Get the tile on which the king is currently placed.
    pub fn king(&self) -> Option<Tile> {
        self.pieces.iter()
            .find(|(_, p)| **p == Piece::king())
            .map(|(t, _)| *t)
    }

    /// Place a piece at the given (empty) tile.
    pub fn place_piece(&mut self, t: Tile, piece: Piece) -> Result<(), BoardError> {
        if !self.tile_in_bounds(t) {
            return Err(BoardError::OutOfBounds(t))
        }
        if self.tile_occupied(t) {
            return Err(BoardError::TileOccupied(t))
        }
        if piece == Piece::king() && self.king().is_some() {
            return Err(BoardError::DuplicateKing)
        }
        self.pieces.insert(t, piece);
        Ok(())
    }

    /// Remove the piece at the given tile, returning it.
    pub fn remove_piece(&mut self, t: Tile) -> Result<Piece, BoardError> {
        self.pieces.remove(&t).ok_or(BoardError::NoPiece(t))
    }

    /// Move a piece from one position to another. This does not check whether a move is valid.
    /// Returns the piece that was moved.
    pub fn move_piece(&mut self, from: Tile, to: Tile) -> Result<Piece, BoardError> {
        if from == to {
            return self.get_piece(from).ok_or(BoardError::NoPiece(from))
        }
        if !self.tile_in_bounds(to) {
            return Err(BoardError::OutOfBounds(to))
        }
        if self.tile_occupied(to) {
            return Err(BoardError::TileOccupied(to))
        }
        let piece = self.remove_piece(from)?;
        self.pieces.insert(to, piece);
        Ok(piece)
    }

    /// Iterate over all placed pieces, in tile order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Piece)> + '_ {
        self.pieces.iter().map(|(t, p)| (*t, *p))
    }

    /// The tiles occupied by pieces of the given side, in tile order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Tile> + '_ {
        self.pieces.iter()
            .filter(move |(_, p)| p.side == side)
            .map(|(t, _)| *t)
    }

    /// Count the number of pieces of the given side left on the board. Includes the king for
    /// defenders.
    pub fn count_pieces(&self, side: Side) -> usize {
        self.pieces_of(side).count()
    }

    /// Parse board state from a string in FEN format: rows from top to bottom separated by `/`,
    /// with digits standing for runs of empty tiles.
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        let fen = fen.trim();
        if fen.is_empty() {
            return Err(EmptyString)
        }
        let lines: Vec<&str> = fen.split('/').collect();
        let side_len = u8::try_from(lines.len()).map_err(|_| BadStringLen(fen.len()))?;
        let mut state = Self::new(side_len);
        for (i, line) in lines.iter().enumerate() {
            let row = side_len - 1 - i as u8;
            let mut n_empty: usize = 0;
            let mut col: usize = 0;
            for chr in line.chars() {
                if let Some(d) = chr.to_digit(10) {
                    n_empty = (n_empty * 10) + d as usize;
                } else {
                    col += n_empty;
                    n_empty = 0;
                    if col >= side_len as usize {
                        return Err(BadLineLen(col + 1))
                    }
                    let piece = Piece::try_from(chr)?;
                    if piece.is_king() && piece.side == Side::Attacker {
                        // Only the defenders have a king.
                        return Err(ParseError::BadChar(chr))
                    }
                    let tile = Tile::new(col as u8, row);
                    state.place_piece(tile, piece)
                        .map_err(|_| ParseError::BadString(fen.to_string()))?;
                    col += 1;
                }
            }
            col += n_empty;
            if col != side_len as usize {
                return Err(BadLineLen(col))
            }
        }
        Ok(state)
    }

    /// Return a string in FEN format representing the board state.
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(self.side_len as usize);
        for row in (0..self.side_len).rev() {
            let mut s = String::new();
            let mut n_empty = 0;
            for col in 0..self.side_len {
                match self.get_piece(Tile::new(col, row)) {
                    Some(p) => {
                        if n_empty > 0 {
                            s.push_str(&n_empty.to_string());
                            n_empty = 0;
                        }
                        s.push(p.into());
                    },
                    None => n_empty += 1
                }
            }
            if n_empty > 0 {
                s.push_str(&n_empty.to_string());
            }
            rows.push(s);
        }
        rows.join("/")
    }

    /// Return a string representing the board state as a grid, top row first, with `.` for empty
    /// tiles.
    pub fn to_display_str(&self) -> String {
        let mut s = String::new();
        for tile in self.iter_tiles() {
            match self.get_piece(tile) {
                Some(piece) => s.push(piece.into()),
                None => s.push('.'),
            }
            if tile.col + 1 == self.side_len {
                s.push('\n');
            }
        }
        s
    }

    /// A copy of this board rotated by 180 degrees.
    pub fn rotated(&self) -> Self {
        Self {
            side_len: self.side_len,
            pieces: self.iter().map(|(t, p)| (t.rotated(self.side_len), p)).collect(),
        }
    }

    /// Iterate over every tile of the board, occupied or not.
    pub fn iter_tiles(&self) -> TileIterator {
        TileIterator::new(self.side_len)
    }
}

impl FromStr for BoardState {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardState;
    use crate::error::BoardError;
    use crate::pieces::PieceKind::{Commander, King, Taflman};
    use crate::pieces::Piece;
    use crate::pieces::Side::{Attacker, Defender};
    use crate::tiles::Tile;
    use std::collections::HashSet;
    use std::str::FromStr;

    const BRANDUBH: &str = "3t3/3t3/3T3/ttTKTtt/3T3/3t3/3t3";

    #[test]
    fn test_fen_round_trip() {
        let state = BoardState::from_str(BRANDUBH).unwrap();
        assert_eq!(state.side_len(), 7);
        assert_eq!(state.to_fen(), BRANDUBH);
        let big = "3ttttt3/5t5/11/t4T4t/t3TTT3t/tt1TTKTT1tt/t3TTT3t/t4T4t/11/5t5/3ttttt3";
        let state = BoardState::from_str(big).unwrap();
        assert_eq!(state.side_len(), 11);
        assert_eq!(state.to_fen(), big);
        assert_eq!(state.get_piece(Tile::new(5, 10)), Some(Piece::attacker(Taflman)));
        assert_eq!(state.king(), Some(Tile::new(5, 5)));
    }

    #[test]
    fn test_bad_fen() {
        assert!(BoardState::from_str("").is_err());
        assert!(BoardState::from_str("3t3/3t3/3T3/ttTKTtt/3T3/3t3/3t2").is_err());
        assert!(BoardState::from_str("3t3/3t3/3T3/ttTKTttt/3T3/3t3/3t3").is_err());
        assert!(BoardState::from_str("3t3/3t3/3T3/ttTKTtx/3T3/3t3/3t3").is_err());
        // Two kings
        assert!(BoardState::from_str("3t3/3K3/3T3/ttTKTtt/3T3/3t3/3t3").is_err());
        assert!(BoardState::from_str("3k3/3t3/3T3/ttTKTtt/3T3/3t3/3t3").is_err());
    }

    #[test]
    fn test_piece_movement() {
        let mut state = BoardState::from_str(BRANDUBH).unwrap();
        state.place_piece(Tile::new(5, 5), Piece::attacker(Commander)).unwrap();
        state.move_piece(Tile::new(3, 3), Tile::new(4, 6)).unwrap();
        assert_eq!(state.king(), Some(Tile::new(4, 6)));
        assert_eq!(state.to_fen(), "3tK2/3t1c1/3T3/ttT1Ttt/3T3/3t3/3t3");
        assert_eq!(
            state.move_piece(Tile::new(3, 3), Tile::new(2, 2)),
            Err(BoardError::NoPiece(Tile::new(3, 3)))
        );
        assert_eq!(
            state.move_piece(Tile::new(3, 0), Tile::new(3, 1)),
            Err(BoardError::TileOccupied(Tile::new(3, 1)))
        );
        assert_eq!(
            state.place_piece(Tile::new(1, 1), Piece::new(King, Defender)),
            Err(BoardError::DuplicateKing)
        );
        assert_eq!(
            state.place_piece(Tile::new(7, 1), Piece::attacker(Taflman)),
            Err(BoardError::OutOfBounds(Tile::new(7, 1)))
        );
        assert_eq!(state.remove_piece(Tile::new(5, 5)), Ok(Piece::attacker(Commander)));
        assert_eq!(state.remove_piece(Tile::new(5, 5)), Err(BoardError::NoPiece(Tile::new(5, 5))));
    }

    #[test]
    fn test_pieces_of_side() {
        let state = BoardState::from_str(BRANDUBH).unwrap();
        let attackers: HashSet<Tile> = state.pieces_of(Attacker).collect();
        let expected = hashset!(
            Tile::new(3, 0), Tile::new(3, 1), Tile::new(3, 5), Tile::new(3, 6),
            Tile::new(0, 3), Tile::new(1, 3), Tile::new(5, 3), Tile::new(6, 3)
        );
        assert_eq!(attackers, expected);
        assert_eq!(state.count_pieces(Defender), 5);
        assert_eq!(state.count_pieces(Attacker), 8);
    }

    #[test]
    fn test_display_and_rotation() {
        let state = BoardState::from_str("7/1K5/7/7/7/5t1/7").unwrap();
        assert_eq!(
            state.to_display_str(),
            ".......\n.K.....\n.......\n.......\n.......\n.....t.\n.......\n"
        );
        let rotated = state.rotated();
        assert_eq!(rotated.king(), Some(Tile::new(5, 1)));
        assert_eq!(rotated.get_piece(Tile::new(1, 5)), Some(Piece::attacker(Taflman)));
        assert_eq!(rotated.rotated(), state);
    }
}
