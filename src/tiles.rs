use crate::error::ParseError;
use crate::error::ParseError::BadTile;
use crate::tiles::Direction::{Down, Left, Right, Up};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

/// The location of a single tile on the board, ie, column and row. This struct is only a
/// reference to a location on the board, and does not contain any other information such as
/// piece placement, etc.
///
/// Row 0 is the bottom row of the board as printed (rank 1), so a tile's algebraic form does not
/// depend on the size of the board. Tiles are ordered by column and then by row, which is the
/// order captures are written in canonical move text (`a9` comes before `a10`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tile {
    pub col: u8,
    pub row: u8,
}

impl Tile {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// The tile rotated by 180 degrees about the centre of a board of the given size.
    pub fn rotated(&self, side_len: u8) -> Self {
        Self::new(side_len - 1 - self.col, side_len - 1 - self.row)
    }

    /// The tile halfway between this tile and `other`, rounding down.
    pub fn midpoint(&self, other: Tile) -> Self {
        let half = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Self::new(half(self.col, other.col), half(self.row, other.row))
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({self})")
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row as u16 + 1)
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    /// Parse a tile from its algebraic form (column letter followed by a 1-based row number).
    /// Bounds are not checked here as the tile does not know the size of the board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col_char = chars.next().ok_or(ParseError::EmptyString)?;
        if !col_char.is_ascii_lowercase() {
            return Err(BadTile(s.to_string()))
        }
        let row_str = chars.as_str();
        if row_str.is_empty() || !row_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(BadTile(s.to_string()))
        }
        let row: u8 = row_str.parse()?;
        if row == 0 {
            return Err(BadTile(s.to_string()))
        }
        Ok(Self::new(col_char as u8 - b'a', row - 1))
    }
}

/// A signed pair of column and row, which may describe a position off the board. Used for
/// stepping from tile to tile.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Coords {
    pub col: i8,
    pub row: i8,
}

impl From<Tile> for Coords {
    fn from(tile: Tile) -> Self {
        Self { col: tile.col as i8, row: tile.row as i8 }
    }
}

/// One of the four orthogonal directions in which pieces move and capture.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// The (column, row) offset of one step in this direction.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Up => (0, 1),
            Down => (0, -1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Up | Down => [Left, Right],
            Left | Right => [Up, Down],
        }
    }
}

impl Add<Direction> for Coords {
    type Output = Coords;

    fn add(self, rhs: Direction) -> Self::Output {
        let (dc, dr) = rhs.offset();
        Coords { col: self.col + dc, row: self.row + dr }
    }
}

impl Add<Direction> for Tile {
    type Output = Coords;

    fn add(self, rhs: Direction) -> Self::Output {
        Coords::from(self) + rhs
    }
}

#[cfg(test)]
mod tests {
    use crate::tiles::Direction::{Down, Left, Right, Up};
    use crate::tiles::{Coords, Tile};
    use std::str::FromStr;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Tile::from_str("a1"), Ok(Tile::new(0, 0)));
        assert_eq!(Tile::from_str("k11"), Ok(Tile::new(10, 10)));
        assert_eq!(Tile::from_str("c10"), Ok(Tile::new(2, 9)));
        assert_eq!(Tile::new(4, 6).to_string(), "e7");
        assert_eq!(Tile::new(14, 14).to_string(), "o15");
        assert!(Tile::from_str("").is_err());
        assert!(Tile::from_str("a").is_err());
        assert!(Tile::from_str("a0").is_err());
        assert!(Tile::from_str("A1").is_err());
        assert!(Tile::from_str("a1x").is_err());
        assert!(Tile::from_str("1a").is_err());
    }

    #[test]
    fn test_ordering() {
        let mut tiles: Vec<Tile> = ["b1", "a10", "a9", "a2"].iter()
            .map(|s| Tile::from_str(s).unwrap())
            .collect();
        tiles.sort();
        let sorted: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
        assert_eq!(sorted, vec!["a2", "a9", "a10", "b1"]);
    }

    #[test]
    fn test_steps() {
        let t = Tile::new(3, 3);
        assert_eq!(t + Up, Coords { col: 3, row: 4 });
        assert_eq!(t + Down, Coords { col: 3, row: 2 });
        assert_eq!(t + Left, Coords { col: 2, row: 3 });
        assert_eq!(t + Right, Coords { col: 4, row: 3 });
        assert_eq!(Tile::new(0, 0) + Left, Coords { col: -1, row: 0 });
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Left.perpendicular(), [Up, Down]);
    }

    #[test]
    fn test_rotation() {
        assert_eq!(Tile::new(0, 0).rotated(7), Tile::new(6, 6));
        assert_eq!(Tile::new(3, 3).rotated(7), Tile::new(3, 3));
        assert_eq!(Tile::new(1, 5).rotated(11), Tile::new(9, 5));
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(Tile::new(1, 3).midpoint(Tile::new(3, 3)), Tile::new(2, 3));
        assert_eq!(Tile::new(4, 6).midpoint(Tile::new(4, 4)), Tile::new(4, 5));
        assert_eq!(Tile::new(0, 254).midpoint(Tile::new(0, 252)), Tile::new(0, 253));
    }
}
