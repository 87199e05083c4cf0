use crate::tiles::{Coords, Direction, Tile};

/// The fixed layout of a board: its size and the positions of its special tiles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardGeometry {
    pub side_len: u8,
    /// The centre tile, if the rules use a throne.
    pub throne: Option<Tile>,
    /// The four corner tiles, if the rules use corners. Otherwise empty.
    pub corners: Vec<Tile>,
}

impl BoardGeometry {
    pub fn new(side_len: u8, throne: bool, corners: bool) -> Self {
        let max = side_len.saturating_sub(1);
        Self {
            side_len,
            throne: throne.then(|| Tile::new(side_len / 2, side_len / 2)),
            corners: if corners {
                vec![Tile::new(0, 0), Tile::new(0, max), Tile::new(max, 0), Tile::new(max, max)]
            } else {
                vec![]
            },
        }
    }

    pub fn tile_in_bounds(&self, tile: Tile) -> bool {
        tile.row < self.side_len && tile.col < self.side_len
    }

    pub fn coords_in_bounds(&self, coords: Coords) -> bool {
        (0..self.side_len as i8).contains(&coords.row) && (0..self.side_len as i8).contains(&coords.col)
    }

    /// Convert the given coordinates to a tile, if they are within the board.
    pub fn coords_to_tile(&self, coords: Coords) -> Option<Tile> {
        self.coords_in_bounds(coords).then(|| Tile::new(coords.col as u8, coords.row as u8))
    }

    /// The tile one step from `tile` in the given direction, if it is on the board.
    pub fn step(&self, tile: Tile, dir: Direction) -> Option<Tile> {
        self.coords_to_tile(tile + dir)
    }

    pub fn is_throne(&self, tile: Tile) -> bool {
        self.throne == Some(tile)
    }

    pub fn is_corner(&self, tile: Tile) -> bool {
        self.corners.contains(&tile)
    }

    pub fn is_special(&self, tile: Tile) -> bool {
        self.is_throne(tile) || self.is_corner(tile)
    }

    pub fn tile_at_edge(&self, tile: Tile) -> bool {
        tile.row == 0 || tile.col == 0 || tile.row == self.side_len - 1 || tile.col == self.side_len - 1
    }

    /// Whether the tile is on, or orthogonally adjacent to, the throne.
    pub fn near_throne(&self, tile: Tile) -> bool {
        match self.throne {
            Some(throne) => throne == tile || Direction::ALL.iter()
                .any(|d| self.step(throne, *d) == Some(tile)),
            None => false
        }
    }

    /// The tiles orthogonally adjacent to the given tile which are on the board.
    pub fn neighbors(&self, tile: Tile) -> Vec<Tile> {
        Direction::ALL.iter().filter_map(|d| self.step(tile, *d)).collect()
    }
}
