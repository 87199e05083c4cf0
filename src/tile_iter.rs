use crate::tiles::Tile;

/// Iterator over all tiles on a board in reading order: top row first, left to right within
/// each row. This is the order in which FEN strings and printed boards list tiles.
pub struct TileIterator {
    side_len: u8,
    next_idx: usize,
}

impl TileIterator {
    pub fn new(side_len: u8) -> Self {
        Self { side_len, next_idx: 0 }
    }

    fn len_total(&self) -> usize {
        self.side_len as usize * self.side_len as usize
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx >= self.len_total() {
            return None
        }
        let n = self.side_len as usize;
        let col = (self.next_idx % n) as u8;
        let row = self.side_len - 1 - (self.next_idx / n) as u8;
        self.next_idx += 1;
        Some(Tile::new(col, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len_total().saturating_sub(self.next_idx);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TileIterator {}

#[cfg(test)]
mod tests {
    use crate::tile_iter::TileIterator;
    use crate::tiles::Tile;

    #[test]
    fn test_reading_order() {
        let tiles: Vec<Tile> = TileIterator::new(3).collect();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], Tile::new(0, 2));
        assert_eq!(tiles[1], Tile::new(1, 2));
        assert_eq!(tiles[3], Tile::new(0, 1));
        assert_eq!(tiles[8], Tile::new(2, 0));
        assert_eq!(TileIterator::new(0).count(), 0);
        let mut it = TileIterator::new(7);
        it.next();
        assert_eq!(it.len(), 48);
    }
}
