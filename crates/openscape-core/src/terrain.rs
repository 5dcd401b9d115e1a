//! Static terrain grid.
//!
//! The terrain is built once when a session starts and then only read. It
//! carries its own bounds; everything outside them is impassable.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::geometry::Tile;

/// Kind of a single terrain tile, stored by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable grass.
    Open,
    /// Impassable water ring around the map.
    Border,
    /// Impassable wall.
    Wall,
    /// Walkable floor marker (the town square).
    Floor,
}

impl TileKind {
    /// Parses a tile code (0 open, 1 border, 2 wall, 3 floor).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Border),
            2 => Some(Self::Wall),
            3 => Some(Self::Floor),
            _ => None,
        }
    }

    /// Returns the numeric code of this tile kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Border => 1,
            Self::Wall => 2,
            Self::Floor => 3,
        }
    }

    /// Returns `true` if actors may stand on this tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Open | Self::Floor)
    }
}

/// A rectangular grid of [`TileKind`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl Terrain {
    /// Largest accepted width or height.
    pub const MAX_SIDE: i32 = 4096;

    /// Checks that a `width` x `height` grid can be built.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Empty`] for a non-positive side and
    /// [`TerrainError::TooLarge`] for a side above [`MAX_SIDE`](Self::MAX_SIDE).
    pub const fn validate_size(width: i32, height: i32) -> Result<(), TerrainError> {
        if width <= 0 || height <= 0 {
            return Err(TerrainError::Empty);
        }
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(TerrainError::TooLarge { width, height });
        }
        Ok(())
    }

    /// Creates a grid where every tile is [`TileKind::Open`].
    ///
    /// Each side is clamped to `0..=MAX_SIDE`; use
    /// [`validate_size`](Self::validate_size) first to reject bad input.
    #[must_use]
    pub fn open(width: i32, height: i32) -> Self {
        let width = width.clamp(0, Self::MAX_SIDE);
        let height = height.clamp(0, Self::MAX_SIDE);
        #[allow(clippy::cast_sign_loss)]
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Open; len],
        }
    }

    /// Generates the standard square map: a border ring and a floor patch
    /// around the bank at x 8..=12, y 8..=11.
    #[must_use]
    pub fn generate(size: i32) -> Self {
        let mut terrain = Self::open(size, size);
        let size = terrain.width;
        for y in 0..size {
            for x in 0..size {
                let kind = if (8..=12).contains(&x) && (8..=11).contains(&y) {
                    TileKind::Floor
                } else if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                    TileKind::Border
                } else {
                    TileKind::Open
                };
                terrain = terrain.with_tile(Tile::new(x, y), kind);
            }
        }
        terrain
    }

    /// Builds a terrain from rows of tile codes.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] if the grid is empty, ragged, or contains an
    /// unknown tile code.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, TerrainError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(TerrainError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(TerrainError::RaggedRow {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let kind = TileKind::from_code(code).ok_or(TerrainError::UnknownTile { code, x, y })?;
                tiles.push(kind);
            }
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        Ok(Self {
            width: expected as i32,
            height: rows.len() as i32,
            tiles,
        })
    }

    /// Returns a copy of this terrain with one tile replaced.
    ///
    /// Out-of-bounds tiles are ignored.
    #[must_use]
    pub fn with_tile(mut self, tile: Tile, kind: TileKind) -> Self {
        if let Some(index) = self.index(tile) {
            self.tiles[index] = kind;
        }
        self
    }

    /// Width in tiles.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if the tile lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    /// Returns the kind of the tile, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, tile: Tile) -> Option<TileKind> {
        self.index(tile).map(|i| self.tiles[i])
    }

    /// Returns `true` if the tile is inside the grid and walkable.
    #[must_use]
    pub fn is_passable(&self, tile: Tile) -> bool {
        self.get(tile).is_some_and(TileKind::is_passable)
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, tile: Tile) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.y * self.width + tile.x) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tile_kind_tests {
        use super::*;

        #[test]
        fn codes_roundtrip() {
            for code in 0..4 {
                let kind = TileKind::from_code(code).unwrap();
                assert_eq!(kind.code(), code);
            }
            assert!(TileKind::from_code(9).is_none());
        }

        #[test]
        fn passability() {
            assert!(TileKind::Open.is_passable());
            assert!(TileKind::Floor.is_passable());
            assert!(!TileKind::Border.is_passable());
            assert!(!TileKind::Wall.is_passable());
        }
    }

    mod terrain_tests {
        use super::*;

        #[test]
        fn generated_map_layout() {
            let terrain = Terrain::generate(50);
            assert_eq!(terrain.width(), 50);
            assert_eq!(terrain.height(), 50);
            assert_eq!(terrain.get(Tile::new(0, 20)), Some(TileKind::Border));
            assert_eq!(terrain.get(Tile::new(49, 49)), Some(TileKind::Border));
            assert_eq!(terrain.get(Tile::new(10, 10)), Some(TileKind::Floor));
            assert_eq!(terrain.get(Tile::new(12, 12)), Some(TileKind::Open));
            assert!(terrain.get(Tile::new(50, 0)).is_none());
        }

        #[test]
        fn oversized_grids_are_rejected() {
            assert_eq!(Terrain::validate_size(50, 50), Ok(()));
            assert_eq!(Terrain::validate_size(0, 50), Err(TerrainError::Empty));
            assert_eq!(
                Terrain::validate_size(i32::MAX, 2),
                Err(TerrainError::TooLarge {
                    width: i32::MAX,
                    height: 2
                })
            );
        }

        #[test]
        fn open_clamps_huge_sides() {
            let terrain = Terrain::open(1, i32::MAX);
            assert_eq!(terrain.width(), 1);
            assert_eq!(terrain.height(), Terrain::MAX_SIDE);
        }

        #[test]
        fn from_codes_parses_grid() {
            let terrain = Terrain::from_codes(&[vec![1, 1, 1], vec![1, 0, 3]]).unwrap();
            assert_eq!(terrain.width(), 3);
            assert_eq!(terrain.height(), 2);
            assert!(terrain.is_passable(Tile::new(1, 1)));
            assert!(terrain.is_passable(Tile::new(2, 1)));
            assert!(!terrain.is_passable(Tile::new(0, 0)));
        }

        #[test]
        fn from_codes_rejects_bad_grids() {
            assert_eq!(Terrain::from_codes(&[]), Err(TerrainError::Empty));
            assert_eq!(
                Terrain::from_codes(&[vec![0, 0], vec![0]]),
                Err(TerrainError::RaggedRow {
                    row: 1,
                    expected: 2,
                    found: 1
                })
            );
            assert_eq!(
                Terrain::from_codes(&[vec![0, 7]]),
                Err(TerrainError::UnknownTile { code: 7, x: 1, y: 0 })
            );
        }

        #[test]
        fn with_tile_ignores_out_of_bounds() {
            let terrain = Terrain::open(2, 2)
                .with_tile(Tile::new(1, 1), TileKind::Wall)
                .with_tile(Tile::new(5, 5), TileKind::Wall);
            assert!(!terrain.is_passable(Tile::new(1, 1)));
            assert!(terrain.is_passable(Tile::new(0, 0)));
        }
    }
}
