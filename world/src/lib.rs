#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for the Dungeon Crawl navigation engine.
//!
//! A level owns exactly one [`TileMap`], built when the level loads and
//! dropped at teardown. The map never mutates while entities query it, so the
//! per-tick navigation path reads it without any locking discipline. All
//! construction failures surface here, at load time; the tick path only ever
//! observes a valid map.

use dungeon_crawl_core::{CellCoord, TileId};
use thiserror::Error;

mod level;

pub use level::LevelSpec;

/// Rectangular grid of tile identifiers plus the wall set that classifies
/// them.
///
/// Walkability queries accept coordinates up to and including the nominal
/// bounds: pathfinding routinely probes one cell past the far edge, and those
/// probes must classify as blocked rather than fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tiles: Vec<TileId>,
    walls: Vec<TileId>,
}

impl TileMap {
    /// Builds a tile map from row-major tile rows and a wall set.
    ///
    /// Fails when the grid is empty or any row disagrees with the width of
    /// the first row. These errors belong to level loading; they are never
    /// reachable from the per-tick navigation path.
    pub fn from_rows(rows: Vec<Vec<TileId>>, walls: Vec<TileId>) -> Result<Self, MapError> {
        let row_count = rows.len();
        if row_count == 0 {
            return Err(MapError::EmptyGrid);
        }

        let expected = rows[0].len();
        if expected == 0 {
            return Err(MapError::EmptyRow { row: 0 });
        }

        let mut tiles = Vec::with_capacity(row_count.saturating_mul(expected));
        for (index, row) in rows.into_iter().enumerate() {
            if row.is_empty() {
                return Err(MapError::EmptyRow { row: index });
            }
            if row.len() != expected {
                return Err(MapError::RaggedRow {
                    row: index,
                    expected,
                    found: row.len(),
                });
            }
            tiles.extend(row);
        }

        let columns = u32::try_from(expected).map_err(|_| MapError::TooWide { found: expected })?;
        let rows = u32::try_from(row_count).map_err(|_| MapError::TooTall { found: row_count })?;

        Ok(Self {
            columns,
            rows,
            tiles,
            walls,
        })
    }

    /// Number of tile columns stored in the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows stored in the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile identifier painted on the provided cell, if the cell lies within
    /// the stored tile index.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileId> {
        self.index(cell)
            .and_then(|offset| self.tiles.get(offset).copied())
    }

    /// Reports whether the cell is walkable.
    ///
    /// A cell is free iff its tile exists and is not in the wall set. Cells
    /// outside the stored tile index, including the inclusive far-edge
    /// coordinates that pathfinding probes, classify as blocked.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        match self.tile(cell) {
            Some(tile) => !self.walls.contains(&tile),
            None => false,
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Errors raised while constructing a [`TileMap`] from loader input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The loader supplied no tile rows at all.
    #[error("level grid contains no rows")]
    EmptyGrid,
    /// A tile row contained no tiles.
    #[error("level grid row {row} contains no tiles")]
    EmptyRow {
        /// Index of the offending row.
        row: usize,
    },
    /// A tile row disagreed with the width established by the first row.
    #[error("level grid row {row} holds {found} tiles, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width actually found.
        found: usize,
    },
    /// The grid is wider than the coordinate space supports.
    #[error("level grid width {found} exceeds the supported coordinate range")]
    TooWide {
        /// Width actually found.
        found: usize,
    },
    /// The grid is taller than the coordinate space supports.
    #[error("level grid height {found} exceeds the supported coordinate range")]
    TooTall {
        /// Height actually found.
        found: usize,
    },
}

/// Bundles the grid state a navigation system needs for one level.
///
/// The context is owned by the level session: built when the level loads and
/// discarded on teardown, replacing any ambient global map state. Systems
/// borrow the map through it for the duration of a tick.
#[derive(Clone, Debug)]
pub struct NavigationContext {
    map: TileMap,
}

impl NavigationContext {
    /// Creates a context that owns the provided tile map.
    #[must_use]
    pub fn new(map: TileMap) -> Self {
        Self { map }
    }

    /// Builds the context straight from a deserialized level description.
    pub fn from_spec(spec: LevelSpec) -> Result<Self, MapError> {
        Ok(Self::new(spec.into_map()?))
    }

    /// Borrows the tile map for query access.
    #[must_use]
    pub fn map(&self) -> &TileMap {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::{MapError, NavigationContext, TileMap};
    use dungeon_crawl_core::{CellCoord, TileId};

    fn floor() -> TileId {
        TileId::new(7)
    }

    fn wall() -> TileId {
        TileId::new(1)
    }

    fn open_map(columns: usize, rows: usize) -> TileMap {
        let tile_rows = vec![vec![floor(); columns]; rows];
        TileMap::from_rows(tile_rows, vec![wall()]).expect("valid map")
    }

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(
            TileMap::from_rows(Vec::new(), vec![wall()]),
            Err(MapError::EmptyGrid)
        );
    }

    #[test]
    fn rejects_empty_row() {
        let rows = vec![vec![floor()], Vec::new()];
        assert_eq!(
            TileMap::from_rows(rows, vec![wall()]),
            Err(MapError::EmptyRow { row: 1 })
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![floor(), floor()], vec![floor()]];
        assert_eq!(
            TileMap::from_rows(rows, vec![wall()]),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn wall_membership_blocks_cells() {
        let rows = vec![vec![floor(), wall()], vec![floor(), floor()]];
        let map = TileMap::from_rows(rows, vec![wall()]).expect("valid map");

        assert!(map.is_free(CellCoord::new(0, 0)));
        assert!(!map.is_free(CellCoord::new(1, 0)));
        assert_eq!(map.tile(CellCoord::new(1, 0)), Some(wall()));
    }

    #[test]
    fn far_edge_queries_answer_blocked_without_panicking() {
        let map = open_map(4, 3);

        assert!(!map.is_free(CellCoord::new(4, 3)));
        assert!(!map.is_free(CellCoord::new(4, 0)));
        assert!(!map.is_free(CellCoord::new(0, 3)));
        assert_eq!(map.tile(CellCoord::new(4, 3)), None);
    }

    #[test]
    fn context_owns_the_map_for_the_level_lifetime() {
        let context = NavigationContext::new(open_map(2, 2));
        assert_eq!(context.map().columns(), 2);
        assert_eq!(context.map().rows(), 2);
    }
}
