//! On-disk level description consumed by map loaders.

use dungeon_crawl_core::TileId;
use serde::{Deserialize, Serialize};

use crate::{MapError, TileMap};

/// Serializable description of a level's tile layout and wall set.
///
/// Adapters deserialize this from their chosen format (the CLI uses RON) and
/// convert it into a [`TileMap`] through the same fallible constructor the
/// rest of the loader path uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Tile identifiers that classify as walls for this level.
    pub walls: Vec<TileId>,
    /// Row-major tile rows, top row first.
    pub rows: Vec<Vec<TileId>>,
}

impl LevelSpec {
    /// Converts the description into a validated tile map.
    pub fn into_map(self) -> Result<TileMap, MapError> {
        TileMap::from_rows(self.rows, self.walls)
    }
}

#[cfg(test)]
mod tests {
    use super::LevelSpec;
    use crate::MapError;
    use dungeon_crawl_core::{CellCoord, TileId};

    #[test]
    fn spec_converts_into_a_map() {
        let spec = LevelSpec {
            walls: vec![TileId::new(1)],
            rows: vec![
                vec![TileId::new(1), TileId::new(1)],
                vec![TileId::new(0), TileId::new(1)],
            ],
        };

        let map = spec.into_map().expect("valid spec");
        assert!(map.is_free(CellCoord::new(0, 1)));
        assert!(!map.is_free(CellCoord::new(0, 0)));
    }

    #[test]
    fn spec_validation_matches_the_loader_path() {
        let spec = LevelSpec {
            walls: Vec::new(),
            rows: Vec::new(),
        };
        assert_eq!(spec.into_map(), Err(MapError::EmptyGrid));
    }
}
