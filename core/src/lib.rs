#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dungeon Crawl navigation engine.
//!
//! This crate defines the value types that connect the authoritative level
//! state, the pure navigation systems, and the adapters that drive them: grid
//! cell coordinates, tile identifiers, travel directions, edge-clearance
//! results, and the continuous pixel position composed into every entity that
//! participates in grid navigation.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Identifier classifying the tile painted on a single grid cell.
///
/// Membership in a level's wall set decides whether the cell is walkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Axis scanned by an edge-clearance query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scan along increasing column indices with the row held fixed.
    Horizontal,
    /// Scan along increasing row indices with the column held fixed.
    Vertical,
}

/// Per-axis travel direction with each component in `{-1, 0, 1}`.
///
/// Pointer-directed movement produces at most one nonzero axis per tick, but
/// both components are carried so the collision-vertex resolver can branch on
/// either axis independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Direction {
    dx: i32,
    dy: i32,
}

impl Direction {
    /// Direction with no movement on either axis.
    pub const ZERO: Direction = Direction { dx: 0, dy: 0 };

    /// Creates a direction from raw per-axis components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Direction pointing from one cell toward another, one signum per axis.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Self {
        let dx = i64::from(to.column()) - i64::from(from.column());
        let dy = i64::from(to.row()) - i64::from(from.row());
        Self {
            dx: dx.signum() as i32,
            dy: dy.signum() as i32,
        }
    }

    /// Horizontal component of the direction.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component of the direction.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether the direction carries no movement at all.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Scales the direction into a per-axis pixel displacement.
    #[must_use]
    pub fn displacement(&self, speed: f32) -> (f32, f32) {
        (self.dx as f32 * speed, self.dy as f32 * speed)
    }
}

/// Result of an edge-clearance scan along one axis.
///
/// `before` counts the consecutive free cells immediately preceding the
/// queried cell along the axis; `after` counts the consecutive free cells
/// immediately following it. Both saturate at the grid edge when no wall is
/// met. The `(-1, -1)` sentinel marks a scan that never reached the queried
/// cell and exists only as a defensive outcome for off-grid queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisClearance {
    before: i32,
    after: i32,
}

impl AxisClearance {
    /// Creates a clearance result from computed before/after counts.
    #[must_use]
    pub const fn new(before: i32, after: i32) -> Self {
        Self { before, after }
    }

    /// Sentinel for a scan whose fixed point was never reached.
    #[must_use]
    pub const fn unreached() -> Self {
        Self {
            before: -1,
            after: -1,
        }
    }

    /// Free cells counted immediately before the queried cell.
    #[must_use]
    pub const fn before(&self) -> i32 {
        self.before
    }

    /// Free cells counted immediately after the queried cell.
    #[must_use]
    pub const fn after(&self) -> i32 {
        self.after
    }
}

/// Continuous pixel position of an entity together with the tile scale.
///
/// Entities compose this value type instead of inheriting movement helpers;
/// all cell derivations divide the pixel position by the tile length, with
/// far-side corners offset by one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPosition {
    x: f32,
    y: f32,
    tile_length: f32,
}

impl GridPosition {
    /// Creates a new pixel position scaled by the provided tile length.
    ///
    /// The tile length must be positive; every cell derivation divides by it.
    #[must_use]
    pub const fn new(x: f32, y: f32, tile_length: f32) -> Self {
        Self { x, y, tile_length }
    }

    /// Horizontal pixel coordinate of the entity's upper-left corner.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical pixel coordinate of the entity's upper-left corner.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Side length of a single square tile in pixels.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Returns the position shifted by the provided pixel deltas.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            tile_length: self.tile_length,
        }
    }

    /// Cell containing the entity's upper-left corner.
    #[must_use]
    pub fn left_up_cell(&self) -> CellCoord {
        CellCoord::new(self.cell_index(self.x), self.cell_index(self.y))
    }

    /// Cell containing the entity's lower-left corner.
    #[must_use]
    pub fn left_down_cell(&self) -> CellCoord {
        CellCoord::new(self.cell_index(self.x), self.cell_index(self.y) + 1)
    }

    /// Cell containing the entity's upper-right corner.
    #[must_use]
    pub fn right_up_cell(&self) -> CellCoord {
        CellCoord::new(self.cell_index(self.x) + 1, self.cell_index(self.y))
    }

    /// Cell containing the entity's lower-right corner.
    #[must_use]
    pub fn right_down_cell(&self) -> CellCoord {
        CellCoord::new(self.cell_index(self.x) + 1, self.cell_index(self.y) + 1)
    }

    /// Cell containing the entity's centre point.
    #[must_use]
    pub fn center_cell(&self) -> CellCoord {
        let half = self.tile_length / 2.0;
        CellCoord::new(self.cell_index(self.x + half), self.cell_index(self.y + half))
    }

    /// Captures all four corner cells and the centre cell in one bundle.
    #[must_use]
    pub fn corner_cells(&self) -> CornerCells {
        CornerCells {
            left_up: self.left_up_cell(),
            left_down: self.left_down_cell(),
            right_up: self.right_up_cell(),
            right_down: self.right_down_cell(),
            center: self.center_cell(),
        }
    }

    fn cell_index(&self, pixel: f32) -> u32 {
        (pixel / self.tile_length).floor() as u32
    }
}

/// Bounding-box corner cells of an entity captured for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerCells {
    /// Cell containing the upper-left corner.
    pub left_up: CellCoord,
    /// Cell containing the lower-left corner.
    pub left_down: CellCoord,
    /// Cell containing the upper-right corner.
    pub right_up: CellCoord,
    /// Cell containing the lower-right corner.
    pub right_down: CellCoord,
    /// Cell containing the centre point.
    pub center: CellCoord,
}

#[cfg(test)]
mod tests {
    use super::{AxisClearance, CellCoord, Direction, GridPosition, TileId};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Direction::new(1, 0)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Direction::new(0, -1)
        );
        assert_eq!(Direction::between(origin, origin), Direction::ZERO);
    }

    #[test]
    fn displacement_scales_each_axis() {
        let direction = Direction::new(-1, 0);
        assert_eq!(direction.displacement(4.0), (-4.0, 0.0));
        assert_eq!(Direction::ZERO.displacement(4.0), (0.0, 0.0));
    }

    #[test]
    fn corner_cells_divide_pixel_position() {
        let position = GridPosition::new(64.0, 64.0, 32.0);
        let corners = position.corner_cells();
        assert_eq!(corners.left_up, CellCoord::new(2, 2));
        assert_eq!(corners.left_down, CellCoord::new(2, 3));
        assert_eq!(corners.right_up, CellCoord::new(3, 2));
        assert_eq!(corners.right_down, CellCoord::new(3, 3));
        assert_eq!(corners.center, CellCoord::new(2, 2));
    }

    #[test]
    fn center_cell_shifts_past_the_tile_midpoint() {
        let before = GridPosition::new(47.0, 64.0, 32.0);
        assert_eq!(before.center_cell(), CellCoord::new(1, 2));

        let after = before.translated(2.0, 0.0);
        assert_eq!(after.center_cell(), CellCoord::new(2, 2));
    }

    #[test]
    fn clearance_sentinel_is_negative_on_both_sides() {
        let clearance = AxisClearance::unreached();
        assert_eq!(clearance.before(), -1);
        assert_eq!(clearance.after(), -1);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 11));
    }

    #[test]
    fn tile_id_round_trips_through_bincode() {
        assert_round_trip(&TileId::new(136));
    }
}
