#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that steers entities across the level grid.
//!
//! Pointer-directed travel runs the full navigation pipeline once per tick:
//! resolve which bounding-box vertex is authoritative for the current travel
//! direction, plan one breadth-first hop from that vertex toward the target,
//! and hand the resulting per-axis direction back to the caller to scale into
//! a pixel displacement. Keyboard travel bypasses pathfinding entirely and
//! only validates that an axis-exclusive step stays clear of walls.

use std::cmp::Ordering;

use dungeon_crawl_core::{Axis, CellCoord, CornerCells, Direction, GridPosition};
use dungeon_crawl_system_pathfinding::{axis_clearance, PathError, PathPlanner};
use dungeon_crawl_world::TileMap;

/// Probe order used when scattering a dropped item around an entity.
const DROP_SCAN_ORDER: [(i64, i64); 8] = [
    (1, 1),
    (0, 1),
    (-1, 1),
    (1, 0),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Selects the bounding-box vertex that is authoritative for pathfinding
/// this tick.
///
/// When travelling along an axis, the two leading corners compete: the corner
/// with *less* open space ahead of it is the one currently skirting a wall,
/// so it wins the tie and anchors the search. Equal clearances fall back to
/// the centre cell. The four direction branches are evaluated in sequence,
/// exactly one firing for the axis-exclusive directions movement produces; a
/// zero direction keeps the previously stored vertex.
#[must_use]
pub fn resolve_vertex(
    map: &TileMap,
    direction: Direction,
    corners: &CornerCells,
    previous: CellCoord,
) -> CellCoord {
    let mut vertex = previous;

    if direction.dx() > 0 {
        vertex = pick(
            axis_clearance(map, corners.left_up, Axis::Horizontal).after(),
            axis_clearance(map, corners.left_down, Axis::Horizontal).after(),
            corners.left_up,
            corners.left_down,
            corners.center,
        );
    }
    if direction.dx() < 0 {
        vertex = pick(
            axis_clearance(map, corners.right_up, Axis::Horizontal).before(),
            axis_clearance(map, corners.right_down, Axis::Horizontal).before(),
            corners.right_up,
            corners.right_down,
            corners.center,
        );
    }
    if direction.dy() > 0 {
        vertex = pick(
            axis_clearance(map, corners.left_up, Axis::Vertical).after(),
            axis_clearance(map, corners.right_up, Axis::Vertical).after(),
            corners.left_up,
            corners.right_up,
            corners.center,
        );
    }
    if direction.dy() < 0 {
        vertex = pick(
            axis_clearance(map, corners.left_down, Axis::Vertical).before(),
            axis_clearance(map, corners.right_down, Axis::Vertical).before(),
            corners.left_down,
            corners.right_down,
            corners.center,
        );
    }

    vertex
}

fn pick(
    first_clearance: i32,
    second_clearance: i32,
    first: CellCoord,
    second: CellCoord,
    center: CellCoord,
) -> CellCoord {
    match first_clearance.cmp(&second_clearance) {
        Ordering::Less => first,
        Ordering::Greater => second,
        Ordering::Equal => center,
    }
}

/// Per-entity pointer-guidance state threaded through the tick loop.
///
/// The navigator persists the collision vertex and travel direction between
/// ticks, mirroring how the resolver depends on the previous tick's outcome,
/// and owns a reusable breadth-first planner so the per-tick search allocates
/// nothing once warmed up.
#[derive(Clone, Debug)]
pub struct PointerNavigator {
    vertex: CellCoord,
    direction: Direction,
    planner: PathPlanner,
}

impl PointerNavigator {
    /// Creates a navigator anchored at the entity's centre cell.
    #[must_use]
    pub fn new(position: &GridPosition) -> Self {
        Self {
            vertex: position.center_cell(),
            direction: Direction::ZERO,
            planner: PathPlanner::new(),
        }
    }

    /// Collision vertex resolved on the most recent tick.
    #[must_use]
    pub const fn vertex(&self) -> CellCoord {
        self.vertex
    }

    /// Travel direction produced on the most recent tick.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Reports whether the stored vertex has reached the pointer target.
    #[must_use]
    pub fn arrived(&self, target: CellCoord) -> bool {
        self.vertex == target
    }

    /// Runs one tick of the pointer pipeline: vertex resolution, a single
    /// breadth-first hop, and the direction update derived from that hop.
    ///
    /// The returned direction is also stored for the next tick; callers scale
    /// it by their per-tick speed to displace the entity. A zero direction
    /// means the target is reached or unreachable and the entity should not
    /// move this tick.
    pub fn advance(
        &mut self,
        map: &TileMap,
        position: &GridPosition,
        target: CellCoord,
    ) -> Result<Direction, PathError> {
        let corners = position.corner_cells();
        self.vertex = resolve_vertex(map, self.direction, &corners, self.vertex);

        let next = self.planner.next_step(map, self.vertex, target)?;
        self.direction = Direction::between(self.vertex, next);
        Ok(self.direction)
    }
}

/// Validates an axis-exclusive keyboard step against the level walls.
///
/// A step is allowed when the two corners leading in the travel direction are
/// free both at the current position and at the position displaced by one
/// tick of speed. Components of the direction that are zero impose no
/// constraint.
#[must_use]
pub fn axis_step_allowed(
    map: &TileMap,
    position: &GridPosition,
    direction: Direction,
    speed: f32,
) -> bool {
    let (dx, dy) = direction.displacement(speed);
    let corners = position.corner_cells();
    let ahead = position.translated(dx, dy).corner_cells();

    let horizontal_clear = if direction.dx() > 0 {
        map.is_free(corners.right_up)
            && map.is_free(corners.right_down)
            && map.is_free(ahead.right_up)
            && map.is_free(ahead.right_down)
    } else if direction.dx() < 0 {
        map.is_free(corners.left_up)
            && map.is_free(corners.left_down)
            && map.is_free(ahead.left_up)
            && map.is_free(ahead.left_down)
    } else {
        true
    };

    let vertical_clear = if direction.dy() > 0 {
        map.is_free(corners.right_down)
            && map.is_free(corners.left_down)
            && map.is_free(ahead.right_down)
            && map.is_free(ahead.left_down)
    } else if direction.dy() < 0 {
        map.is_free(corners.right_up)
            && map.is_free(corners.left_up)
            && map.is_free(ahead.right_up)
            && map.is_free(ahead.left_up)
    } else {
        true
    };

    horizontal_clear && vertical_clear
}

/// Finds the first free cell surrounding `cell`, probing the eight
/// neighbours in the fixed drop order used when an entity discards an item.
#[must_use]
pub fn first_free_neighbor(map: &TileMap, cell: CellCoord) -> Option<CellCoord> {
    DROP_SCAN_ORDER.iter().find_map(|&(dx, dy)| {
        let column = i64::from(cell.column()) + dx;
        let row = i64::from(cell.row()) + dy;
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        let probe = CellCoord::new(column, row);
        map.is_free(probe).then_some(probe)
    })
}
