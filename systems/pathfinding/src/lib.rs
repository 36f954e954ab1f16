#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pathfinding system: edge-clearance scans and breadth-first next-hop
//! planning over a level's tile map.
//!
//! Both operations are deterministic functions of the map and the queried
//! cells. The planner recomputes its search from scratch every tick; at
//! dungeon-map scale a full sweep stays comfortably inside a frame budget,
//! and the single-hop contract lets callers re-plan from a freshly resolved
//! origin as the entity moves.

use std::collections::VecDeque;

use dungeon_crawl_core::{Axis, AxisClearance, CellCoord};
use dungeon_crawl_world::TileMap;
use thiserror::Error;

/// Distance sentinel for cells the search has not visited.
const UNVISITED: u16 = u16::MAX;

/// Fixed neighbour expansion order: +column, +row, -column, -row.
const STEP_ORDER: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Scans one full axis of the map and reports how much free space surrounds
/// the cell on that axis.
///
/// The scan walks every index from zero to the nominal bound, holding the
/// orthogonal coordinate fixed. `before` counts the consecutive free cells
/// immediately preceding the queried cell, starting over whenever a wall is
/// met in the preceding region; a cell on the first row or column therefore
/// reports zero. `after` counts the consecutive free cells following the
/// queried cell and stops at the first wall. Both counts saturate at the grid
/// edge when no wall interrupts them.
///
/// Cells whose scanned coordinate lies outside the nominal bound are never
/// reached as the fixed point and yield the defensive
/// [`AxisClearance::unreached`] sentinel.
#[must_use]
pub fn axis_clearance(map: &TileMap, cell: CellCoord, axis: Axis) -> AxisClearance {
    let span = match axis {
        Axis::Horizontal => map.columns(),
        Axis::Vertical => map.rows(),
    };
    let fixed = match axis {
        Axis::Horizontal => cell.column(),
        Axis::Vertical => cell.row(),
    };

    let mut before: i32 = 0;
    let mut after: i32 = -1;
    let mut reached = false;

    for index in 0..span {
        let probe = match axis {
            Axis::Horizontal => CellCoord::new(index, cell.row()),
            Axis::Vertical => CellCoord::new(cell.column(), index),
        };

        if !reached {
            if index == fixed {
                reached = true;
                after = 0;
            } else if map.is_free(probe) {
                before += 1;
            } else {
                before = 0;
            }
        } else if map.is_free(probe) {
            after += 1;
        } else {
            break;
        }
    }

    if !reached {
        return AxisClearance::unreached();
    }

    AxisClearance::new(before, after)
}

/// Errors raised when a pathfinding call violates the caller contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// A search endpoint lay outside the map's inclusive query bounds.
    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} search bounds")]
    OutOfBounds {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
        /// Nominal column count of the searched map.
        columns: u32,
        /// Nominal row count of the searched map.
        rows: u32,
    },
}

impl PathError {
    fn out_of_bounds(cell: CellCoord, map: &TileMap) -> Self {
        Self::OutOfBounds {
            column: cell.column(),
            row: cell.row(),
            columns: map.columns(),
            rows: map.rows(),
        }
    }
}

/// Reusable breadth-first search workspace that plans single next hops.
///
/// The distance and predecessor grids cover the inclusive search bounds,
/// one node past the nominal map edge on each axis, matching the walkability
/// contract that classifies those probes as blocked. Buffers persist across
/// calls so a per-tick caller allocates only on map growth.
#[derive(Clone, Debug, Default)]
pub struct PathPlanner {
    distances: Vec<u16>,
    predecessors: Vec<Option<CellCoord>>,
    queue: VecDeque<CellCoord>,
    node_columns: u32,
    node_rows: u32,
}

impl PathPlanner {
    /// Creates a planner with empty workspace buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans the single next hop along a shortest path from `start` toward
    /// `target`.
    ///
    /// Returns `start` unchanged when the two coincide or when no path
    /// exists, so an unreachable target reads as zero displacement rather
    /// than an error. Paths longer than the `u16` distance cap classify as
    /// unreachable. Endpoints outside the inclusive search bounds are a
    /// caller contract violation and fail fast with
    /// [`PathError::OutOfBounds`].
    pub fn next_step(
        &mut self,
        map: &TileMap,
        start: CellCoord,
        target: CellCoord,
    ) -> Result<CellCoord, PathError> {
        if start.column() > map.columns() || start.row() > map.rows() {
            return Err(PathError::out_of_bounds(start, map));
        }
        if target.column() > map.columns() || target.row() > map.rows() {
            return Err(PathError::out_of_bounds(target, map));
        }
        if start == target {
            return Ok(start);
        }

        self.prepare(map);

        let start_index = self
            .node_index(start)
            .expect("start checked against search bounds");
        self.distances[start_index] = 0;
        self.queue.push_back(start);

        while let Some(cell) = self.queue.pop_front() {
            let Some(cell_index) = self.node_index(cell) else {
                continue;
            };
            // Expanding at the cap would stamp neighbours with the
            // unvisited sentinel and re-admit them forever.
            if self.distances[cell_index] >= UNVISITED - 1 {
                continue;
            }
            let next_distance = self.distances[cell_index] + 1;

            for delta in STEP_ORDER {
                let Some(neighbor) = offset_within(cell, delta, map.columns(), map.rows()) else {
                    continue;
                };
                if !map.is_free(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = self.node_index(neighbor) else {
                    continue;
                };
                if self.distances[neighbor_index] != UNVISITED {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                self.predecessors[neighbor_index] = Some(cell);
                self.queue.push_back(neighbor);
            }
        }

        let target_index = self
            .node_index(target)
            .expect("target checked against search bounds");
        if self.distances[target_index] == UNVISITED {
            return Ok(start);
        }

        let mut cursor = target;
        loop {
            let cursor_index = self
                .node_index(cursor)
                .expect("predecessor chain stays within search bounds");
            match self.predecessors[cursor_index] {
                Some(previous) if previous == start => return Ok(cursor),
                Some(previous) => cursor = previous,
                // Chain exhausted without meeting the seed; defensive.
                None => return Ok(start),
            }
        }
    }

    fn prepare(&mut self, map: &TileMap) {
        self.node_columns = map.columns() + 1;
        self.node_rows = map.rows() + 1;

        let node_count = usize::try_from(self.node_columns).unwrap_or(0)
            * usize::try_from(self.node_rows).unwrap_or(0);

        if self.distances.len() != node_count {
            self.distances = vec![UNVISITED; node_count];
            self.predecessors = vec![None; node_count];
        } else {
            self.distances.fill(UNVISITED);
            self.predecessors.fill(None);
        }

        self.queue.clear();
    }

    fn node_index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.node_columns && cell.row() < self.node_rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.node_columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Offsets a cell by one step, keeping it inside the inclusive search bounds.
fn offset_within(cell: CellCoord, delta: (i64, i64), columns: u32, rows: u32) -> Option<CellCoord> {
    let column = i64::from(cell.column()) + delta.0;
    let row = i64::from(cell.row()) + delta.1;

    if column < 0 || row < 0 {
        return None;
    }

    let column = u32::try_from(column).ok()?;
    let row = u32::try_from(row).ok()?;

    if column > columns || row > rows {
        return None;
    }

    Some(CellCoord::new(column, row))
}
