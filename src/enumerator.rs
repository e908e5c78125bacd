//! Breadth-first enumeration of the cells that cover the visible region.
//!
//! Starting from the cell under the user, cells are expanded through their
//! compass neighbors. A cell whose center falls outside the region (grown by
//! one cell span on each axis) is dropped without expanding it; neighbors are
//! contiguous, so nothing inside the region is reachable only through such a
//! cell. Identity is the cell index, which also breaks cycles in the
//! neighbor graph.

use crate::cell::{CellGraph, GridCell};
use crate::region::VisibleRegion;
use placegrid_types::coordinate::Coordinate;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Result of one enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleCells<C> {
    /// Cells in breadth-first order, center first. No index repeats.
    pub cells: Vec<C>,
    /// Set when the cell cap stopped the search early.
    pub truncated: bool,
}

impl<C: GridCell> VisibleCells<C> {
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            truncated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn indices(&self) -> Vec<i64> {
        self.cells.iter().map(GridCell::index).collect()
    }

    /// The cell the search started from.
    pub fn center(&self) -> Option<&C> {
        self.cells.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCellEnumerator {
    max_cells: usize,
}

impl VisibleCellEnumerator {
    pub fn new(max_cells: usize) -> Self {
        Self {
            max_cells: max_cells.max(1),
        }
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Enumerate from the cell containing `coord`. A coordinate with no cell
    /// yields an empty result.
    pub fn enumerate_at<G: CellGraph>(
        &self,
        graph: &G,
        coord: &Coordinate,
        region: &VisibleRegion,
    ) -> VisibleCells<G::Cell> {
        match graph.cell_at(coord) {
            Some(center) => self.enumerate(&center, region),
            None => {
                log::debug!("No cell at {:?}; nothing to enumerate", coord);
                VisibleCells::empty()
            }
        }
    }

    /// Enumerate from a known center cell. The center is always part of the
    /// result.
    pub fn enumerate<C: GridCell>(&self, center: &C, region: &VisibleRegion) -> VisibleCells<C> {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        let mut cells = Vec::new();
        let mut truncated = false;

        visited.insert(center.index());
        queue.push_back(center.clone());

        while let Some(cell) = queue.pop_front() {
            let is_center = cells.is_empty();
            if !is_center {
                let bounds = cell.bounds();
                let keep = bounds.is_valid()
                    && region.contains_with_margin(
                        &cell.center(),
                        bounds.lat_span(),
                        bounds.lng_span(),
                    );
                if !keep {
                    continue;
                }
            }

            if cells.len() >= self.max_cells {
                log::warn!(
                    "Visible cell cap of {} reached; {} cells still queued",
                    self.max_cells,
                    queue.len() + 1
                );
                truncated = true;
                break;
            }

            for (_, neighbor) in cell.neighbors() {
                if visited.insert(neighbor.index()) {
                    queue.push_back(neighbor);
                }
            }
            cells.push(cell);
        }

        log::trace!("Enumerated {} visible cells ({} visited)", cells.len(), visited.len());
        VisibleCells { cells, truncated }
    }
}

impl Default for VisibleCellEnumerator {
    fn default() -> Self {
        Self::new(4096)
    }
}
