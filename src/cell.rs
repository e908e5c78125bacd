//! The cell-graph capability consumed by the engine.
//!
//! The engine never subdivides the earth itself. It asks a [`CellGraph`] for
//! the cell under a coordinate and walks [`GridCell::neighbors`] from there.
//! Implementations are read-only from the engine's point of view.

use placegrid_types::bounds::CellBounds;
use placegrid_types::coordinate::Coordinate;
use placegrid_types::direction::Direction;
use placegrid_types::position::PositionCode;
use smallvec::SmallVec;

/// Compass neighbors of a cell. Directions that cannot be resolved (past a
/// pole, for example) are simply absent.
pub type Neighbors<C> = SmallVec<[(Direction, C); 8]>;

/// A single grid cell as exposed by an external grid.
pub trait GridCell: Clone {
    /// Stable identity. Two cells are the same cell iff their indices match.
    fn index(&self) -> i64;

    /// Subdivision level, only used for diagnostics.
    fn level(&self) -> u8;

    /// Geographic extent. The longitude range may straddle the antimeridian.
    fn bounds(&self) -> CellBounds;

    fn center(&self) -> Coordinate {
        self.bounds().center()
    }

    /// The adjacent cell in `direction`, if the grid defines one.
    fn neighbor(&self, direction: Direction) -> Option<Self>;

    /// All resolvable compass neighbors.
    fn neighbors(&self) -> Neighbors<Self> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbor(d).map(|cell| (d, cell)))
            .collect()
    }

    /// Extent of one of the nine sub-regions of this cell.
    fn sub_cell_bounds(&self, code: PositionCode) -> Option<CellBounds> {
        let bounds = self.bounds();
        bounds.is_valid().then(|| code.sub_bounds(&bounds))
    }
}

/// Lookup from coordinates to cells.
pub trait CellGraph {
    type Cell: GridCell;

    /// The cell containing `coord`, or `None` if the grid has no cell there.
    fn cell_at(&self, coord: &Coordinate) -> Option<Self::Cell>;
}

impl<G: CellGraph + ?Sized> CellGraph for &G {
    type Cell = G::Cell;

    fn cell_at(&self, coord: &Coordinate) -> Option<Self::Cell> {
        (**self).cell_at(coord)
    }
}
