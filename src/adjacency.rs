//! Sub-cell adjacency in the palace layout.
//!
//! Each cell is split into nine sub-regions numbered by
//! [`placegrid_types::position::LAYOUT`]. Stepping off the edge of the 3×3
//! block lands in the neighboring cell on the opposite edge, so every
//! sub-region has exactly eight neighbors: some in the same cell, some across
//! a cell boundary in a known compass direction.

use crate::cell::GridCell;
use crate::error::{GridError, Result};
use placegrid_types::bounds::CellBounds;
use placegrid_types::direction::Direction;
use placegrid_types::position::PositionCode;

/// Row/column steps in north-west to south-east reading order.
pub const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A neighboring sub-region.
///
/// `direction` is `None` when the neighbor lies in the same cell, otherwise
/// the compass direction of the cell that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adjacent {
    pub direction: Option<Direction>,
    pub code: PositionCode,
}

/// Step one sub-region from `code` by `(d_row, d_col)`, each in `-1..=1`.
///
/// # Examples
///
/// ```rust
/// use placegrid::adjacency::step;
/// use placegrid::{Direction, PositionCode};
///
/// let nw = PositionCode::new(4).unwrap();
/// let up = step(nw, -1, 0);
/// assert_eq!(up.direction, Some(Direction::N));
/// assert_eq!(up.code.get(), 8);
/// ```
pub fn step(code: PositionCode, d_row: i8, d_col: i8) -> Adjacent {
    let (row, col) = code.row_col();
    let (row, row_overflow) = wrap_axis(row as i8 + d_row.signum());
    let (col, col_overflow) = wrap_axis(col as i8 + d_col.signum());

    debug_assert!(row <= 2 && col <= 2, "wrapped to ({row}, {col})");
    let code = PositionCode::from_row_col(row, col)
        .expect("wrap_axis keeps row and column within the 3x3 layout");
    Adjacent {
        direction: Direction::from_offsets(row_overflow, col_overflow),
        code,
    }
}

/// Wrap one axis into `0..=2`, reporting the overflow sign.
fn wrap_axis(value: i8) -> (u8, i8) {
    match value {
        v if v < 0 => (2, -1),
        v if v > 2 => (0, 1),
        v => (v as u8, 0),
    }
}

/// The eight neighbors of a sub-region, in [`OFFSETS`] order.
///
/// # Examples
///
/// ```rust
/// use placegrid::adjacency::resolve;
/// use placegrid::PositionCode;
///
/// let around_center = resolve(PositionCode::CENTER);
/// assert!(around_center.iter().all(|a| a.direction.is_none()));
/// ```
pub fn resolve(code: PositionCode) -> [Adjacent; 8] {
    OFFSETS.map(|(d_row, d_col)| {
        let adjacent = step(code, d_row, d_col);
        debug_assert_eq!(
            step(adjacent.code, -d_row, -d_col),
            Adjacent {
                direction: adjacent.direction.map(Direction::opposite),
                code,
            },
            "adjacency from {} by ({}, {}) does not reverse",
            code,
            d_row,
            d_col
        );
        adjacent
    })
}

/// [`resolve`] for a raw code. Codes outside 1–9 are a caller bug and are
/// rejected rather than defaulted.
pub fn resolve_raw(code: u8) -> Result<[Adjacent; 8]> {
    let code = PositionCode::new(code).ok_or(GridError::InvalidPositionCode(code))?;
    Ok(resolve(code))
}

/// A sub-region to highlight, resolved to a concrete cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubCellHighlight {
    pub cell_index: i64,
    pub direction: Option<Direction>,
    pub code: PositionCode,
    pub bounds: CellBounds,
}

/// Resolve the eight neighbors of `code` inside `cell` to concrete cells and
/// bounds. Neighbors whose cell the grid cannot provide are left out.
pub fn neighborhood<C: GridCell>(cell: &C, code: PositionCode) -> Vec<SubCellHighlight> {
    resolve(code)
        .iter()
        .filter_map(|adjacent| {
            let target = match adjacent.direction {
                None => cell.clone(),
                Some(direction) => cell.neighbor(direction)?,
            };
            let bounds = target.sub_cell_bounds(adjacent.code)?;
            Some(SubCellHighlight {
                cell_index: target.index(),
                direction: adjacent.direction,
                code: adjacent.code,
                bounds,
            })
        })
        .collect()
}
