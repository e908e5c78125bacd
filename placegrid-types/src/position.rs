use crate::bounds::CellBounds;
use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// The nine sub-regions of a cell, north row first:
///
/// ```text
/// 4 9 2
/// 3 5 7
/// 8 1 6
/// ```
///
/// This is the only copy of the layout; the inverse table is derived from it.
pub const LAYOUT: [[u8; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

const POSITIONS: [(u8, u8); 10] = invert_layout();

const fn invert_layout() -> [(u8, u8); 10] {
    let mut out = [(u8::MAX, u8::MAX); 10];
    let mut row = 0;
    while row < 3 {
        let mut col = 0;
        while col < 3 {
            out[LAYOUT[row][col] as usize] = (row as u8, col as u8);
            col += 1;
        }
        row += 1;
    }
    out
}

/// Error returned when a raw value is not one of the codes 1–9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPositionCode(pub u8);

impl std::fmt::Display for InvalidPositionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position code must be in 1..=9, got {}", self.0)
    }
}

impl std::error::Error for InvalidPositionCode {}

/// One of the nine sub-regions of a cell, numbered 1–9 in [`LAYOUT`] order.
///
/// # Examples
///
/// ```
/// use placegrid_types::position::PositionCode;
///
/// let nw = PositionCode::new(4).unwrap();
/// assert_eq!(nw.row_col(), (0, 0));
/// assert_eq!(PositionCode::from_row_col(2, 2), PositionCode::new(6));
/// assert!(PositionCode::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PositionCode(u8);

impl PositionCode {
    /// The geometric center sub-region.
    pub const CENTER: PositionCode = PositionCode(5);

    /// Every code, in numeric order.
    pub const ALL: [PositionCode; 9] = [
        PositionCode(1),
        PositionCode(2),
        PositionCode(3),
        PositionCode(4),
        PositionCode(5),
        PositionCode(6),
        PositionCode(7),
        PositionCode(8),
        PositionCode(9),
    ];

    #[inline]
    pub const fn new(code: u8) -> Option<Self> {
        if code >= 1 && code <= 9 {
            Some(Self(code))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Row (0 = north) and column (0 = west) of this code in the layout.
    #[inline]
    pub const fn row_col(self) -> (u8, u8) {
        POSITIONS[self.0 as usize]
    }

    /// The code at a layout row/column, or `None` outside the 3×3 grid.
    pub fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if row > 2 || col > 2 {
            return None;
        }
        Some(Self(LAYOUT[row as usize][col as usize]))
    }

    /// The sub-region of `bounds` that contains `coord`.
    ///
    /// Points on an internal edge belong to the southern or eastern
    /// sub-region; points on the outer edge are clamped inward. Returns `None`
    /// when the coordinate lies outside the bounds or the bounds are invalid.
    pub fn locate(bounds: &CellBounds, coord: &Coordinate) -> Option<Self> {
        if !bounds.is_valid() || !coord.is_valid() || !bounds.contains(coord) {
            return None;
        }
        let (down, right) = bounds.fraction_of(coord);
        let row = ((down * 3.0).floor() as i64).clamp(0, 2) as u8;
        let col = ((right * 3.0).floor() as i64).clamp(0, 2) as u8;
        Self::from_row_col(row, col)
    }

    /// Geographic extent of this sub-region within `bounds`.
    pub fn sub_bounds(self, bounds: &CellBounds) -> CellBounds {
        let (row, col) = self.row_col();
        bounds.split(3, row as u32, col as u32)
    }
}

impl TryFrom<u8> for PositionCode {
    type Error = InvalidPositionCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidPositionCode(value))
    }
}

impl From<PositionCode> for u8 {
    fn from(code: PositionCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for PositionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
