use serde::{Deserialize, Serialize};

/// Compass direction from a cell to one of its eight neighbors.
///
/// There is deliberately no center member: a same-cell relation is expressed
/// as `Option::<Direction>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The direction pointing back the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use placegrid_types::direction::Direction;
    ///
    /// assert_eq!(Direction::NE.opposite(), Direction::SW);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            Direction::NE => Direction::SW,
            Direction::NW => Direction::SE,
            Direction::SE => Direction::NW,
            Direction::SW => Direction::NE,
        }
    }

    /// Row and column step on a north-up grid. Rows grow southward and
    /// columns grow eastward, so north is `-1` rows.
    pub fn offsets(self) -> (i8, i8) {
        match self {
            Direction::N => (-1, 0),
            Direction::S => (1, 0),
            Direction::E => (0, 1),
            Direction::W => (0, -1),
            Direction::NE => (-1, 1),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
            Direction::SW => (1, -1),
        }
    }

    /// Combine per-axis signs into a direction. Both zero yields `None`.
    pub fn from_offsets(d_row: i8, d_col: i8) -> Option<Self> {
        match (d_row.signum(), d_col.signum()) {
            (-1, 0) => Some(Direction::N),
            (1, 0) => Some(Direction::S),
            (0, 1) => Some(Direction::E),
            (0, -1) => Some(Direction::W),
            (-1, 1) => Some(Direction::NE),
            (-1, -1) => Some(Direction::NW),
            (1, 1) => Some(Direction::SE),
            (1, -1) => Some(Direction::SW),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::N => "N",
            Direction::S => "S",
            Direction::E => "E",
            Direction::W => "W",
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::SE => "SE",
            Direction::SW => "SW",
        };
        f.write_str(name)
    }
}
