//! A [`CellGraph`] backed by geohash cells.
//!
//! Geohash is not the grid the engine was designed around, but it has the
//! same shape: rectangular lat/lng cells at a fixed precision with eight
//! compass neighbors. That makes it a convenient reference grid for demos,
//! tests and benchmarks.
//!
//! ```rust
//! use placegrid::geohash_grid::GeohashGrid;
//! use placegrid::{CellGraph, Coordinate, GridCell};
//!
//! let grid = GeohashGrid::new(6)?;
//! let cell = grid.cell_at(&Coordinate::new(40.7128, -74.0060)).unwrap();
//! assert_eq!(cell.hash(), "dr5reg");
//! assert_eq!(cell.level(), 6);
//! # Ok::<(), placegrid::GridError>(())
//! ```

use crate::cell::{CellGraph, GridCell};
use crate::error::{GridError, Result};
use placegrid_types::bounds::CellBounds;
use placegrid_types::coordinate::{Coordinate, normalize_longitude};
use placegrid_types::direction::Direction;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest hash whose bits plus length still pack into 64 bits.
pub const MAX_PRECISION: usize = 12;

/// Geohash grid at a single precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeohashGrid {
    precision: usize,
}

impl GeohashGrid {
    /// Create a grid of `precision`-character cells (1 to 12).
    pub fn new(precision: usize) -> Result<Self> {
        if !(1..=MAX_PRECISION).contains(&precision) {
            return Err(GridError::InvalidInput(format!(
                "geohash precision must be in 1..={}, got {}",
                MAX_PRECISION, precision
            )));
        }
        Ok(Self { precision })
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

impl CellGraph for GeohashGrid {
    type Cell = GeohashCell;

    fn cell_at(&self, coord: &Coordinate) -> Option<GeohashCell> {
        if !coord.is_valid() {
            return None;
        }
        let c = coord.normalized();
        let hash = geohash::encode(geohash::Coord { x: c.lng, y: c.lat }, self.precision).ok()?;
        GeohashCell::from_hash(&hash).ok()
    }
}

/// One geohash cell with its decoded bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GeohashCell {
    hash: String,
    bounds: CellBounds,
}

impl GeohashCell {
    /// Decode a geohash string into a cell.
    pub fn from_hash(hash: &str) -> Result<Self> {
        if hash.is_empty() || hash.len() > MAX_PRECISION {
            return Err(GridError::InvalidInput(format!(
                "geohash length must be in 1..={}, got {}",
                MAX_PRECISION,
                hash.len()
            )));
        }
        let rect = geohash::decode_bbox(hash)
            .map_err(|e| GridError::InvalidInput(format!("invalid geohash {:?}: {}", hash, e)))?;
        Ok(Self {
            hash: hash.to_string(),
            bounds: CellBounds::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x),
        })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Neighbor lookup that steps across the antimeridian, which
    /// `geohash::neighbor` refuses to do.
    fn wrapped_neighbor(&self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.offsets();
        let center = self.bounds.center();
        let lat = center.lat - d_row as f64 * self.bounds.lat_span();
        if !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        let lng = normalize_longitude(center.lng + d_col as f64 * self.bounds.lng_span());
        let hash = geohash::encode(geohash::Coord { x: lng, y: lat }, self.hash.len()).ok()?;
        Self::from_hash(&hash).ok()
    }
}

impl GridCell for GeohashCell {
    /// Base32 digits packed five bits each, followed by a four-bit length so
    /// that a prefix never collides with a longer hash.
    fn index(&self) -> i64 {
        let bits = self.hash.bytes().fold(0u64, |acc, b| {
            let digit = BASE32.iter().position(|&c| c == b).unwrap_or(0) as u64;
            (acc << 5) | digit
        });
        ((bits << 4) | self.hash.len() as u64) as i64
    }

    fn level(&self) -> u8 {
        self.hash.len() as u8
    }

    fn bounds(&self) -> CellBounds {
        self.bounds
    }

    fn neighbor(&self, direction: Direction) -> Option<Self> {
        match geohash::neighbor(&self.hash, to_geohash_direction(direction)) {
            Ok(hash) => Self::from_hash(&hash).ok(),
            Err(_) => self.wrapped_neighbor(direction),
        }
    }
}

fn to_geohash_direction(direction: Direction) -> geohash::Direction {
    match direction {
        Direction::N => geohash::Direction::N,
        Direction::S => geohash::Direction::S,
        Direction::E => geohash::Direction::E,
        Direction::W => geohash::Direction::W,
        Direction::NE => geohash::Direction::NE,
        Direction::NW => geohash::Direction::NW,
        Direction::SE => geohash::Direction::SE,
        Direction::SW => geohash::Direction::SW,
    }
}
