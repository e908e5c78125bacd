use crate::coordinate::{Coordinate, normalize_longitude};
use geo::Rect;
use serde::{Deserialize, Serialize};

/// The geographic extent of a cell or sub-cell.
///
/// Latitude is an ordinary `south..=north` range. The longitude range runs
/// eastward from `west` to `east` and may straddle the antimeridian, in which
/// case `east` is numerically less than `west` once both are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl CellBounds {
    /// Create bounds from latitude and longitude ranges in degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use placegrid_types::bounds::CellBounds;
    ///
    /// let straddling = CellBounds::new(10.0, 11.0, 179.5, -179.5);
    /// assert_eq!(straddling.lng_span(), 1.0);
    /// ```
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// Create bounds from a `geo::Rect` in x = longitude, y = latitude order.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }

    /// Convert into a `geo::Rect`. The east edge is unwrapped so that it is
    /// never less than the west edge, which can push it past 180°.
    pub fn to_rect(&self) -> Rect {
        let west = normalize_longitude(self.west);
        Rect::new(
            geo::coord! { x: west, y: self.south },
            geo::coord! { x: west + self.lng_span(), y: self.north },
        )
    }

    /// All edges finite and `south <= north`.
    pub fn is_valid(&self) -> bool {
        self.south.is_finite()
            && self.north.is_finite()
            && self.west.is_finite()
            && self.east.is_finite()
            && self.south <= self.north
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Eastward longitude extent in degrees, in [0, 360].
    pub fn lng_span(&self) -> f64 {
        let raw = self.east - self.west;
        if (0.0..=360.0).contains(&raw) {
            return raw;
        }
        let span = normalize_longitude(self.east) - normalize_longitude(self.west);
        if span < 0.0 { span + 360.0 } else { span }
    }

    /// West edge normalized into (−180, 180].
    pub fn normalized_west(&self) -> f64 {
        normalize_longitude(self.west)
    }

    /// Geometric center, longitude normalized.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south + self.north) / 2.0,
            normalize_longitude(self.west + self.lng_span() / 2.0),
        )
    }

    /// Check whether a coordinate lies inside the bounds (edges inclusive).
    pub fn contains(&self, coord: &Coordinate) -> bool {
        if coord.lat < self.south || coord.lat > self.north {
            return false;
        }
        let offset = (coord.lng - self.west).rem_euclid(360.0);
        offset <= self.lng_span()
    }

    /// Fractional position of a coordinate inside the bounds, measured from
    /// the north-west corner: `(down, right)` each in [0, 1] when contained.
    pub fn fraction_of(&self, coord: &Coordinate) -> (f64, f64) {
        let lat_span = self.lat_span();
        let lng_span = self.lng_span();
        let down = if lat_span > 0.0 {
            (self.north - coord.lat) / lat_span
        } else {
            0.5
        };
        let right = if lng_span > 0.0 {
            let offset = (coord.lng - self.west).rem_euclid(360.0);
            offset / lng_span
        } else {
            0.5
        };
        (down, right)
    }

    /// One cell of an `n × n` split, addressed from the north-west corner.
    pub fn split(&self, n: u32, row: u32, col: u32) -> Self {
        let n = n.max(1) as f64;
        let lat_step = self.lat_span() / n;
        let lng_step = self.lng_span() / n;
        let north = self.north - row as f64 * lat_step;
        let west = self.west + col as f64 * lng_step;
        Self::new(
            north - lat_step,
            north,
            normalize_longitude(west),
            normalize_longitude(west + lng_step),
        )
    }
}
