use serde::{Deserialize, Serialize};

/// Normalize a longitude in degrees into the half-open range (−180, 180].
///
/// Non-finite input is returned unchanged so callers can reject it explicitly.
///
/// # Examples
///
/// ```
/// use placegrid_types::coordinate::normalize_longitude;
///
/// assert_eq!(normalize_longitude(190.0), -170.0);
/// assert_eq!(normalize_longitude(-180.0), 180.0);
/// assert_eq!(normalize_longitude(540.0), 180.0);
/// ```
pub fn normalize_longitude(lng: f64) -> f64 {
    if !lng.is_finite() {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Signed longitude difference `to - from`, wrapped into (−180, 180].
pub fn longitude_delta(from: f64, to: f64) -> f64 {
    normalize_longitude(to - from)
}

/// A WGS84 position in degrees.
///
/// Longitude is stored as given; consumers normalize with
/// [`Coordinate::normalized`] before use.
///
/// # Examples
///
/// ```
/// use placegrid_types::coordinate::Coordinate;
///
/// let tokyo = Coordinate::new(35.6762, 139.6503);
/// assert_eq!(tokyo.lat, 35.6762);
/// assert!(tokyo.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Copy of this coordinate with the longitude wrapped into (−180, 180].
    #[inline]
    pub fn normalized(&self) -> Self {
        Self {
            lat: self.lat,
            lng: normalize_longitude(self.lng),
        }
    }

    /// Both components finite and latitude within [−90, 90].
    ///
    /// Longitude is not range-checked because it may be unnormalized.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lng, y: c.lat }
    }
}
