//! Ellipsoid-correct scale factors for drawing cells.
//!
//! A cell's height in degrees is fixed by the grid, but its height in meters
//! depends on where it sits: a degree of latitude is about 1% longer at the
//! poles than at the equator. The accuracy circle is drawn in meters, so the
//! meters-to-pixels conversion is taken from the WGS84 meridional radius of
//! curvature at the cell's own latitude rather than a global constant.

use crate::cell::GridCell;
use crate::config::LongitudeMode;

/// WGS84 semi-major axis in meters.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared.
pub const WGS84_ECCENTRICITY_SQ: f64 = 0.006_694_379_990_14;

/// Smallest longitude-to-latitude pixel ratio used in cos-latitude mode.
/// Keeps the longitude scale away from zero within a fraction of a degree of
/// the poles.
const MIN_LNG_RATIO: f64 = 0.01;

/// Meridional radius of curvature `M(φ) = a(1−e²) / (1 − e² sin²φ)^1.5`
/// in meters, for a latitude in degrees.
///
/// # Examples
///
/// ```rust
/// use placegrid::geodesy::meridional_radius;
///
/// let equator = meridional_radius(0.0);
/// assert!((equator - 6_335_439.327).abs() < 0.01);
/// assert!(meridional_radius(45.0) > equator);
/// ```
pub fn meridional_radius(lat_deg: f64) -> f64 {
    let sin_phi = lat_deg.to_radians().sin();
    let w = 1.0 - WGS84_ECCENTRICITY_SQ * sin_phi * sin_phi;
    WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_ECCENTRICITY_SQ) / w.powf(1.5)
}

/// Prime-vertical radius of curvature `N(φ) = a / sqrt(1 − e² sin²φ)` in
/// meters.
pub fn prime_vertical_radius(lat_deg: f64) -> f64 {
    let sin_phi = lat_deg.to_radians().sin();
    WGS84_SEMI_MAJOR_AXIS / (1.0 - WGS84_ECCENTRICITY_SQ * sin_phi * sin_phi).sqrt()
}

/// Length of one degree of latitude at `lat_deg`, in meters.
pub fn meters_per_degree_lat(lat_deg: f64) -> f64 {
    meridional_radius(lat_deg) * 1f64.to_radians()
}

/// Length of one degree of longitude along the parallel at `lat_deg`.
pub fn meters_per_degree_lng(lat_deg: f64) -> f64 {
    prime_vertical_radius(lat_deg) * lat_deg.to_radians().cos() * 1f64.to_radians()
}

/// Pixel scale for each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub per_degree_lat: f64,
    pub per_degree_lng: f64,
}

impl PixelScale {
    pub fn uniform(per_degree: f64) -> Self {
        Self {
            per_degree_lat: per_degree,
            per_degree_lng: per_degree,
        }
    }

    /// Both factors finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.per_degree_lat.is_finite()
            && self.per_degree_lat > 0.0
            && self.per_degree_lng.is_finite()
            && self.per_degree_lng > 0.0
    }
}

/// Scale factors for one cell at one latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    /// Latitude at which the factors were evaluated.
    pub center_lat: f64,
    pub meters_per_degree_lat: f64,
    /// Cell height on the ground. Zero when no cell span was available.
    pub cell_height_meters: f64,
    /// Zero when no cell span was available.
    pub pixels_per_degree_lat: f64,
    pub cell_pixel_size: f64,
    /// Set when the constant fallback stood in for the ellipsoid.
    pub degraded: bool,
}

impl CellScale {
    /// Meters-to-pixels factor, or `None` when any denominator is unusable.
    pub fn pixels_per_meter(&self) -> Option<f64> {
        let usable = self.cell_height_meters.is_finite()
            && self.cell_height_meters > 0.0
            && self.cell_pixel_size.is_finite()
            && self.cell_pixel_size > 0.0;
        usable.then(|| self.cell_pixel_size / self.cell_height_meters)
    }

    /// Per-axis pixel scale under the given longitude mode.
    pub fn pixel_scale(&self, mode: LongitudeMode) -> PixelScale {
        let lat = self.pixels_per_degree_lat;
        match mode {
            LongitudeMode::Uniform => PixelScale::uniform(lat),
            LongitudeMode::CosLatitude => {
                let ratio = if self.degraded {
                    self.center_lat.to_radians().cos()
                } else {
                    meters_per_degree_lng(self.center_lat) / self.meters_per_degree_lat
                };
                PixelScale {
                    per_degree_lat: lat,
                    per_degree_lng: lat * ratio.max(MIN_LNG_RATIO),
                }
            }
        }
    }
}

/// Converts cell spans into ground and screen scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesyScale {
    fallback_meters_per_degree: f64,
}

impl GeodesyScale {
    pub fn new(fallback_meters_per_degree: f64) -> Self {
        Self {
            fallback_meters_per_degree,
        }
    }

    /// Scale for a cell of `lat_span_deg` centered at `center_lat_deg`, drawn
    /// `cell_pixel_size` pixels tall.
    ///
    /// Never fails. A non-finite center latitude falls back to the constant
    /// meters-per-degree; an unusable span or pixel size yields zero pixel
    /// factors, which downstream code treats as "skip this frame".
    pub fn for_span(
        &self,
        lat_span_deg: f64,
        center_lat_deg: f64,
        cell_pixel_size: f64,
    ) -> CellScale {
        let lat_ok = center_lat_deg.is_finite() && (-90.0..=90.0).contains(&center_lat_deg);
        let (meters_per_degree_lat, degraded) = if lat_ok {
            (meters_per_degree_lat(center_lat_deg), false)
        } else {
            (self.fallback_meters_per_degree, true)
        };

        let span_ok = lat_span_deg.is_finite() && lat_span_deg > 0.0;
        let size_ok = cell_pixel_size.is_finite() && cell_pixel_size > 0.0;
        if !span_ok || !size_ok {
            log::debug!(
                "Unusable cell span {} or pixel size {}; scale degraded",
                lat_span_deg,
                cell_pixel_size
            );
            return CellScale {
                center_lat: if lat_ok { center_lat_deg } else { 0.0 },
                meters_per_degree_lat,
                cell_height_meters: 0.0,
                pixels_per_degree_lat: 0.0,
                cell_pixel_size,
                degraded: true,
            };
        }

        CellScale {
            center_lat: if lat_ok { center_lat_deg } else { 0.0 },
            meters_per_degree_lat,
            cell_height_meters: meters_per_degree_lat * lat_span_deg,
            pixels_per_degree_lat: cell_pixel_size / lat_span_deg,
            cell_pixel_size,
            degraded,
        }
    }

    /// Scale for an optional cell. With no cell the result is the degraded
    /// constant-fallback scale.
    pub fn for_cell<C: GridCell>(&self, cell: Option<&C>, cell_pixel_size: f64) -> CellScale {
        match cell {
            Some(cell) => {
                let bounds = cell.bounds();
                self.for_span(bounds.lat_span(), cell.center().lat, cell_pixel_size)
            }
            None => self.for_span(f64::NAN, f64::NAN, cell_pixel_size),
        }
    }
}

impl Default for GeodesyScale {
    fn default() -> Self {
        Self::new(111_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash_grid::GeohashCell;
    use approx::assert_relative_eq;
    use geo::{Distance, Geodesic, Point};

    const M_MIN: f64 = 6_335_439.0;
    const M_MAX: f64 = 6_399_594.0;

    #[test]
    fn test_meridional_radius_range_and_monotonic() {
        let m0 = meridional_radius(0.0);
        let m45 = meridional_radius(45.0);
        assert!((M_MIN..=M_MAX).contains(&m0), "{m0}");
        assert!((M_MIN..=M_MAX).contains(&m45), "{m45}");
        assert!(m45 > m0);
        assert!(meridional_radius(90.0) <= M_MAX + 1.0);
        assert_relative_eq!(meridional_radius(-30.0), meridional_radius(30.0));
    }

    #[test]
    fn test_cell_height_matches_geodesic_distance() {
        let scale = GeodesyScale::default().for_span(0.01, 45.0, 100.0);
        let south = Point::new(10.0, 44.995);
        let north = Point::new(10.0, 45.005);
        let geodesic = Geodesic.distance(south, north);
        assert_relative_eq!(scale.cell_height_meters, geodesic, max_relative = 1e-6);
        assert!(!scale.degraded);
    }

    #[test]
    fn test_degree_of_longitude_matches_geodesic() {
        let west = Point::new(0.0, 60.0);
        let east = Point::new(0.001, 60.0);
        let geodesic = Geodesic.distance(west, east) * 1000.0;
        assert_relative_eq!(meters_per_degree_lng(60.0), geodesic, max_relative = 1e-6);
    }

    #[test]
    fn test_pixels_per_degree() {
        let scale = GeodesyScale::default().for_span(0.5, 10.0, 200.0);
        assert_eq!(scale.pixels_per_degree_lat, 400.0);
        let ppm = scale.pixels_per_meter().unwrap();
        assert_relative_eq!(ppm * scale.cell_height_meters, 200.0);
    }

    #[test]
    fn test_fallback_without_cell() {
        let scale = GeodesyScale::default().for_cell::<GeohashCell>(None, 240.0);
        assert!(scale.degraded);
        assert_eq!(scale.meters_per_degree_lat, 111_000.0);
        assert_eq!(scale.pixels_per_degree_lat, 0.0);
        assert!(scale.pixels_per_meter().is_none());
    }

    #[test]
    fn test_fallback_with_bad_latitude_keeps_span() {
        let scale = GeodesyScale::new(100_000.0).for_span(0.1, f64::NAN, 50.0);
        assert!(scale.degraded);
        assert_relative_eq!(scale.cell_height_meters, 10_000.0);
        assert_relative_eq!(scale.pixels_per_degree_lat, 500.0);
    }

    #[test]
    fn test_zero_pixel_size_never_divides() {
        let scale = GeodesyScale::default().for_span(0.1, 10.0, 0.0);
        assert!(scale.pixels_per_meter().is_none());
        assert!(!scale.pixel_scale(LongitudeMode::Uniform).is_valid());
    }

    #[test]
    fn test_pixel_scale_modes() {
        let scale = GeodesyScale::default().for_span(1.0, 60.0, 100.0);
        let uniform = scale.pixel_scale(LongitudeMode::Uniform);
        assert_eq!(uniform.per_degree_lng, uniform.per_degree_lat);

        let cos = scale.pixel_scale(LongitudeMode::CosLatitude);
        assert!(cos.per_degree_lng < cos.per_degree_lat);
        assert_relative_eq!(cos.per_degree_lng / cos.per_degree_lat, 0.5, epsilon = 0.01);

        let polar = GeodesyScale::default().for_span(1.0, 90.0, 100.0);
        assert!(polar.pixel_scale(LongitudeMode::CosLatitude).is_valid());
    }

    #[test]
    fn test_for_cell_uses_cell_latitude() {
        let cell = GeohashCell::from_hash("gcpvj0").unwrap();
        let scale = GeodesyScale::default().for_cell(Some(&cell), 240.0);
        assert_eq!(scale.center_lat, cell.center().lat);
        assert_relative_eq!(
            scale.cell_height_meters,
            meters_per_degree_lat(cell.center().lat) * cell.bounds().lat_span()
        );
    }
}
