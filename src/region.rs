//! The geographic area that must be enumerated for one frame.

use crate::config::{LongitudeMode, RenderConfig};
use crate::error::{GridError, Result};
use crate::geodesy::PixelScale;
use crate::projector::Viewport;
use geo::{Rect, coord};
use placegrid_types::coordinate::{Coordinate, longitude_delta, normalize_longitude};
use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle around the user's location.
///
/// Longitudes are kept continuous around the center, so `min_lng` may be
/// below −180 or `max_lng` above 180 near the antimeridian. Membership tests
/// compare wrapped longitude differences and are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRegion {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl VisibleRegion {
    /// Region covering the viewport at any rotation about its visual center.
    ///
    /// The covering radius in pixels is converted to degrees on each axis and
    /// widened by the configured buffers: `lat_buffer` on latitude, and on
    /// longitude either the flat `lng_buffer` (uniform mode) or `lat_buffer`
    /// again when the longitude scale already follows `cos(latitude)`.
    pub fn compute(
        center: &Coordinate,
        viewport: &Viewport,
        scale: &PixelScale,
        config: &RenderConfig,
    ) -> Result<Self> {
        if !center.is_valid() {
            return Err(GridError::InvalidInput(format!(
                "region center must be a valid coordinate, got {:?}",
                center
            )));
        }
        if !scale.is_valid() {
            return Err(GridError::InvalidGeometry(format!(
                "pixel scale must be positive and finite, got {:?}",
                scale
            )));
        }

        let radius = viewport.covering_radius();
        let lng_buffer = match config.longitude_mode {
            LongitudeMode::Uniform => config.lng_buffer,
            LongitudeMode::CosLatitude => config.lat_buffer,
        };
        let lat_half = radius / scale.per_degree_lat * config.lat_buffer;
        let lng_half = (radius / scale.per_degree_lng * lng_buffer).min(180.0);

        let c = center.normalized();
        Ok(Self {
            min_lat: (c.lat - lat_half).max(-90.0),
            max_lat: (c.lat + lat_half).min(90.0),
            min_lng: c.lng - lng_half,
            max_lng: c.lng + lng_half,
        })
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            normalize_longitude((self.min_lng + self.max_lng) / 2.0),
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Covers every longitude.
    pub fn is_global(&self) -> bool {
        self.lng_span() >= 360.0
    }

    pub fn crosses_antimeridian(&self) -> bool {
        !self.is_global() && (self.min_lng < -180.0 || self.max_lng > 180.0)
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.contains_with_margin(coord, 0.0, 0.0)
    }

    /// Membership with the region grown by `lat_margin` and `lng_margin`
    /// degrees on each side.
    pub fn contains_with_margin(
        &self,
        coord: &Coordinate,
        lat_margin: f64,
        lng_margin: f64,
    ) -> bool {
        if !coord.is_valid() {
            return false;
        }
        if coord.lat < self.min_lat - lat_margin || coord.lat > self.max_lat + lat_margin {
            return false;
        }
        if self.is_global() {
            return true;
        }
        let mid = (self.min_lng + self.max_lng) / 2.0;
        let half = self.lng_span() / 2.0 + lng_margin;
        longitude_delta(mid, coord.lng).abs() <= half
    }

    /// The region as a `geo::Rect` (x = longitude). Longitudes stay
    /// continuous, so the rectangle may extend past ±180°.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }
}
