//! Geographic-to-screen projection under device heading.
//!
//! The user's location sits at the viewport's visual center, which is the
//! center of the band left between the top and bottom content insets rather
//! than the raw view center. Geographic offsets from that location are scaled
//! to pixels (latitude up, screen y down) and rotated by `-heading` about the
//! visual center so that the direction the device faces points up.

use crate::error::{GridError, Result};
use crate::geodesy::{CellScale, PixelScale};
use placegrid_types::bounds::CellBounds;
use placegrid_types::coordinate::{Coordinate, longitude_delta};
use serde::{Deserialize, Serialize};

/// A point in device-independent pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Rotate `point` by `degrees` about `pivot`. Positive angles turn clockwise
/// on a y-down screen.
pub fn rotate_about(point: ScreenPoint, pivot: ScreenPoint, degrees: f64) -> ScreenPoint {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    ScreenPoint::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}

/// Space taken by chrome on each side of the view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentInsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ContentInsets {
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            top,
            bottom,
            ..Self::default()
        }
    }
}

/// Validated drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    insets: ContentInsets,
}

impl Viewport {
    /// Rejects non-finite or non-positive dimensions, negative insets, and
    /// insets that leave no usable area.
    pub fn new(width: f64, height: f64, insets: ContentInsets) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GridError::InvalidGeometry(format!(
                "viewport must be positive and finite, got {}x{}",
                width, height
            )));
        }
        let sides = [insets.top, insets.bottom, insets.left, insets.right];
        if sides.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GridError::InvalidGeometry(format!(
                "content insets must be non-negative and finite, got {:?}",
                insets
            )));
        }
        if insets.top + insets.bottom >= height || insets.left + insets.right >= width {
            return Err(GridError::InvalidGeometry(format!(
                "content insets {:?} leave no usable area in {}x{}",
                insets, width, height
            )));
        }
        Ok(Self {
            width,
            height,
            insets,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn insets(&self) -> ContentInsets {
        self.insets
    }

    /// Center of the area between the insets.
    pub fn visual_center(&self) -> ScreenPoint {
        let i = self.insets;
        ScreenPoint::new(
            i.left + (self.width - i.left - i.right) / 2.0,
            i.top + (self.height - i.top - i.bottom) / 2.0,
        )
    }

    /// Distance from the visual center to the farthest view corner. A circle
    /// of this radius covers the whole view at any rotation.
    pub fn covering_radius(&self) -> f64 {
        let c = self.visual_center();
        [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(self.width, 0.0),
            ScreenPoint::new(0.0, self.height),
            ScreenPoint::new(self.width, self.height),
        ]
        .iter()
        .map(|corner| corner.distance_to(&c))
        .fold(0.0, f64::max)
    }
}

/// A rectangle rotated about its own center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub center: ScreenPoint,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

impl ScreenRect {
    /// Corners clockwise from the (unrotated) top-left.
    pub fn corners(&self) -> [ScreenPoint; 4] {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let c = self.center;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .map(|(dx, dy)| rotate_about(ScreenPoint::new(c.x + dx, c.y + dy), c, self.rotation))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCircle {
    pub center: ScreenPoint,
    pub radius: f64,
}

/// Projection for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    origin: Coordinate,
    scale: PixelScale,
    heading: f64,
    pivot: ScreenPoint,
}

impl Projector {
    /// `origin` is drawn at the viewport's visual center. `heading` is the
    /// device heading in degrees, 0 meaning north-up.
    pub fn new(
        origin: Coordinate,
        scale: PixelScale,
        heading: f64,
        viewport: &Viewport,
    ) -> Result<Self> {
        if !origin.is_valid() {
            return Err(GridError::InvalidInput(format!(
                "projection origin must be a valid coordinate, got {:?}",
                origin
            )));
        }
        if !scale.is_valid() {
            return Err(GridError::InvalidGeometry(format!(
                "pixel scale must be positive and finite, got {:?}",
                scale
            )));
        }
        if !heading.is_finite() {
            return Err(GridError::InvalidGeometry(format!(
                "heading must be finite, got {}",
                heading
            )));
        }
        Ok(Self {
            origin: origin.normalized(),
            scale,
            heading: heading.rem_euclid(360.0),
            pivot: viewport.visual_center(),
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn scale(&self) -> PixelScale {
        self.scale
    }

    /// Heading in [0, 360).
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn pivot(&self) -> ScreenPoint {
        self.pivot
    }

    /// Screen rotation applied to geographic content, in degrees.
    pub fn rotation(&self) -> f64 {
        -self.heading
    }

    /// Unrotated pixel offset of a coordinate from the origin. The shorter
    /// way around the antimeridian is taken.
    pub fn offset(&self, coord: &Coordinate) -> (f64, f64) {
        let d_lng = longitude_delta(self.origin.lng, coord.lng);
        let d_lat = coord.lat - self.origin.lat;
        (d_lng * self.scale.per_degree_lng, -d_lat * self.scale.per_degree_lat)
    }

    /// Screen position of a coordinate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use placegrid::geodesy::PixelScale;
    /// use placegrid::projector::{ContentInsets, Projector, Viewport};
    /// use placegrid::Coordinate;
    ///
    /// let viewport = Viewport::new(400.0, 800.0, ContentInsets::default())?;
    /// let origin = Coordinate::new(10.0, 20.0);
    /// let projector = Projector::new(origin, PixelScale::uniform(100.0), 90.0, &viewport)?;
    ///
    /// // Facing east, a point due east of the user is straight up.
    /// let p = projector.project(&Coordinate::new(10.0, 21.0));
    /// assert!((p.x - 200.0).abs() < 1e-9);
    /// assert!((p.y - 300.0).abs() < 1e-9);
    /// # Ok::<(), placegrid::GridError>(())
    /// ```
    pub fn project(&self, coord: &Coordinate) -> ScreenPoint {
        let (dx, dy) = self.offset(coord);
        let unrotated = ScreenPoint::new(self.pivot.x + dx, self.pivot.y + dy);
        rotate_about(unrotated, self.pivot, self.rotation())
    }

    /// Undo the heading rotation of a screen point.
    pub fn unrotate(&self, point: ScreenPoint) -> ScreenPoint {
        rotate_about(point, self.pivot, self.heading)
    }

    /// Rotated screen rectangle for geographic bounds. Edges are normalized
    /// independently, so a box straddling the antimeridian keeps its true
    /// width. Returns `None` for invalid bounds.
    pub fn project_bounds(&self, bounds: &CellBounds) -> Option<ScreenRect> {
        if !bounds.is_valid() {
            return None;
        }
        let lng_span = bounds.lng_span();
        let center_lng = bounds.normalized_west() + lng_span / 2.0;
        let center_lat = (bounds.south + bounds.north) / 2.0;

        let center = self.project(&Coordinate::new(center_lat, center_lng));
        Some(ScreenRect {
            center,
            width: lng_span * self.scale.per_degree_lng,
            height: bounds.lat_span() * self.scale.per_degree_lat,
            rotation: self.rotation(),
        })
    }

    /// Accuracy circle around `coord`. The radius uses the cell's own
    /// meters-to-pixels factor. Returns `None` for a non-positive or
    /// non-finite accuracy, or when the scale has no usable factor.
    pub fn project_accuracy(
        &self,
        coord: &Coordinate,
        accuracy_meters: f64,
        scale: &CellScale,
    ) -> Option<ScreenCircle> {
        if !(accuracy_meters.is_finite() && accuracy_meters > 0.0) {
            return None;
        }
        let pixels_per_meter = scale.pixels_per_meter()?;
        Some(ScreenCircle {
            center: self.project(coord),
            radius: accuracy_meters * pixels_per_meter,
        })
    }
}
