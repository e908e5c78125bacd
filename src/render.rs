//! Per-frame rendering entry point.
//!
//! [`GridRenderer::render`] turns one location/heading update into a list of
//! device-independent drawing commands. It never fails: a frame that cannot
//! be drawn comes back empty with a [`FrameStatus`] saying why.

use crate::adjacency::{SubCellHighlight, neighborhood};
use crate::cell::{CellGraph, GridCell};
use crate::config::RenderConfig;
use crate::enumerator::VisibleCellEnumerator;
use crate::error::{GridError, Result};
use crate::geodesy::{CellScale, GeodesyScale};
use crate::projector::{ContentInsets, Projector, ScreenCircle, ScreenPoint, ScreenRect, Viewport};
use crate::region::VisibleRegion;
use placegrid_types::coordinate::Coordinate;
use placegrid_types::position::PositionCode;
use serde::{Deserialize, Serialize};

/// Semantic role of a drawing command. Colors and stroke widths belong to
/// the caller's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// Outline of every visible cell
    GridLine,
    /// Fill of the cell under the user
    CurrentCell,
    /// Fill of the sub-region under the user
    CurrentSubCell,
    /// Neighbor sub-region in the same cell
    SameCellNeighbor,
    /// Neighbor sub-region in an adjacent cell
    CrossCellNeighbor,
    AccuracyCircle,
    Label,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect { rect: ScreenRect, paint: Paint },
    StrokeRect { rect: ScreenRect, paint: Paint },
    FillCircle { circle: ScreenCircle, paint: Paint },
    Text { at: ScreenPoint, text: String, rotation: f64, paint: Paint },
}

/// Why a frame does or does not carry drawing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Rendered,
    /// Non-finite or out-of-range location
    InvalidLocation,
    /// The cell graph had no cell at the location
    MissingCell,
    /// Degenerate viewport or scale
    InvalidGeometry,
}

/// One location/heading update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub location: Coordinate,
    /// Horizontal accuracy radius in meters
    pub accuracy_meters: f64,
    /// Device heading in degrees, 0 = north-up
    pub heading: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub insets: ContentInsets,
}

impl FrameInput {
    pub fn new(location: Coordinate, width: f64, height: f64) -> Self {
        Self {
            location,
            accuracy_meters: 0.0,
            heading: 0.0,
            width,
            height,
            insets: ContentInsets::default(),
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = meters;
        self
    }

    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.heading = degrees;
        self
    }

    pub fn with_insets(mut self, insets: ContentInsets) -> Self {
        self.insets = insets;
        self
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub status: FrameStatus,
    pub commands: Vec<DrawCommand>,
    /// Indices of the enumerated cells, center first
    pub visible_cells: Vec<i64>,
    /// Sub-region of the center cell under the user
    pub position: Option<PositionCode>,
    /// Neighbors of `position`, resolved to concrete cells
    pub highlights: Vec<SubCellHighlight>,
    /// Geodesy scale of the center cell. A `MissingCell` frame carries the
    /// degraded constant-fallback scale instead.
    pub scale: Option<CellScale>,
    pub region: Option<VisibleRegion>,
    /// Set when enumeration hit the cell cap
    pub truncated: bool,
}

impl Frame {
    fn skipped(status: FrameStatus) -> Self {
        Self {
            status,
            commands: Vec::new(),
            visible_cells: Vec::new(),
            position: None,
            highlights: Vec::new(),
            scale: None,
            region: None,
            truncated: false,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.status == FrameStatus::Rendered
    }
}

/// Renders grid frames over a cell graph.
///
/// Holds no per-frame state: the same input always yields the same frame.
#[derive(Debug, Clone)]
pub struct GridRenderer<G> {
    graph: G,
    config: RenderConfig,
    geodesy: GeodesyScale,
    enumerator: VisibleCellEnumerator,
}

impl<G: CellGraph> GridRenderer<G> {
    pub fn new(graph: G, config: RenderConfig) -> Result<Self> {
        config.validate().map_err(GridError::Config)?;
        Ok(Self {
            geodesy: GeodesyScale::new(config.fallback_meters_per_degree),
            enumerator: VisibleCellEnumerator::new(config.max_visible_cells),
            graph,
            config,
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one frame. See [`FrameStatus`] for the ways a frame is skipped.
    pub fn render(&self, input: &FrameInput) -> Frame {
        let location = input.location;
        if !location.is_valid() {
            log::warn!("Rejecting frame with invalid location {:?}", location);
            return Frame::skipped(FrameStatus::InvalidLocation);
        }

        let Some(center) = self.graph.cell_at(&location) else {
            log::debug!("No cell at {:?}; skipping grid", location);
            let fallback = self.geodesy.for_cell::<G::Cell>(None, self.config.cell_pixel_size);
            return Frame {
                scale: Some(fallback),
                ..Frame::skipped(FrameStatus::MissingCell)
            };
        };

        let viewport = match Viewport::new(input.width, input.height, input.insets) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                return Frame::skipped(FrameStatus::InvalidGeometry);
            }
        };

        let heading = if input.heading.is_finite() {
            input.heading
        } else {
            log::debug!("Heading unavailable; drawing north-up");
            0.0
        };

        let scale = self.geodesy.for_cell(Some(&center), self.config.cell_pixel_size);
        let pixel_scale = scale.pixel_scale(self.config.longitude_mode);
        let projector = match Projector::new(location, pixel_scale, heading, &viewport) {
            Ok(projector) => projector,
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                return Frame::skipped(FrameStatus::InvalidGeometry);
            }
        };
        let region = match VisibleRegion::compute(&location, &viewport, &pixel_scale, &self.config)
        {
            Ok(region) => region,
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                return Frame::skipped(FrameStatus::InvalidGeometry);
            }
        };

        let visible = self.enumerator.enumerate(&center, &region);
        let position = PositionCode::locate(&center.bounds(), &location);
        let highlights = position
            .map(|code| neighborhood(&center, code))
            .unwrap_or_default();

        let mut commands = Vec::with_capacity(visible.len() + 16);
        if let Some(rect) = projector.project_bounds(&center.bounds()) {
            commands.push(DrawCommand::FillRect {
                rect,
                paint: Paint::CurrentCell,
            });
        }
        for highlight in &highlights {
            if let Some(rect) = projector.project_bounds(&highlight.bounds) {
                let paint = if highlight.direction.is_some() {
                    Paint::CrossCellNeighbor
                } else {
                    Paint::SameCellNeighbor
                };
                commands.push(DrawCommand::FillRect { rect, paint });
            }
        }
        if let Some(code) = position
            && let Some(rect) = center
                .sub_cell_bounds(code)
                .and_then(|b| projector.project_bounds(&b))
        {
            commands.push(DrawCommand::FillRect {
                rect,
                paint: Paint::CurrentSubCell,
            });
        }
        for cell in &visible.cells {
            if let Some(rect) = projector.project_bounds(&cell.bounds()) {
                commands.push(DrawCommand::StrokeRect {
                    rect,
                    paint: Paint::GridLine,
                });
            }
        }
        if let Some(circle) = projector.project_accuracy(&location, input.accuracy_meters, &scale) {
            commands.push(DrawCommand::FillCircle {
                circle,
                paint: Paint::AccuracyCircle,
            });
        }
        if self.config.show_labels {
            self.push_labels(&mut commands, &center, &projector);
        }

        log::trace!(
            "Frame at {:?}: {} cells, {} commands, position {:?}",
            location,
            visible.len(),
            commands.len(),
            position
        );

        Frame {
            status: FrameStatus::Rendered,
            visible_cells: visible.indices(),
            truncated: visible.truncated,
            commands,
            position,
            highlights,
            scale: Some(scale),
            region: Some(region),
        }
    }

    /// Position-code labels in the center cell's sub-regions plus its
    /// subdivision level. Labels are placed at rotated positions but drawn
    /// upright.
    fn push_labels(
        &self,
        commands: &mut Vec<DrawCommand>,
        center: &G::Cell,
        projector: &Projector,
    ) {
        for code in PositionCode::ALL {
            if let Some(bounds) = center.sub_cell_bounds(code) {
                commands.push(DrawCommand::Text {
                    at: projector.project(&bounds.center()),
                    text: code.to_string(),
                    rotation: 0.0,
                    paint: Paint::Label,
                });
            }
        }
        let bounds = center.bounds();
        let top = Coordinate::new(bounds.north, bounds.center().lng);
        commands.push(DrawCommand::Text {
            at: projector.project(&top),
            text: format!("k={}", center.level()),
            rotation: 0.0,
            paint: Paint::Label,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash_grid::GeohashGrid;

    fn renderer() -> GridRenderer<GeohashGrid> {
        GridRenderer::new(GeohashGrid::new(7).unwrap(), RenderConfig::default()).unwrap()
    }

    fn count(frame: &Frame, paint: Paint) -> usize {
        frame
            .commands
            .iter()
            .filter(|c| match c {
                DrawCommand::FillRect { paint: p, .. }
                | DrawCommand::StrokeRect { paint: p, .. }
                | DrawCommand::FillCircle { paint: p, .. }
                | DrawCommand::Text { paint: p, .. } => *p == paint,
            })
            .count()
    }

    #[test]
    fn test_render_basic_frame() {
        let input = FrameInput::new(Coordinate::new(52.5200, 13.4050), 390.0, 844.0)
            .with_accuracy(12.0)
            .with_heading(30.0)
            .with_insets(ContentInsets::vertical(47.0, 34.0));
        let frame = renderer().render(&input);

        assert!(frame.is_rendered());
        assert!(frame.position.is_some());
        assert_eq!(frame.highlights.len(), 8);
        assert_eq!(count(&frame, Paint::CurrentCell), 1);
        assert_eq!(count(&frame, Paint::CurrentSubCell), 1);
        assert_eq!(count(&frame, Paint::GridLine), frame.visible_cells.len());
        assert_eq!(count(&frame, Paint::AccuracyCircle), 1);
        assert_eq!(count(&frame, Paint::Label), 10);
        assert_eq!(
            count(&frame, Paint::SameCellNeighbor) + count(&frame, Paint::CrossCellNeighbor),
            8
        );
    }

    #[test]
    fn test_render_invalid_location() {
        let frame =
            renderer().render(&FrameInput::new(Coordinate::new(f64::NAN, 0.0), 100.0, 100.0));
        assert_eq!(frame.status, FrameStatus::InvalidLocation);
        assert!(frame.commands.is_empty());
    }

    #[test]
    fn test_render_degenerate_viewport() {
        let frame = renderer().render(&FrameInput::new(Coordinate::new(1.0, 1.0), 0.0, 100.0));
        assert_eq!(frame.status, FrameStatus::InvalidGeometry);
        assert!(frame.visible_cells.is_empty());
    }

    #[test]
    fn test_render_without_labels_or_accuracy() {
        let config = RenderConfig::default().with_labels(false);
        let r = GridRenderer::new(GeohashGrid::new(7).unwrap(), config).unwrap();
        let frame = r.render(&FrameInput::new(Coordinate::new(1.0, 1.0), 300.0, 300.0));
        assert_eq!(count(&frame, Paint::Label), 0);
        assert_eq!(count(&frame, Paint::AccuracyCircle), 0);
    }

    #[test]
    fn test_render_nan_heading_is_north_up() {
        let here = Coordinate::new(1.0, 1.0);
        let r = renderer();
        let a = r.render(&FrameInput::new(here, 300.0, 300.0).with_heading(f64::NAN));
        let b = r.render(&FrameInput::new(here, 300.0, 300.0));
        assert_eq!(a.commands, b.commands);
    }

    #[test]
    fn test_renderer_rejects_bad_config() {
        let config = RenderConfig {
            lat_buffer: 0.0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            GridRenderer::new(GeohashGrid::new(7).unwrap(), config),
            Err(GridError::Config(_))
        ));
    }
}
