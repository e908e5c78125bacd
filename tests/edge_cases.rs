use placegrid::GeodesyScale;
use placegrid::cell::Neighbors;
use placegrid::geohash_grid::GeohashGrid;
use placegrid::prelude::*;

/// Test 1: Antimeridian cell width
#[test]
fn test_antimeridian_cell_width() {
    let viewport = placegrid::Viewport::new(400.0, 400.0, ContentInsets::default()).unwrap();
    let projector = placegrid::Projector::new(
        Coordinate::new(0.0, 180.0),
        placegrid::PixelScale::uniform(64.0),
        0.0,
        &viewport,
    )
    .unwrap();
    let bounds = CellBounds::new(-0.5, 0.5, 179.5, -179.5);
    let rect = projector.project_bounds(&bounds).unwrap();
    assert!((rect.width - 64.0).abs() < 1e-9);
}

/// Test 2: Rendering straddling the antimeridian
#[test]
fn test_render_at_antimeridian() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(5).unwrap(), RenderConfig::default()).unwrap();
    for lng in [179.999, -179.999, 180.0, -180.0, 540.0] {
        let frame = renderer.render(&FrameInput::new(Coordinate::new(-16.5, lng), 390.0, 844.0));
        assert!(frame.is_rendered(), "lng {lng}");
        for command in &frame.commands {
            if let DrawCommand::StrokeRect { rect, .. } = command {
                assert!(rect.width > 0.0 && rect.width < 400.0, "lng {lng}: {rect:?}");
            }
        }
    }
}

/// Test 3: Near the poles
#[test]
fn test_render_near_poles() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(4).unwrap(), RenderConfig::default()).unwrap();
    for lat in [89.999, -89.999, 90.0, -90.0] {
        let frame = renderer.render(&FrameInput::new(Coordinate::new(lat, 10.0), 390.0, 844.0));
        assert!(frame.is_rendered(), "lat {lat}");
        assert!(!frame.visible_cells.is_empty());
        assert!(frame.region.unwrap().max_lat <= 90.0);
        // The user sits in an outer row; the three sub-regions beyond the
        // pole have no cell.
        assert_eq!(frame.highlights.len(), 5, "lat {lat}");
        let beyond = if lat > 0.0 { -1 } else { 1 };
        assert!(
            frame
                .highlights
                .iter()
                .all(|h| h.direction.is_none_or(|d| d.offsets().0 != beyond)),
            "lat {lat}"
        );
    }
}

/// Test 4: Invalid locations
#[test]
fn test_invalid_locations_skip_frame() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(6).unwrap(), RenderConfig::default()).unwrap();
    for location in [
        Coordinate::new(f64::NAN, 0.0),
        Coordinate::new(0.0, f64::NAN),
        Coordinate::new(f64::INFINITY, 0.0),
        Coordinate::new(91.0, 0.0),
    ] {
        let frame = renderer.render(&FrameInput::new(location, 300.0, 300.0));
        assert_eq!(frame.status, FrameStatus::InvalidLocation);
        assert!(frame.commands.is_empty());
    }
}

/// Test 5: Degenerate viewports
#[test]
fn test_degenerate_viewports_skip_frame() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(6).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(1.0, 1.0);
    let inputs = [
        FrameInput::new(here, 0.0, 300.0),
        FrameInput::new(here, 300.0, -1.0),
        FrameInput::new(here, f64::NAN, 300.0),
        FrameInput::new(here, 300.0, 300.0).with_insets(ContentInsets::vertical(200.0, 100.0)),
    ];
    for input in inputs {
        assert_eq!(renderer.render(&input).status, FrameStatus::InvalidGeometry);
    }
}

/// A grid that has no cells anywhere.
struct EmptyGrid;

#[derive(Clone)]
struct NoCell;

impl GridCell for NoCell {
    fn index(&self) -> i64 {
        0
    }
    fn level(&self) -> u8 {
        0
    }
    fn bounds(&self) -> CellBounds {
        CellBounds::new(0.0, 0.0, 0.0, 0.0)
    }
    fn neighbor(&self, _direction: Direction) -> Option<Self> {
        None
    }
    fn neighbors(&self) -> Neighbors<Self> {
        Neighbors::new()
    }
}

impl CellGraph for EmptyGrid {
    type Cell = NoCell;

    fn cell_at(&self, _coord: &Coordinate) -> Option<NoCell> {
        None
    }
}

/// Test 6: Missing cell
#[test]
fn test_missing_cell_skips_frame() {
    let renderer = GridRenderer::new(EmptyGrid, RenderConfig::default()).unwrap();
    let input = FrameInput::new(Coordinate::new(1.0, 1.0), 300.0, 300.0).with_accuracy(10.0);
    let frame = renderer.render(&input);
    assert_eq!(frame.status, FrameStatus::MissingCell);
    assert!(frame.commands.is_empty());
    assert!(frame.visible_cells.is_empty());
}

/// Test 6b: Missing cell reports the configured fallback scale
#[test]
fn test_missing_cell_uses_fallback_scale() {
    let config = RenderConfig {
        fallback_meters_per_degree: 100_000.0,
        ..RenderConfig::default()
    };
    let renderer = GridRenderer::new(EmptyGrid, config).unwrap();
    let frame = renderer.render(&FrameInput::new(Coordinate::new(1.0, 1.0), 300.0, 300.0));

    let scale = frame.scale.unwrap();
    assert!(scale.degraded);
    assert_eq!(scale.meters_per_degree_lat, 100_000.0);
    assert_eq!(scale.cell_pixel_size, 240.0);
    assert!(scale.pixels_per_meter().is_none());
}

/// Test 7: Degraded geodesy without a cell
#[test]
fn test_geodesy_fallback_is_not_an_error() {
    let scale = GeodesyScale::default().for_cell::<NoCell>(None, 240.0);
    assert!(scale.degraded);
    assert!(scale.pixels_per_meter().is_none());
}

/// Test 8: Zero-size cells are not drawn
#[test]
fn test_zero_size_cell_is_invalid_geometry() {
    let scale = GeodesyScale::default().for_cell(Some(&NoCell), 240.0);
    assert!(!scale.pixel_scale(LongitudeMode::Uniform).is_valid());
}

/// Test 9: Extreme headings
#[test]
fn test_extreme_headings() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(7).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(40.0, -3.7);
    let a = renderer.render(&FrameInput::new(here, 300.0, 300.0).with_heading(45.0));
    let b = renderer.render(&FrameInput::new(here, 300.0, 300.0).with_heading(405.0));
    let c = renderer.render(&FrameInput::new(here, 300.0, 300.0).with_heading(-315.0));
    assert_eq!(a.visible_cells, b.visible_cells);
    assert_eq!(a.commands, b.commands);
    assert_eq!(a.commands, c.commands);
}

/// Test 10: Cell cap
#[test]
fn test_tiny_cells_hit_cap() {
    let config = RenderConfig::default()
        .with_cell_pixel_size(4.0)
        .with_max_visible_cells(50);
    let renderer = GridRenderer::new(GeohashGrid::new(8).unwrap(), config).unwrap();
    let frame = renderer.render(&FrameInput::new(Coordinate::new(10.0, 10.0), 1000.0, 1000.0));
    assert!(frame.is_rendered());
    assert!(frame.truncated);
    assert_eq!(frame.visible_cells.len(), 50);
}
