use placegrid::adjacency::resolve;
use placegrid::geohash_grid::GeohashGrid;
use placegrid::prelude::*;
use placegrid::{ScreenPoint, Viewport};
use std::collections::HashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rect_of(command: &DrawCommand) -> Option<&placegrid::ScreenRect> {
    match command {
        DrawCommand::FillRect { rect, .. } | DrawCommand::StrokeRect { rect, .. } => Some(rect),
        _ => None,
    }
}

#[test]
fn test_full_frame_pipeline() {
    init_logging();
    let renderer =
        GridRenderer::new(GeohashGrid::new(7).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(35.6586, 139.7454);
    let input = FrameInput::new(here, 390.0, 844.0)
        .with_accuracy(20.0)
        .with_heading(75.0)
        .with_insets(ContentInsets::vertical(47.0, 34.0));

    let frame = renderer.render(&input);
    assert_eq!(frame.status, FrameStatus::Rendered);

    let unique: HashSet<i64> = frame.visible_cells.iter().copied().collect();
    assert_eq!(unique.len(), frame.visible_cells.len());

    let center = renderer.graph().cell_at(&here).unwrap();
    assert_eq!(frame.visible_cells[0], center.index());
    assert_eq!(frame.position, PositionCode::locate(&center.bounds(), &here));

    let scale = frame.scale.unwrap();
    assert!(!scale.degraded);
    assert!((scale.pixels_per_degree_lat * center.bounds().lat_span() - 240.0).abs() < 1e-9);
}

#[test]
fn test_visible_cells_cover_screen() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(7).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(-33.8568, 151.2153);
    let input = FrameInput::new(here, 400.0, 800.0).with_heading(33.0);
    let frame = renderer.render(&input);
    let visible: HashSet<i64> = frame.visible_cells.iter().copied().collect();

    // Sample points across the screen and map them back to the ground.
    let viewport = Viewport::new(400.0, 800.0, ContentInsets::default()).unwrap();
    let scale = frame.scale.unwrap().pixel_scale(LongitudeMode::Uniform);
    let projector = placegrid::Projector::new(here, scale, 33.0, &viewport).unwrap();
    let pivot = projector.pivot();
    for sx in (0..=400).step_by(50) {
        for sy in (0..=800).step_by(50) {
            let upright = projector.unrotate(ScreenPoint::new(sx as f64, sy as f64));
            let lng = here.lng + (upright.x - pivot.x) / scale.per_degree_lng;
            let lat = here.lat - (upright.y - pivot.y) / scale.per_degree_lat;
            let cell = renderer.graph().cell_at(&Coordinate::new(lat, lng)).unwrap();
            assert!(visible.contains(&cell.index()), "screen ({sx}, {sy}) not covered");
        }
    }
}

#[test]
fn test_highlights_match_resolver() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(6).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(55.7558, 37.6173);
    let frame = renderer.render(&FrameInput::new(here, 300.0, 600.0));

    let position = frame.position.unwrap();
    let expected: Vec<(Option<Direction>, PositionCode)> =
        resolve(position).iter().map(|a| (a.direction, a.code)).collect();
    let actual: Vec<(Option<Direction>, PositionCode)> =
        frame.highlights.iter().map(|h| (h.direction, h.code)).collect();
    assert_eq!(actual, expected);

    let center = renderer.graph().cell_at(&here).unwrap();
    for h in &frame.highlights {
        match h.direction {
            None => assert_eq!(h.cell_index, center.index()),
            Some(d) => assert_eq!(h.cell_index, center.neighbor(d).unwrap().index()),
        }
    }
}

#[test]
fn test_rotation_preserves_rect_sizes() {
    let renderer =
        GridRenderer::new(GeohashGrid::new(7).unwrap(), RenderConfig::default()).unwrap();
    let here = Coordinate::new(48.8584, 2.2945);
    let upright = renderer.render(&FrameInput::new(here, 390.0, 844.0));
    let turned = renderer.render(&FrameInput::new(here, 390.0, 844.0).with_heading(200.0));

    let first = |frame: &Frame| rect_of(&frame.commands[0]).copied().unwrap();
    let a = first(&upright);
    let b = first(&turned);
    assert!((a.width - b.width).abs() < 1e-9);
    assert!((a.height - b.height).abs() < 1e-9);
    assert_eq!(b.rotation, -200.0);
}

#[test]
fn test_longitude_modes_differ_away_from_equator() {
    let here = Coordinate::new(64.1466, -21.9426);
    let uniform = GridRenderer::new(GeohashGrid::new(6).unwrap(), RenderConfig::default()).unwrap();
    let cos = GridRenderer::new(
        GeohashGrid::new(6).unwrap(),
        RenderConfig::default().with_longitude_mode(LongitudeMode::CosLatitude),
    )
    .unwrap();

    let input = FrameInput::new(here, 390.0, 844.0);
    let a = uniform.render(&input);
    let b = cos.render(&input);
    let wa = rect_of(&a.commands[0]).unwrap().width;
    let wb = rect_of(&b.commands[0]).unwrap().width;
    assert!(wb < wa);
    assert!(b.region.unwrap().lng_span() > a.region.unwrap().lng_span());
}

#[test]
fn test_config_from_json_drives_renderer() {
    let config =
        RenderConfig::from_json(r#"{ "cell_pixel_size": 120.0, "show_labels": false }"#).unwrap();
    let renderer = GridRenderer::new(GeohashGrid::new(6).unwrap(), config).unwrap();
    let frame = renderer.render(&FrameInput::new(Coordinate::new(0.5, 0.5), 300.0, 300.0));
    let rect = rect_of(&frame.commands[0]).unwrap();
    assert!((rect.height - 120.0).abs() < 1e-9);
    assert!(!frame.commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
}
