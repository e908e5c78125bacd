//! Render Frame Example
//!
//! Renders a few frames over a geohash grid and prints what would be drawn:
//! the sub-region under the user, its eight resolved neighbors, and a
//! summary of the draw commands. Set `RUST_LOG=debug` to see skipped frames.

use placegrid::prelude::*;
use std::error::Error;

fn describe(name: &str, frame: &Frame) {
    println!("   {}:", name);
    if !frame.is_rendered() {
        println!("     skipped ({:?})", frame.status);
        return;
    }
    if let Some(position) = frame.position {
        println!("     user in sub-region {}", position);
    }
    for highlight in &frame.highlights {
        let place = match highlight.direction {
            Some(direction) => format!("{} cell", direction),
            None => "same cell".to_string(),
        };
        println!("       neighbor {} ({})", highlight.code, place);
    }
    let strokes = frame
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
        .count();
    println!(
        "     {} visible cells, {} grid strokes, {} commands{}",
        frame.visible_cells.len(),
        strokes,
        frame.commands.len(),
        if frame.truncated { " (truncated)" } else { "" }
    );
    if let Some(scale) = frame.scale {
        println!(
            "     {:.1} m per cell height, {:.1} px per degree",
            scale.cell_height_meters, scale.pixels_per_degree_lat
        );
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== placegrid - Frame Rendering ===\n");

    let renderer = GridRenderer::new(GeohashGrid::new(7)?, RenderConfig::default())?;
    let insets = ContentInsets::vertical(47.0, 34.0);

    // ========================================
    // 1. A plain frame
    // ========================================
    println!("1. North-up frame in Manhattan");
    let input = FrameInput::new(Coordinate::new(40.7580, -73.9855), 390.0, 844.0)
        .with_accuracy(12.0)
        .with_insets(insets);
    describe("Times Square", &renderer.render(&input));

    // ========================================
    // 2. Heading-up
    // ========================================
    println!("\n2. Heading-up frame");
    let input = input.with_heading(135.0);
    describe("Times Square facing SE", &renderer.render(&input));

    // ========================================
    // 3. Across the antimeridian
    // ========================================
    println!("\n3. Antimeridian");
    let input = FrameInput::new(Coordinate::new(-16.7, 179.9999), 390.0, 844.0).with_insets(insets);
    describe("Fiji", &renderer.render(&input));

    // ========================================
    // 4. Longitude scaling
    // ========================================
    println!("\n4. Latitude-aware longitude scale");
    let cos_renderer = GridRenderer::new(
        GeohashGrid::new(7)?,
        RenderConfig::default().with_longitude_mode(LongitudeMode::CosLatitude),
    )?;
    let input =
        FrameInput::new(Coordinate::new(69.6492, 18.9553), 390.0, 844.0).with_insets(insets);
    describe("Tromsø (uniform)", &renderer.render(&input));
    describe("Tromsø (cos latitude)", &cos_renderer.render(&input));

    // ========================================
    // 5. Bad input
    // ========================================
    println!("\n5. Invalid input");
    let input = FrameInput::new(Coordinate::new(f64::NAN, 0.0), 390.0, 844.0);
    describe("NaN latitude", &renderer.render(&input));
    let input = FrameInput::new(Coordinate::new(0.0, 0.0), 0.0, 844.0);
    describe("Zero-width view", &renderer.render(&input));

    println!("\n   First frame as JSON:");
    let frame = renderer.render(&FrameInput::new(Coordinate::new(51.5007, -0.1246), 200.0, 200.0));
    if let Some(command) = frame.commands.first() {
        println!("     {}", serde_json::to_string(command)?);
    }

    Ok(())
}
