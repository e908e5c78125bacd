//! Geospatial grid rendering and sub-cell adjacency engine.
//!
//! Given a GPS fix, a device heading and a viewport, the engine
//! - enumerates every grid cell visible on screen by walking the cell graph,
//! - resolves which of the nine sub-regions around the user's own sub-region
//!   are adjacent, including those that lie in a neighboring cell,
//! - projects cell bounds into rotated screen rectangles using WGS84 scale
//!   factors at the cell's latitude.
//!
//! The grid itself is an external capability ([`CellGraph`]); a geohash-backed
//! implementation is included as [`geohash_grid::GeohashGrid`].
//!
//! ```rust
//! use placegrid::prelude::*;
//!
//! let renderer = GridRenderer::new(GeohashGrid::new(7)?, RenderConfig::default())?;
//! let input = FrameInput::new(Coordinate::new(40.7128, -74.0060), 390.0, 844.0)
//!     .with_accuracy(15.0)
//!     .with_heading(45.0);
//!
//! let frame = renderer.render(&input);
//! assert!(frame.is_rendered());
//! assert!(!frame.visible_cells.is_empty());
//! # Ok::<(), placegrid::GridError>(())
//! ```

pub mod adjacency;
pub mod cell;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod geodesy;
pub mod geohash_grid;
pub mod projector;
pub mod region;
pub mod render;

pub use cell::{CellGraph, GridCell, Neighbors};
pub use config::{LongitudeMode, RenderConfig};
pub use error::{GridError, Result};

pub use placegrid_types::bounds::CellBounds;
pub use placegrid_types::coordinate::{Coordinate, normalize_longitude};
pub use placegrid_types::direction::Direction;
pub use placegrid_types::position::PositionCode;

pub use adjacency::{Adjacent, SubCellHighlight};
pub use enumerator::{VisibleCellEnumerator, VisibleCells};
pub use geodesy::{CellScale, GeodesyScale, PixelScale};
pub use projector::{ContentInsets, Projector, ScreenCircle, ScreenPoint, ScreenRect, Viewport};
pub use region::VisibleRegion;
pub use render::{DrawCommand, Frame, FrameInput, FrameStatus, GridRenderer, Paint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridError, Result};

    pub use crate::{CellBounds, Coordinate, Direction, PositionCode};

    pub use crate::{CellGraph, GridCell};

    pub use crate::geohash_grid::{GeohashCell, GeohashGrid};

    pub use crate::{
        ContentInsets, DrawCommand, Frame, FrameInput, FrameStatus, GridRenderer, Paint,
    };

    pub use crate::{LongitudeMode, RenderConfig};
}
