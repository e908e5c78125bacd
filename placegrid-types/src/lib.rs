//! # placegrid-types
//!
//! Plain data types shared by the placegrid engine and its cell-graph
//! implementations:
//!
//! - **Coordinates**: `Coordinate`, longitude normalization
//! - **Bounds**: `CellBounds`, a latitude/longitude range that may straddle the antimeridian
//! - **Directions**: `Direction`, the eight compass neighbors of a cell
//! - **Position codes**: `PositionCode`, the nine sub-regions of a cell in palace layout
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! primitives where that makes sense.
//!
//! ## Examples
//!
//! ```rust
//! use placegrid_types::bounds::CellBounds;
//! use placegrid_types::coordinate::Coordinate;
//! use placegrid_types::position::PositionCode;
//!
//! let bounds = CellBounds::new(40.0, 41.0, -74.0, -73.0);
//! let here = Coordinate::new(40.9, -73.1);
//! assert_eq!(PositionCode::locate(&bounds, &here), PositionCode::new(2));
//! ```

pub mod bounds;
pub mod coordinate;
pub mod direction;
pub mod position;
