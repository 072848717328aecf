//! # Edge Finder
//!
//! Turns a bitonal raster into a small set of open polylines that trace the
//! boundaries between its black and white regions, ready for plotting.
//!
//! ## Stages
//!
//! - **Labeling**: row-major union-merge labeling of left/top connected pixels
//! - **Packing**: renumbering of canonical regions to `0..k` in scan order
//! - **Size filtering**: regions below a pixel threshold merge into their largest neighbour
//! - **Boundary extraction**: per-region pixels on a left/top transition
//! - **Contour assembly**: explicit-stack 8-connected traversal with endpoint stitching
//! - **Deduplication and simplification**: one line per physical edge, reduced in points
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgefinder::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .area_size_threshold(500)
//!     .epsilon(0.5)
//!     .build()?;
//!
//! let image = image::open("drawing.png")?;
//! let result = pipeline.process_image(&image)?;
//! result.save_svg("drawing.svg", 297.0, 210.0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Working on a grid
//!
//! ```rust
//! use edgefinder::{Grid, Pipeline};
//!
//! let grid = Grid::from_rows(&[
//!     "..........",
//!     "..######..",
//!     "..######..",
//!     "..........",
//! ])?;
//! let pipeline = Pipeline::builder().area_size_threshold(4).build()?;
//! let result = pipeline.process(&grid)?;
//! assert_eq!(result.stats.surviving_regions, 2);
//! assert!(!result.lines.is_empty());
//! # Ok::<(), edgefinder::EdgeError>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod regions;
pub mod algorithms;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use error::{EdgeError, Result};
pub use types::{Grid, Point, Polyline, TraceStats, TracedLines};
pub use config::{SimplificationMethod, TraceConfig};
pub use traits::*;
pub use regions::{RegionId, RegionLabeler, RegionSizeFilter};
pub use algorithms::*;
pub use pipeline::{Pipeline, Segmentation, builder::PipelineBuilder};
pub use io::SvgBuilder;
