use thiserror::Error;

use crate::regions::RegionId;
use crate::types::Point;

/// Errors raised by the tracing core and its adapters.
///
/// The first group are invariant breaches: they abort the run and are never
/// retried. The remaining variants wrap input and output failures.
#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Internal error: pixel ({x}, {y}) was read before a region was assigned")]
    UnsetAccess { x: usize, y: usize },

    #[error("Internal error: region {id} was merged away and cannot be assigned")]
    StaleIdReuse { id: RegionId },

    #[error("Internal error: region {id} is not allocated (region count {region_count})")]
    StructuralDesync { id: RegionId, region_count: usize },

    #[error("Internal error: region {id} with {members} members has no neighbour to merge into")]
    OrphanRegion { id: RegionId, members: usize },

    #[error("Internal error: traversal from {start:?} exhausted its stack without a result")]
    TraversalExhaustion { start: Point },

    #[error("Pixel ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Area size threshold {threshold} must be below the pixel count {pixels}")]
    ThresholdExceedsImage { threshold: usize, pixels: usize },

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, EdgeError>;
