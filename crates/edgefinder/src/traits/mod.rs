use image::DynamicImage;
use crate::{error::Result, types::{Grid, Polyline}};

/// Trait for turning a decoded raster into a bitonal grid
pub trait GridClassifier: Send + Sync {
    /// Classify every pixel as one of two classes
    fn classify(&self, image: &DynamicImage) -> Result<Grid>;
}

/// Trait for polyline point-reduction algorithms
pub trait LineSimplifier: Send + Sync {
    /// Reduce the points of `line`, keeping its endpoints and staying within `tolerance`
    fn simplify(&self, line: &[[f64; 2]], tolerance: f64) -> Polyline;
}
