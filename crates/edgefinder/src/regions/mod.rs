//! Region segmentation: labeling, repacking, and small-region elimination.

pub mod labeler;
pub mod pack;
pub mod filter;

pub use labeler::RegionLabeler;
pub use filter::{FilterOutcome, RegionSizeFilter};

/// Dense, non-negative region identifier.
pub type RegionId = u32;
