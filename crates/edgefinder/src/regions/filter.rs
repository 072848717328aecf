use tracing::{debug, info};

use crate::error::{EdgeError, Result};

use super::{RegionId, RegionLabeler};

/// Merges every region smaller than a threshold into its largest neighbour.
#[derive(Debug, Clone)]
pub struct RegionSizeFilter {
    pub area_size_threshold: usize,
}

/// Result of running [`RegionSizeFilter::apply`].
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Packed labeling in which no region is below the threshold
    pub regions: RegionLabeler,
    /// Number of passes that merged at least one region
    pub passes: usize,
}

impl Default for RegionSizeFilter {
    fn default() -> Self {
        Self { area_size_threshold: 500 }
    }
}

impl RegionSizeFilter {
    pub fn new(area_size_threshold: usize) -> Self {
        Self { area_size_threshold }
    }

    /// Merge small regions until every survivor meets the threshold.
    ///
    /// `packed` must come from [`RegionLabeler::pack_areas`]. A labeling that
    /// is already a single region is returned as is. Otherwise the threshold
    /// must be below the pixel count, so that the last surviving region can
    /// never fall short of it.
    pub fn apply(&self, packed: RegionLabeler) -> Result<FilterOutcome> {
        let pixels = packed.width() * packed.height();
        if packed.area_count() > 1 && self.area_size_threshold >= pixels {
            return Err(EdgeError::ThresholdExceedsImage {
                threshold: self.area_size_threshold,
                pixels,
            });
        }

        let mut regions = packed;
        let mut passes = 0;
        while self.has_small_region(&regions) {
            passes += 1;
            let mut merged = 0;
            for id in 0..regions.area_count() as RegionId {
                let members = regions.member_count(id)?;
                if !regions.is_canonical(id) || members >= self.area_size_threshold {
                    continue;
                }
                let target = regions
                    .get_largest_neighbour_area(id)?
                    .ok_or(EdgeError::OrphanRegion { id, members })?;
                regions.merge_areas(id, target)?;
                merged += 1;
            }
            regions = regions.pack_areas()?;
            debug!(
                "Size filter pass {passes}: merged {merged} regions, {} remain",
                regions.area_count()
            );
        }

        info!(
            "Merging small areas brings us to a final amount of {} areas after {passes} passes",
            regions.area_count()
        );
        Ok(FilterOutcome { regions, passes })
    }

    fn has_small_region(&self, regions: &RegionLabeler) -> bool {
        regions.area_count() > 1
            && regions
                .region_sizes()
                .iter()
                .any(|&members| members < self.area_size_threshold)
    }
}
