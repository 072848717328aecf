pub mod builder;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::{
    algorithms::{BoundaryExtractor, ContourAssembler, Deduplicator},
    config::TraceConfig,
    error::Result,
    regions::{RegionLabeler, RegionSizeFilter},
    traits::{GridClassifier, LineSimplifier},
    types::{Grid, TraceStats, TracedLines},
};

/// A labeled grid after small regions have been merged away.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Packed labeling with ids `0..k`
    pub regions: RegionLabeler,
    pub stats: TraceStats,
}

/// Grid-to-polyline pipeline: segmentation followed by contour tracing.
pub struct Pipeline {
    config: TraceConfig,
    classifier: Box<dyn GridClassifier>,
    simplifier: Box<dyn LineSimplifier>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        config: TraceConfig,
        classifier: Box<dyn GridClassifier>,
        simplifier: Box<dyn LineSimplifier>,
    ) -> Self {
        Self {
            config,
            classifier,
            simplifier,
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Classify a decoded image and trace it
    pub fn process_image(&self, image: &DynamicImage) -> Result<TracedLines> {
        let grid = self.classifier.classify(image)?;
        self.process(&grid)
    }

    /// Run a grid through the entire pipeline
    pub fn process(&self, grid: &Grid) -> Result<TracedLines> {
        let segmentation = self.segment(grid)?;
        self.trace(&segmentation)
    }

    /// Label the grid, repack it, and merge away regions below the size threshold
    pub fn segment(&self, grid: &Grid) -> Result<Segmentation> {
        let labeler = RegionLabeler::from_grid(grid)?;
        let packed = labeler.pack_areas()?;
        info!(
            "Used {} areas, merged to a final amount of {} areas",
            labeler.area_count(),
            packed.area_count()
        );

        let packed_regions = packed.area_count();
        let outcome = RegionSizeFilter::new(self.config.area_size_threshold).apply(packed)?;
        for (id, members) in outcome.regions.region_sizes().iter().enumerate() {
            debug!("Area {id} has {members} members");
        }

        let stats = TraceStats {
            labeled_regions: labeler.area_count(),
            packed_regions,
            surviving_regions: outcome.regions.area_count(),
            filter_passes: outcome.passes,
            ..TraceStats::default()
        };
        Ok(Segmentation {
            regions: outcome.regions,
            stats,
        })
    }

    /// Trace region boundaries into deduplicated, simplified polylines
    pub fn trace(&self, segmentation: &Segmentation) -> Result<TracedLines> {
        let mut stats = segmentation.stats.clone();

        let boundaries = BoundaryExtractor.extract(&segmentation.regions)?;
        stats.boundary_points = boundaries.iter().map(|set| set.len()).sum();

        let contours = ContourAssembler.assemble(boundaries)?;
        stats.max_stack_depth = contours.max_stack_depth;

        let mut dedup = Deduplicator::new(self.config.deduplication_epsilon);
        let mut lines = Vec::new();
        for line in contours.lines_per_region.into_iter().flatten() {
            stats.lines_traced += 1;
            if !dedup.admit(&line) {
                continue;
            }

            stats.points_before_simplification += line.len();
            stats.longest_line_before = stats.longest_line_before.max(line.len());
            let simplified = self.simplifier.simplify(&line, self.config.epsilon);
            stats.points_after_simplification += simplified.len();
            stats.longest_line_after = stats.longest_line_after.max(simplified.len());
            lines.push(simplified);
        }
        stats.lines_deduplicated = dedup.removed();

        if lines.is_empty() {
            warn!("No boundary lines found, the image holds a single region");
        } else {
            info!(
                "We got {} lines (removed from deduplication: {}) with {} points (longest: {} points, average: {} points)",
                lines.len(),
                stats.lines_deduplicated,
                stats.points_before_simplification,
                stats.longest_line_before,
                stats.points_before_simplification / lines.len()
            );
            info!(
                "After simplification, we have {} lines with {} points (longest: {}, average: {})",
                lines.len(),
                stats.points_after_simplification,
                stats.longest_line_after,
                stats.points_after_simplification / lines.len()
            );
        }

        Ok(TracedLines {
            lines,
            image_width: segmentation.regions.width(),
            image_height: segmentation.regions.height(),
            stats,
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: area size threshold {}, epsilon {} ({}), deduplication epsilon {}",
            self.config.area_size_threshold,
            self.config.epsilon,
            self.config.simplification,
            self.config.deduplication_epsilon
        )
    }
}
