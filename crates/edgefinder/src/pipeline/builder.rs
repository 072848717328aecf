use crate::{
    algorithms::RgbThresholdClassifier,
    config::{SimplificationMethod, TraceConfig},
    error::Result,
    pipeline::Pipeline,
    traits::{GridClassifier, LineSimplifier},
};

/// Builder for creating tracing pipelines with a fluent API
pub struct PipelineBuilder {
    config: TraceConfig,
    classifier: Option<Box<dyn GridClassifier>>,
    simplifier: Option<Box<dyn LineSimplifier>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: TraceConfig::default(),
            classifier: None,
            simplifier: None,
        }
    }

    /// Replace every tuning value at once
    pub fn with_config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn area_size_threshold(mut self, threshold: usize) -> Self {
        self.config.area_size_threshold = threshold;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    pub fn deduplication_epsilon(mut self, epsilon: f64) -> Self {
        self.config.deduplication_epsilon = epsilon;
        self
    }

    /// Pick one of the built-in simplifiers (ignored if `set_simplifier` is used)
    pub fn simplification(mut self, method: SimplificationMethod) -> Self {
        self.config.simplification = method;
        self
    }

    /// Set the classifier (replaces any existing one)
    pub fn set_classifier<C>(mut self, classifier: C) -> Self
    where
        C: GridClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Set the simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: LineSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Validate the configuration and build the pipeline with default components if not specified
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;

        let classifier = self.classifier
            .unwrap_or_else(|| Box::new(RgbThresholdClassifier::default()));

        let simplifier = self.simplifier
            .unwrap_or_else(|| self.config.simplification.simplifier());

        Ok(Pipeline::new(self.config, classifier, simplifier))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grid, Polyline};
    use image::{DynamicImage, GrayImage, Luma};

    struct EndpointsOnly;

    impl LineSimplifier for EndpointsOnly {
        fn simplify(&self, line: &[[f64; 2]], _tolerance: f64) -> Polyline {
            match (line.first(), line.last()) {
                (Some(first), Some(last)) if line.len() > 1 => vec![*first, *last],
                _ => line.to_vec(),
            }
        }
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        assert!(Pipeline::builder().epsilon(0.0).build().is_err());
        assert!(Pipeline::builder().area_size_threshold(0).build().is_err());
    }

    #[test]
    fn test_custom_simplifier_is_used() {
        let grid = Grid::from_fn(20, 20, |x, y| x < 5 || y < 5).expect("Should build grid");
        let pipeline = Pipeline::builder()
            .area_size_threshold(10)
            .set_simplifier(EndpointsOnly)
            .build()
            .expect("Should build pipeline");

        let result = pipeline.process(&grid).expect("Should process");
        assert!(!result.lines.is_empty());
        assert!(result.lines.iter().all(|line| line.len() <= 2));
    }

    #[test]
    fn test_process_image_uses_classifier() {
        let mut img = GrayImage::new(16, 16);
        for y in 4..12 {
            for x in 4..12 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        let pipeline = Pipeline::builder()
            .area_size_threshold(10)
            .build()
            .expect("Should build pipeline");

        let result = pipeline
            .process_image(&DynamicImage::ImageLuma8(img))
            .expect("Should process");
        assert_eq!(result.image_width, 16);
        assert_eq!(result.stats.surviving_regions, 2);
        assert!(!result.lines.is_empty());
    }

    #[test]
    fn test_info_mentions_method() {
        let pipeline = Pipeline::builder()
            .simplification(SimplificationMethod::VisvalingamWhyatt)
            .build()
            .expect("Should build pipeline");
        assert!(pipeline.info().contains("visvalingam_whyatt"));
    }
}
