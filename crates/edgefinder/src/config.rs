use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    algorithms::{DouglasPeuckerSimplifier, VisvalingamWhyattSimplifier},
    error::{EdgeError, Result},
    traits::LineSimplifier,
};

/// Point-reduction algorithm applied to traced lines
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SimplificationMethod {
    /// Ramer-Douglas-Peucker, tolerance is a perpendicular distance
    #[default]
    DouglasPeucker,
    /// Visvalingam-Whyatt, tolerance is a triangle area
    VisvalingamWhyatt,
}

impl SimplificationMethod {
    pub fn simplifier(self) -> Box<dyn LineSimplifier> {
        match self {
            Self::DouglasPeucker => Box::new(DouglasPeuckerSimplifier),
            Self::VisvalingamWhyatt => Box::new(VisvalingamWhyattSimplifier),
        }
    }
}

/// Tuning values consumed by the tracing core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TraceConfig {
    /// Regions with fewer pixels than this are merged into a neighbour
    #[schemars(range(min = 1))]
    pub area_size_threshold: usize,
    /// Simplification tolerance in pixels
    pub epsilon: f64,
    /// Lines passing closer than this to a kept line's first point are dropped
    pub deduplication_epsilon: f64,
    pub simplification: SimplificationMethod,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            area_size_threshold: 500,
            epsilon: 0.01,
            deduplication_epsilon: 2.0,
            simplification: SimplificationMethod::default(),
        }
    }
}

impl TraceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.area_size_threshold < 1 {
            return Err(EdgeError::InvalidConfig(
                "area_size_threshold must be at least 1".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(EdgeError::InvalidConfig(format!(
                "epsilon must be a positive number, got {}",
                self.epsilon
            )));
        }
        if !self.deduplication_epsilon.is_finite() || self.deduplication_epsilon < 0.0 {
            return Err(EdgeError::InvalidConfig(format!(
                "deduplication_epsilon must be a non-negative number, got {}",
                self.deduplication_epsilon
            )));
        }
        Ok(())
    }

    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(TraceConfig)
    }
}
