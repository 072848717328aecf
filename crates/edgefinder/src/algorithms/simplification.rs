use geo_types::{Coord, LineString};
use crate::{traits::LineSimplifier, types::Polyline};

fn to_linestring(line: &[[f64; 2]]) -> LineString<f64> {
    LineString::new(line.iter().map(|&[x, y]| Coord { x, y }).collect())
}

fn from_linestring(linestring: &LineString<f64>) -> Polyline {
    linestring.coords().map(|coord| [coord.x, coord.y]).collect()
}

/// Ramer-Douglas-Peucker simplifier using geo crate's implementation
#[derive(Debug, Clone, Default)]
pub struct DouglasPeuckerSimplifier;

impl LineSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, line: &[[f64; 2]], tolerance: f64) -> Polyline {
        use geo::Simplify;

        if line.len() <= 2 {
            return line.to_vec();
        }
        from_linestring(&to_linestring(line).simplify(&tolerance))
    }
}

/// Visvalingam-Whyatt simplifier using geo crate's implementation
#[derive(Debug, Clone, Default)]
pub struct VisvalingamWhyattSimplifier;

impl LineSimplifier for VisvalingamWhyattSimplifier {
    fn simplify(&self, line: &[[f64; 2]], tolerance: f64) -> Polyline {
        use geo::SimplifyVw;

        if line.len() <= 2 {
            return line.to_vec();
        }
        from_linestring(&to_linestring(line).simplify_vw(&tolerance))
    }
}
