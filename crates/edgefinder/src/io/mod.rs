pub mod svg;
pub mod geojson;
pub mod debug;

pub use svg::SvgBuilder;
pub use debug::{region_colours, render_classification, render_regions};
