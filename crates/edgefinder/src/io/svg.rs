use std::{fmt::Write as _, path::Path};

use crate::{
    error::Result,
    types::{Polyline, TracedLines},
};

const PATH_STYLE: &str = "fill:none;stroke:#ff0000;stroke-width:0.26458333;stroke-linecap:butt;\
stroke-linejoin:miter;stroke-opacity:1;stroke-dasharray:none;vector-effect:non-scaling-stroke";

/// Writes polylines as open SVG paths on a page measured in millimetres.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    image_width: usize,
    image_height: usize,
    target_width_mm: f64,
    target_height_mm: f64,
}

impl SvgBuilder {
    pub fn new(image_width: usize, image_height: usize, target_width_mm: f64, target_height_mm: f64) -> Self {
        Self {
            image_width,
            image_height,
            target_width_mm,
            target_height_mm,
        }
    }

    /// Map a pixel-space coordinate onto the page.
    pub fn scale_point(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [
            x / self.image_width as f64 * self.target_width_mm,
            y / self.image_height as f64 * self.target_height_mm,
        ]
    }

    pub fn build(&self, lines: &[Polyline]) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        let _ = writeln!(
            out,
            r#"<svg width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}" version="1.1" xmlns="http://www.w3.org/2000/svg">"#,
            w = self.target_width_mm,
            h = self.target_height_mm
        );
        let _ = writeln!(out, r#"  <g id="lines">"#);
        for (id, line) in lines.iter().enumerate() {
            self.append_line(&mut out, id, line);
        }
        let _ = writeln!(out, "  </g>");
        let _ = writeln!(out, "</svg>");
        out
    }

    fn append_line(&self, out: &mut String, id: usize, line: &[[f64; 2]]) {
        if line.is_empty() {
            return;
        }
        let _ = write!(out, r#"    <path style="{PATH_STYLE}" d="M"#);
        for &point in line {
            let [x, y] = self.scale_point(point);
            let _ = write!(out, " {x:.6},{y:.6}");
        }
        let _ = writeln!(out, r#"" id="path{id}" />"#);
    }
}

impl TracedLines {
    /// Render as SVG scaled to the given page size
    pub fn to_svg(&self, target_width_mm: f64, target_height_mm: f64) -> String {
        SvgBuilder::new(self.image_width, self.image_height, target_width_mm, target_height_mm)
            .build(&self.lines)
    }

    /// Save as an SVG file
    pub fn save_svg<P: AsRef<Path>>(&self, path: P, target_width_mm: f64, target_height_mm: f64) -> Result<()> {
        std::fs::write(path, self.to_svg(target_width_mm, target_height_mm))?;
        Ok(())
    }
}
