use serde::{Deserialize, Serialize};
use geo_types::{Coord, LineString};

use crate::error::{EdgeError, Result};

/// An ordered, open sequence of pixel-space coordinates.
pub type Polyline = Vec<[f64; 2]>;

/// Bitonal classification of an image, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Wrap a row-major cell buffer of `width * height` entries.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EdgeError::InvalidGrid(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if cells.len() != width * height {
            return Err(EdgeError::InvalidGrid(format!(
                "expected {} cells for {width}x{height}, got {}",
                width * height,
                cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self::new(width, height, cells)
    }

    /// Parse rows of text where `#` marks a `true` cell.
    ///
    /// ```
    /// use edgefinder::Grid;
    ///
    /// let grid = Grid::from_rows(&["...", ".#.", "..."]).unwrap();
    /// assert!(grid.get(1, 1));
    /// assert_eq!(grid.pixel_count(), 9);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(EdgeError::InvalidGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            cells.extend(row.chars().map(|c| c == '#'));
        }
        Self::new(width, rows.len(), cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.cells.len()
    }

    /// Classification at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        self.cells[y * self.width + x]
    }
}

/// Integer pixel coordinate, ordered by `x` and then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two pixel coordinates.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_array(self) -> [f64; 2] {
        [f64::from(self.x), f64::from(self.y)]
    }
}

/// Euclidean distance between two floating-point coordinates.
pub fn coord_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Counters collected while a grid runs through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Regions allocated by the labeling scan, merged ones included
    pub labeled_regions: usize,
    /// Distinct regions after the first repack
    pub packed_regions: usize,
    /// Regions left once small ones were merged away
    pub surviving_regions: usize,
    pub filter_passes: usize,
    pub boundary_points: usize,
    pub max_stack_depth: usize,
    pub lines_traced: usize,
    pub lines_deduplicated: usize,
    pub points_before_simplification: usize,
    pub points_after_simplification: usize,
    pub longest_line_before: usize,
    pub longest_line_after: usize,
}

/// The polylines traced from one grid, ready for a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedLines {
    /// Unordered set of open polylines in pixel space
    pub lines: Vec<Polyline>,
    /// Original image dimensions
    pub image_width: usize,
    pub image_height: usize,
    pub stats: TraceStats,
}

impl TracedLines {
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Convert one line to a geo-types LineString
    pub fn to_geo_linestring(line: &[[f64; 2]]) -> LineString<f64> {
        LineString::new(line.iter().map(|&[x, y]| Coord { x, y }).collect())
    }

    /// Length of a polyline in pixels
    pub fn line_length(line: &[[f64; 2]]) -> f64 {
        line.windows(2).map(|w| coord_distance(&w[0], &w[1])).sum()
    }

    /// Get the bounding box over all lines, `None` when there are no points
    pub fn bounding_box(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self.lines.iter().flatten();
        let first = *points.next()?;
        let (mut min, mut max) = (first, first);
        for &[x, y] in points {
            min[0] = min[0].min(x);
            min[1] = min[1].min(y);
            max[0] = max[0].max(x);
            max[1] = max[1].max(y);
        }
        Some((min, max))
    }
}
