//! Diagnostic rasters of the intermediate classification and labeling.

use image::{Rgb, RgbImage};

use crate::{regions::RegionLabeler, error::Result, types::Grid};

/// Render the bitonal grid, `true` as white.
pub fn render_classification(grid: &Grid) -> RgbImage {
    RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        if grid.get(x as usize, y as usize) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// One colour per region, raising red, green and blue in turn.
pub fn region_colours(region_count: usize) -> Vec<Rgb<u8>> {
    let step = ((252.0 / (region_count as f64 / 3.0).ceil().max(1.0)) as u32).max(1);
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    let mut colours = Vec::with_capacity(region_count);
    for i in 0..region_count {
        colours.push(Rgb([r.min(255) as u8, g.min(255) as u8, b.min(255) as u8]));
        match i % 3 {
            0 => r += step,
            1 => g += step,
            _ => b += step,
        }
    }
    colours
}

/// Render every pixel in the colour of its region.
pub fn render_regions(regions: &RegionLabeler) -> Result<RgbImage> {
    let colours = region_colours(regions.area_count());
    let mut image = RgbImage::new(regions.width() as u32, regions.height() as u32);
    for y in 0..regions.height() {
        for x in 0..regions.width() {
            let id = regions.get_area(x, y)?;
            image.put_pixel(x as u32, y as u32, colours[id as usize]);
        }
    }
    Ok(image)
}
