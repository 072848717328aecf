use image::{DynamicImage, GenericImageView};
use crate::{error::Result, traits::GridClassifier, types::Grid};

/// Marks a pixel when every RGB component is above the threshold
#[derive(Debug, Clone)]
pub struct RgbThresholdClassifier {
    pub threshold: u8,
}

impl Default for RgbThresholdClassifier {
    fn default() -> Self {
        Self { threshold: 64 }
    }
}

impl GridClassifier for RgbThresholdClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Grid> {
        let rgb = image.to_rgb8();
        let (width, height) = image.dimensions();
        Grid::from_fn(width as usize, height as usize, |x, y| {
            let [r, g, b] = rgb.get_pixel(x as u32, y as u32).0;
            r > self.threshold && g > self.threshold && b > self.threshold
        })
    }
}

/// Marks a pixel when its luma is above the threshold
#[derive(Debug, Clone)]
pub struct LumaThresholdClassifier {
    pub threshold: u8,
}

impl Default for LumaThresholdClassifier {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl GridClassifier for LumaThresholdClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Grid> {
        let binary = imageproc::contrast::threshold(&image.to_luma8(), self.threshold);
        Grid::from_fn(binary.width() as usize, binary.height() as usize, |x, y| {
            binary.get_pixel(x as u32, y as u32).0[0] > 0
        })
    }
}
