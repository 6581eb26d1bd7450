use image::GrayImage;
use ndarray::Array2;
use statrs::statistics::Statistics;

use crate::{
    TextureResult,
    analysis::ensure_finite,
    error::Result,
    image_utils::{gray_to_array, reflect_101, validate_dimensions},
    thresholds::Thresholds,
};

pub struct TextureAnalyzer {
    thresholds: Thresholds,
}

impl TextureAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn analyze(&self, gray: &GrayImage) -> Result<TextureResult> {
        let (width, height) = gray.dimensions();
        validate_dimensions(width, height)?;

        let response = laplacian(&gray_to_array(gray));
        let variance = ensure_finite(
            "Laplacian variance",
            response.iter().population_variance(),
        )?;

        log::debug!("Laplacian variance {variance:.4} over {width}x{height}");

        Ok(TextureResult {
            variance,
            smooth: self.thresholds.is_smooth(variance),
        })
    }
}

impl Default for TextureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn laplacian(arr: &Array2<f64>) -> Array2<f64> {
    let (height, width) = arr.dim();
    let mut response = Array2::zeros((height, width));

    let at = |y: isize, x: isize| -> f64 {
        arr[[reflect_101(y, height), reflect_101(x, width)]]
    };

    for y in 0..height as isize {
        for x in 0..width as isize {
            response[[y as usize, x as usize]] =
                at(y - 1, x) + at(y + 1, x) + at(y, x - 1) + at(y, x + 1) - 4.0 * at(y, x);
        }
    }

    response
}
