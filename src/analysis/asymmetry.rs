use image::GrayImage;

use crate::{
    AsymmetryResult,
    analysis::ensure_finite,
    error::Result,
    image_utils::validate_dimensions,
    thresholds::Thresholds,
};

// Column x is paired with W - 1 - x; for odd widths the centre column is unused.
pub struct AsymmetryAnalyzer {
    thresholds: Thresholds,
}

impl AsymmetryAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn analyze(&self, gray: &GrayImage) -> Result<AsymmetryResult> {
        let (width, height) = gray.dimensions();
        validate_dimensions(width, height)?;

        let half = width / 2;
        let mut sum_sq = 0.0;

        for y in 0..height {
            for x in 0..half {
                let left = gray.get_pixel(x, y)[0] as f64;
                let mirrored = gray.get_pixel(width - 1 - x, y)[0] as f64;
                let diff = left - mirrored;
                sum_sq += diff * diff;
            }
        }

        let score = ensure_finite("Asymmetry score", sum_sq / (height as f64 * half as f64))?;

        log::debug!("Asymmetry score {score:.4} over {half} mirrored columns");

        Ok(AsymmetryResult {
            score,
            asymmetric: self.thresholds.is_asymmetric(score),
        })
    }
}

impl Default for AsymmetryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use image::Luma;

    #[test]
    fn test_mirror_symmetric_image_scores_zero() {
        let gray = GrayImage::from_fn(10, 6, |x, y| {
            let d = x.min(9 - x);
            Luma([(d * 20 + y * 3) as u8])
        });
        let result = AsymmetryAnalyzer::new().analyze(&gray).unwrap();

        assert_eq!(result.score, 0.0);
        assert!(!result.asymmetric);
    }

    #[test]
    fn test_black_white_halves() {
        let gray = GrayImage::from_fn(4, 2, |x, _| if x < 2 { Luma([0]) } else { Luma([255]) });
        let result = AsymmetryAnalyzer::new().analyze(&gray).unwrap();

        assert_eq!(result.score, 65025.0);
        assert!(result.asymmetric);
    }

    #[test]
    fn test_odd_width_skips_centre_column() {
        let gray = GrayImage::from_fn(5, 3, |x, _| if x == 2 { Luma([255]) } else { Luma([10]) });
        let result = AsymmetryAnalyzer::new().analyze(&gray).unwrap();

        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_mean_over_half_width() {
        // Only one of the two mirrored pairs differs, by 40.
        let gray = GrayImage::from_fn(4, 1, |x, _| if x == 0 { Luma([40]) } else { Luma([0]) });
        let result = AsymmetryAnalyzer::new().analyze(&gray).unwrap();

        assert_eq!(result.score, 800.0);
        assert!(!result.asymmetric);
    }

    #[test]
    fn test_single_column_is_rejected() {
        let gray = GrayImage::new(1, 8);
        let err = AsymmetryAnalyzer::new().analyze(&gray).unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidDimensions { width: 1, height: 8 }));
    }
}
