//! Fixed decision thresholds.
//!
//! These are hand-tuned constants, not values derived from data. Changing any
//! of them changes the verdict for borderline images.

/// Laplacian variance strictly below this marks the texture as smooth.
pub const SMOOTH_VARIANCE_THRESHOLD: f64 = 50.0;

/// Mean squared left/right difference strictly above this marks asymmetry.
pub const ASYMMETRY_THRESHOLD: f64 = 1000.0;

pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Intensity written into the edge mask for edge pixels. Edge density sums
/// raw mask intensities, so the density bounds below are on this scale.
pub const EDGE_ON_VALUE: u8 = 255;

pub const EDGE_DENSITY_MIN: f64 = 0.015;
pub const EDGE_DENSITY_MAX: f64 = 0.08;

/// Contour area ratio strictly above this marks unnatural features.
pub const CONTOUR_AREA_RATIO_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub smooth_variance: f64,
    pub asymmetry: f64,
    pub canny_low: f32,
    pub canny_high: f32,
    pub edge_density_min: f64,
    pub edge_density_max: f64,
    pub contour_area_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            smooth_variance: SMOOTH_VARIANCE_THRESHOLD,
            asymmetry: ASYMMETRY_THRESHOLD,
            canny_low: CANNY_LOW_THRESHOLD,
            canny_high: CANNY_HIGH_THRESHOLD,
            edge_density_min: EDGE_DENSITY_MIN,
            edge_density_max: EDGE_DENSITY_MAX,
            contour_area_ratio: CONTOUR_AREA_RATIO_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn is_smooth(&self, laplacian_variance: f64) -> bool {
        laplacian_variance < self.smooth_variance
    }

    pub fn is_asymmetric(&self, asymmetry_score: f64) -> bool {
        asymmetry_score > self.asymmetry
    }

    /// Densities on either bound count as consistent.
    pub fn has_consistent_edges(&self, edge_density: f64) -> bool {
        !(edge_density < self.edge_density_min || edge_density > self.edge_density_max)
    }

    pub fn is_unnatural(&self, contour_area_ratio: f64) -> bool {
        contour_area_ratio > self.contour_area_ratio
    }
}
