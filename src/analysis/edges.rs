use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::{
    EdgeResult,
    analysis::ensure_finite,
    error::{AnalysisError, Result},
    image_utils::{mask_sum, validate_dimensions},
    thresholds::{EDGE_ON_VALUE, Thresholds},
};

// tan(22.5deg) in 15-bit fixed point.
const TAN_22_5: i64 = 13573;
const TAN_SHIFT: u32 = 15;

#[derive(Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    Candidate,
    Suppressed,
    Edge,
}

// Density sums raw mask intensities, so a mask where every pixel is an edge
// scores 255, not 1.
pub struct EdgeDensityAnalyzer {
    thresholds: Thresholds,
}

impl EdgeDensityAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn analyze(&self, gray: &GrayImage) -> Result<EdgeResult> {
        let (width, height) = gray.dimensions();
        validate_dimensions(width, height)?;

        let mask = self.edge_mask(gray)?;
        let area = width as f64 * height as f64;
        let density = ensure_finite("Edge density", mask_sum(&mask) as f64 / area)?;

        log::debug!("Edge density {density:.6} over {width}x{height}");

        Ok(EdgeResult {
            density,
            consistent: self.thresholds.has_consistent_edges(density),
            mask,
        })
    }

    pub fn edge_mask(&self, gray: &GrayImage) -> Result<GrayImage> {
        let (width, height) = gray.dimensions();
        let gx = horizontal_sobel(gray);
        let gy = vertical_sobel(gray);

        if gx.dimensions() != gray.dimensions() || gy.dimensions() != gray.dimensions() {
            return Err(AnalysisError::MeasurementFailure(format!(
                "gradient is {:?}, expected {:?}",
                gx.dimensions(),
                gray.dimensions()
            )));
        }

        let (w, h) = (width as usize, height as usize);
        let dx = gx.pixels().map(|p| p[0] as i64).collect::<Vec<_>>();
        let dy = gy.pixels().map(|p| p[0] as i64).collect::<Vec<_>>();
        let magnitude = dx.iter().zip(&dy).map(|(x, y)| x.abs() + y.abs()).collect::<Vec<_>>();

        // Thresholds compare against integer L1 magnitudes.
        let low = self.thresholds.canny_low.floor() as i64;
        let high = self.thresholds.canny_high.floor() as i64;

        let mag = |x: isize, y: isize| -> i64 {
            if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
                0
            } else {
                magnitude[y as usize * w + x as usize]
            }
        };

        let mut states = vec![EdgeState::Suppressed; w * h];
        let mut stack = Vec::new();

        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let m = magnitude[i];
                if m <= low {
                    continue;
                }

                let (xi, yi) = (x as isize, y as isize);
                let ax = dx[i].abs();
                let ay = dy[i].abs() << TAN_SHIFT;
                let tan22 = ax * TAN_22_5;
                let tan67 = tan22 + (ax << (TAN_SHIFT + 1));

                let is_peak = if ay < tan22 {
                    m > mag(xi - 1, yi) && m >= mag(xi + 1, yi)
                } else if ay > tan67 {
                    m > mag(xi, yi - 1) && m >= mag(xi, yi + 1)
                } else {
                    let s = if (dx[i] < 0) != (dy[i] < 0) { -1 } else { 1 };
                    m > mag(xi - s, yi - 1) && m > mag(xi + s, yi + 1)
                };

                if !is_peak {
                    continue;
                }

                if m > high {
                    states[i] = EdgeState::Edge;
                    stack.push((x, y));
                } else {
                    states[i] = EdgeState::Candidate;
                }
            }
        }

        while let Some((x, y)) = stack.pop() {
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let j = ny * w + nx;
                    if states[j] == EdgeState::Candidate {
                        states[j] = EdgeState::Edge;
                        stack.push((nx, ny));
                    }
                }
            }
        }

        let mut mask = GrayImage::new(width, height);
        for (i, state) in states.iter().enumerate() {
            if *state == EdgeState::Edge {
                mask.put_pixel((i % w) as u32, (i / w) as u32, Luma([EDGE_ON_VALUE]));
            }
        }

        Ok(mask)
    }
}

impl Default for EdgeDensityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
