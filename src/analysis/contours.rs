use image::GrayImage;
use imageproc::{
    contours::{BorderType, Contour, find_contours},
    point::Point,
};

use crate::{
    ContourResult,
    analysis::ensure_finite,
    error::Result,
    image_utils::validate_dimensions,
    thresholds::Thresholds,
};

pub struct ContourAnalyzer {
    thresholds: Thresholds,
}

impl ContourAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn analyze(&self, edge_mask: &GrayImage) -> Result<ContourResult> {
        let (width, height) = edge_mask.dimensions();
        validate_dimensions(width, height)?;

        let external = external_contours(edge_mask);
        let enclosed_area = external
            .iter()
            .fold(0.0, |acc, c| acc + polygon_area(&c.points));
        let area_ratio = ensure_finite(
            "Contour area ratio",
            enclosed_area / (width as f64 * height as f64),
        )?;

        log::debug!(
            "{} external contours enclosing {enclosed_area:.1} px (ratio {area_ratio:.6})",
            external.len()
        );

        Ok(ContourResult {
            contour_count: external.len(),
            area_ratio,
            unnatural: self.thresholds.is_unnatural(area_ratio),
        })
    }
}

impl Default for ContourAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn external_contours(mask: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .collect()
}

pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_signed = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64)
        .sum::<f64>();

    twice_signed.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn outline(size: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let on_rect = x >= x0 && x <= x1 && y >= y0 && y <= y1;
            let border = x == x0 || x == x1 || y == y0 || y == y1;
            if on_rect && border { Luma([255]) } else { Luma([0]) }
        })
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        assert_eq!(polygon_area(&square), 16.0);

        let mut reversed = square.to_vec();
        reversed.reverse();
        assert_eq!(polygon_area(&reversed), 16.0);

        assert_eq!(polygon_area(&square[..2]), 0.0);
    }

    #[test]
    fn test_empty_mask() {
        let mask = GrayImage::new(16, 16);
        let result = ContourAnalyzer::new().analyze(&mask).unwrap();

        assert_eq!(result.contour_count, 0);
        assert_eq!(result.area_ratio, 0.0);
        assert!(result.area_ratio.is_sign_positive());
        assert!(!result.unnatural);
    }

    #[test]
    fn test_rectangle_outline_area() {
        // Pixel-centre polygon from (4,4) to (13,11) encloses 9 * 7 px.
        let mask = outline(20, 4, 4, 13, 11);
        let result = ContourAnalyzer::new().analyze(&mask).unwrap();

        assert_eq!(result.contour_count, 1);
        assert!((result.area_ratio - 63.0 / 400.0).abs() < 1e-9);
        assert!(result.unnatural);
    }

    #[test]
    fn test_nested_outline_is_ignored() {
        let outer = outline(30, 2, 2, 27, 27);
        let inner = outline(30, 10, 10, 19, 19);
        let mask = GrayImage::from_fn(30, 30, |x, y| {
            Luma([outer.get_pixel(x, y)[0].max(inner.get_pixel(x, y)[0])])
        });

        let result = ContourAnalyzer::new().analyze(&mask).unwrap();

        assert_eq!(result.contour_count, 1);
        assert!((result.area_ratio - 625.0 / 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_pixels_enclose_nothing() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(2, 2, Luma([255]));
        mask.put_pixel(7, 5, Luma([255]));

        let result = ContourAnalyzer::new().analyze(&mask).unwrap();

        assert_eq!(result.area_ratio, 0.0);
        assert!(!result.unnatural);
    }
}
