use image::{DynamicImage, GrayImage, Luma, RgbImage};
use ndarray::Array2;

use crate::error::{AnalysisError, Result};

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let weighted = LUMA_R * pixel[0] as u32 + LUMA_G * pixel[1] as u32 + LUMA_B * pixel[2] as u32;
        let lum = (weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT;
        gray.put_pixel(x, y, Luma([lum.min(255) as u8]));
    }

    gray
}

pub fn to_gray(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => rgb_to_gray(&other.to_rgb8()),
    }
}

pub fn gray_to_array(image: &GrayImage) -> Array2<f64> {
    let (width, height) = image.dimensions();
    let mut arr = Array2::zeros((height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        arr[[y as usize, x as usize]] = pixel[0] as f64;
    }

    arr
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width < 2 || height == 0 {
        return Err(AnalysisError::InvalidDimensions { width, height });
    }
    Ok(())
}

pub fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }

    let len = len as isize;
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}

pub fn mask_sum(mask: &GrayImage) -> u64 {
    mask.pixels().map(|p| p[0] as u64).sum()
}
