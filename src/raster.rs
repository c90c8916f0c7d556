// SPDX-License-Identifier: MPL-2.0

//! Conversions between raster images and floating point buffers.

use image::{DynamicImage, GrayImage, Luma};

/// ITU-R BT.601 luma coefficients, as used by common BGR/RGB to gray conversions.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Tolerance below which a signal is considered constant when normalizing.
///
/// It is relative: the min/max range is compared with this value times
/// `max(1, |min|, |max|)`, so small absolute ranges on large signals count
/// as constant too.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Reduce an image to a single 8-bit channel.
///
/// Grayscale images are returned unchanged, other layouts are converted
/// to RGB first and combined with BT.601 weights. Alpha is ignored.
pub fn to_gray(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Row-major `f64` copy of the pixel values, in `[0, 255]`.
pub fn gray_to_f64(img: &GrayImage) -> Vec<f64> {
    img.as_raw().iter().map(|&pix| pix as f64).collect()
}

/// Linearly map `values` onto `[0, 255]` (min to 0, max to 255)
/// and quantize by truncation.
///
/// A constant signal maps to an all-black image.
pub fn normalize_to_gray(width: u32, height: u32, values: &[f64]) -> GrayImage {
    assert_eq!(
        values.len(),
        width as usize * height as usize,
        "buffer does not match image dimensions"
    );
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let scale = NORMALIZE_EPSILON * 1f64.max(min.abs()).max(max.abs());
    let constant = range.is_nan() || range <= scale;
    GrayImage::from_fn(width, height, |x, y| {
        if constant {
            return Luma([0]);
        }
        let v = values[y as usize * width as usize + x as usize];
        Luma([((v - min) / range * 255.0) as u8])
    })
}
