// SPDX-License-Identifier: MPL-2.0

//! Homomorphic filtering.
//!
//! An image is modeled as the product of a slowly varying illumination
//! and a detailed reflectance. Taking `log1p` of the pixels turns this
//! product into a sum, which the homomorphic mask then reshapes:
//! low frequencies are scaled by `low_gain`, high frequencies by `high_gain`.
//! `expm1` brings the result back before normalization.
//!
//! With `low_gain < 1 < high_gain`, illumination gradients are flattened
//! while local contrast is amplified.

use image::{DynamicImage, GrayImage};
use log::debug;

use crate::error::FilterError;
use crate::filter::{Filter, HomomorphicParams};
use crate::pipeline::filter_real;
use crate::raster;

/// Homomorphic filter of an image of any channel layout.
pub fn homomorphic_filter(
    img: &DynamicImage,
    d0: f64,
    h_low: f64,
    h_high: f64,
    c: f64,
) -> Result<GrayImage, FilterError> {
    let params = HomomorphicParams {
        cutoff: d0,
        low_gain: h_low,
        high_gain: h_high,
        sharpness: c,
    };
    homomorphic_filter_gray(&raster::to_gray(img), &params)
}

/// Homomorphic filter of a grayscale image.
pub fn homomorphic_filter_gray(
    img: &GrayImage,
    params: &HomomorphicParams,
) -> Result<GrayImage, FilterError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage);
    }
    debug!(
        "homomorphic filter d0={} gains=[{}, {}] c={}",
        params.cutoff, params.low_gain, params.high_gain, params.sharpness
    );
    let log_image: Vec<f64> = img.as_raw().iter().map(|&p| (p as f64).ln_1p()).collect();
    let filtered = filter_real(
        height as usize,
        width as usize,
        &log_image,
        &Filter::Homomorphic(*params),
    )?;
    let restored: Vec<f64> = filtered.into_iter().map(f64::exp_m1).collect();
    Ok(raster::normalize_to_gray(width, height, &restored))
}
