// SPDX-License-Identifier: MPL-2.0

//! Frequency filtering of raster images.
//!
//! Every filter runs the same fixed sequence of steps:
//! grayscale conversion, centered forward transform, mask multiplication,
//! inverse transform and min/max normalization to 8 bits.
//! Because of the final normalization, only the relative structure of
//! the result is meaningful, not its absolute brightness.

use std::time::Instant;

use image::{DynamicImage, GrayImage};
use log::debug;

use crate::error::FilterError;
use crate::filter::Filter;
use crate::homomorphic;
use crate::mask::build_mask;
use crate::raster;
use crate::spectrum::Spectrum;

/// Filter an image of any channel layout.
///
/// The result is a grayscale image of the same width and height.
/// [`Filter::Homomorphic`] goes through the log/exp adapter of
/// [`crate::homomorphic`].
pub fn apply_frequency_filter(
    img: &DynamicImage,
    filter: &Filter,
) -> Result<GrayImage, FilterError> {
    filter_gray(&raster::to_gray(img), filter)
}

/// Filter a grayscale image.
pub fn filter_gray(img: &GrayImage, filter: &Filter) -> Result<GrayImage, FilterError> {
    if let Filter::Homomorphic(params) = filter {
        return homomorphic::homomorphic_filter_gray(img, params);
    }
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage);
    }
    let filtered = filter_real(
        height as usize,
        width as usize,
        &raster::gray_to_f64(img),
        filter,
    )?;
    Ok(raster::normalize_to_gray(width, height, &filtered))
}

/// Apply the mask of `filter` to a row-major real signal and return the
/// real part of the result, before any normalization.
///
/// The transfer function is applied linearly for every family,
/// including [`Filter::Homomorphic`].
/// `samples` must hold exactly `rows * cols` values.
pub fn filter_real(
    rows: usize,
    cols: usize,
    samples: &[f64],
    filter: &Filter,
) -> Result<Vec<f64>, FilterError> {
    if rows == 0 || cols == 0 || samples.is_empty() {
        return Err(FilterError::EmptyImage);
    }
    if rows.checked_mul(cols) != Some(samples.len()) {
        return Err(FilterError::SizeMismatch {
            expected: rows.saturating_mul(cols),
            actual: samples.len(),
        });
    }
    filter.check_degenerate()?;

    let now = Instant::now();
    let mut spectrum = Spectrum::forward(rows, cols, samples);
    debug!("forward transform {}x{}: {}ms", rows, cols, now.elapsed().as_millis());

    let now = Instant::now();
    let mask = build_mask(spectrum.rows(), spectrum.cols(), filter);
    spectrum.apply_mask(&mask);
    debug!("{} mask: {}ms", filter.kind(), now.elapsed().as_millis());

    let now = Instant::now();
    let filtered = spectrum.inverse();
    debug!("inverse transform: {}ms", now.elapsed().as_millis());
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterKind, HomomorphicParams};
    use approx::assert_abs_diff_eq;
    use image::{Luma, Rgb, RgbImage};

    fn noise(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((x * 7919 + y * 104_729 + x * y * 31) % 251) as u8])
        })
    }

    fn small_grid_filters() -> Vec<Filter> {
        let (inner, outer, order) = (2.0, 6.0, 2);
        vec![
            Filter::IdealLowPass { cutoff: 3.0 },
            Filter::IdealHighPass { cutoff: 3.0 },
            Filter::IdealBandPass { inner, outer },
            Filter::IdealBandStop { inner, outer },
            Filter::ButterworthLowPass { cutoff: 3.0, order },
            Filter::ButterworthHighPass { cutoff: 3.0, order },
            Filter::ButterworthBandPass { inner, outer, order },
            Filter::ButterworthBandStop { inner, outer, order },
            Filter::GaussianLowPass { cutoff: 3.0 },
            Filter::GaussianHighPass { cutoff: 3.0 },
            Filter::Homomorphic(HomomorphicParams {
                cutoff: 3.0,
                ..HomomorphicParams::default()
            }),
        ]
    }

    #[test]
    fn output_keeps_dimensions_and_spans_full_range() {
        let img = noise(23, 17);
        for filter in small_grid_filters() {
            let out = filter_gray(&img, &filter).unwrap();
            let kind = filter.kind();
            assert_eq!(out.dimensions(), (23, 17), "{}", kind);
            assert_eq!(*out.as_raw().iter().max().unwrap(), 255, "{}", kind);
            assert_eq!(*out.as_raw().iter().min().unwrap(), 0, "{}", kind);
        }
    }

    #[test]
    fn all_pass_low_pass_preserves_structure() {
        // A cutoff covering the whole grid keeps every coefficient.
        let img = noise(16, 12);
        let all_pass = Filter::IdealLowPass { cutoff: 100.0 };
        let raw = filter_real(12, 16, &raster::gray_to_f64(&img), &all_pass).unwrap();
        for (&a, &b) in raw.iter().zip(img.as_raw()) {
            assert_abs_diff_eq!(a, b as f64, epsilon = 1e-6);
        }
    }

    #[test]
    fn multi_channel_input_is_converted() {
        let rgb = RgbImage::from_fn(10, 8, |x, y| Rgb([(x * 20) as u8, (y * 30) as u8, 7]));
        let out = apply_frequency_filter(
            &DynamicImage::ImageRgb8(rgb),
            &Filter::GaussianLowPass { cutoff: 3.0 },
        )
        .unwrap();
        assert_eq!(out.dimensions(), (10, 8));
    }

    #[test]
    fn empty_input_is_reported() {
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        for kind in FilterKind::ALL {
            assert_eq!(
                apply_frequency_filter(&empty, &Filter::with_defaults(kind)),
                Err(FilterError::EmptyImage),
                "{}",
                kind
            );
        }
    }

    #[test]
    fn degenerate_cutoff_is_reported() {
        let img = noise(8, 8);
        let err = filter_gray(&img, &Filter::GaussianHighPass { cutoff: 0.0 }).unwrap_err();
        assert!(matches!(err, FilterError::DegenerateParameter { name: "cutoff", .. }));
    }

    #[test]
    fn zero_order_is_reported() {
        let img = noise(8, 8);
        let err = filter_gray(
            &img,
            &Filter::ButterworthLowPass {
                cutoff: 5.0,
                order: 0,
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::DegenerateParameter {
                name: "order",
                value: 0.0
            }
        );
    }

    #[test]
    fn sample_count_must_match_dimensions() {
        let err = filter_real(4, 4, &[1.0; 10], &Filter::IdealLowPass { cutoff: 2.0 }).unwrap_err();
        assert_eq!(
            err,
            FilterError::SizeMismatch {
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn constant_odd_sized_image_high_pass_is_black() {
        let img = GrayImage::from_pixel(15, 9, Luma([173]));
        let filter = Filter::ButterworthHighPass {
            cutoff: 2.0,
            order: 2,
        };
        let out = filter_gray(&img, &filter).unwrap();
        assert_eq!(out.dimensions(), (15, 9));
        assert!(out.as_raw().iter().all(|&p| p == 0));
    }
}
