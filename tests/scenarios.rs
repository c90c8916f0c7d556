// SPDX-License-Identifier: MPL-2.0

//! End-to-end behavior of the filters on synthetic images.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use freqfilter::raster::gray_to_f64;
use freqfilter::{
    apply_frequency_filter, filter_gray, filter_real, forward_transform, homomorphic_filter,
    Filter, FilterKind,
};
use image::{DynamicImage, GrayImage, Luma};

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Pixel values of the rectangle `[x0, x1) x [y0, y1)`.
fn patch(img: &GrayImage, x0: u32, x1: u32, y0: u32, y1: u32) -> Vec<f64> {
    let mut values = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            values.push(img.get_pixel(x, y).0[0] as f64);
        }
    }
    values
}

fn checkerboard(size: u32, cell: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        Luma([if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 }])
    })
}

#[test]
fn ideal_low_pass_blurs_checkerboard() {
    let img = checkerboard(64, 8);
    let input_variance = variance(&gray_to_f64(&img));
    for &cutoff in &[4.0, 8.0] {
        let out = apply_frequency_filter(
            &DynamicImage::ImageLuma8(img.clone()),
            &Filter::IdealLowPass { cutoff },
        )
        .unwrap();
        let output_variance = variance(&gray_to_f64(&out));
        assert!(
            output_variance < input_variance,
            "cutoff {}: {} >= {}",
            cutoff,
            output_variance,
            input_variance
        );
    }
}

#[test]
fn ideal_high_pass_of_uniform_image_is_uniform() {
    let img = GrayImage::from_pixel(32, 32, Luma([173]));
    for &cutoff in &[1.0, 5.0, 20.0] {
        let filter = Filter::IdealHighPass { cutoff };
        let out = filter_gray(&img, &filter).unwrap();
        let first = out.as_raw()[0];
        assert!(out.as_raw().iter().all(|&p| p == first), "cutoff {}", cutoff);

        let raw = filter_real(32, 32, &gray_to_f64(&img), &filter).unwrap();
        for v in raw {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn every_filter_output_is_bounded_and_reaches_255() {
    let img = GrayImage::from_fn(48, 40, |x, y| {
        let v = 128.0 + 60.0 * (x as f64 / 3.0).sin() + 40.0 * (y as f64 / 5.0).cos();
        Luma([v as u8])
    });
    for kind in FilterKind::ALL {
        let filter = Filter::with_defaults(kind);
        let out = filter_gray(&img, &filter).unwrap();
        assert_eq!(out.dimensions(), img.dimensions(), "{}", kind);
        let max = *out.as_raw().iter().max().unwrap();
        assert_eq!(max, 255, "{}", kind);
    }
}

/// Left half: smooth illumination ramp. Right half: fine checker texture.
fn two_region_image() -> GrayImage {
    GrayImage::from_fn(128, 64, |x, y| {
        if x < 64 {
            Luma([(20.0 + 210.0 * x as f64 / 63.0).round() as u8])
        } else if (x + y) % 2 == 0 {
            Luma([100])
        } else {
            Luma([140])
        }
    })
}

/// Spread of the column means across the interior of the ramp.
fn ramp_span(img: &GrayImage) -> f64 {
    let column_means: Vec<f64> = (8..56).map(|x| mean(&patch(img, x, x + 1, 16, 48))).collect();
    let lo = column_means.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = column_means.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    hi - lo
}

fn texture_std(img: &GrayImage) -> f64 {
    variance(&patch(img, 80, 112, 16, 48)).sqrt()
}

#[test]
fn homomorphic_boosts_texture_and_flattens_illumination() {
    let img = two_region_image();
    let out = homomorphic_filter(&DynamicImage::ImageLuma8(img.clone()), 30.0, 0.5, 2.0, 1.0)
        .unwrap();

    let input_texture = texture_std(&img);
    let output_texture = texture_std(&out);
    assert_abs_diff_eq!(input_texture, 20.0, epsilon = 1e-9);
    assert!(
        output_texture > input_texture,
        "texture contrast {} <= {}",
        output_texture,
        input_texture
    );

    // Illumination relative to local detail.
    let input_ratio = ramp_span(&img) / input_texture;
    let output_ratio = ramp_span(&out) / output_texture;
    assert!(
        output_ratio < input_ratio,
        "gradient not flattened: {} >= {}",
        output_ratio,
        input_ratio
    );
}

/// Vertical stripes at frequency radii 10 and 25 of a 64x64 grid.
fn striped_image() -> GrayImage {
    GrayImage::from_fn(64, 64, |x, _| {
        let t = x as f64 / 64.0;
        let v = 128.0 + 50.0 * (2.0 * PI * 10.0 * t).cos() + 50.0 * (2.0 * PI * 25.0 * t).cos();
        Luma([v.round() as u8])
    })
}

/// Magnitude at radius 10 over magnitude at radius 25, on the center row.
fn stripe_ratio(img: &GrayImage) -> f64 {
    let spectrum = forward_transform(img).unwrap();
    let (r, c) = spectrum.center();
    spectrum.get(r, c + 10).norm() / spectrum.get(r, c + 25).norm()
}

#[test]
fn butterworth_band_stop_removes_stripe() {
    let img = striped_image();
    let filter = Filter::ButterworthBandStop {
        inner: 6.0,
        outer: 14.0,
        order: 2,
    };
    let out = filter_gray(&img, &filter).unwrap();

    let before = stripe_ratio(&img);
    let after = stripe_ratio(&out);
    assert!(before > 0.9 && before < 1.1, "input ratio {}", before);
    assert!(after < 0.1 * before, "stripe kept: {} vs {}", after, before);

    // The stripe outside the band survives nearly untouched.
    let raw = filter_real(64, 64, &gray_to_f64(&img), &filter).unwrap();
    let amplitude = |values: &[f64], k: f64| {
        let row = &values[..64];
        let dot: f64 = row
            .iter()
            .enumerate()
            .map(|(x, v)| v * (2.0 * PI * k * x as f64 / 64.0).cos())
            .sum();
        2.0 * dot / 64.0
    };
    assert!(amplitude(&raw, 10.0).abs() < 1.0);
    assert!(amplitude(&raw, 25.0) > 45.0);
}
