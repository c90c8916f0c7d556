// SPDX-License-Identifier: MPL-2.0

//! Centered 2D discrete Fourier transform of grayscale images.

use image::GrayImage;
use rustfft::num_complex::Complex;

use crate::error::FilterError;
use crate::mask::FilterMask;
use crate::raster;
use crate::slice::{fft_2d, fftshift, ifft_2d, ifftshift, transpose};

/// Fourier coefficients of an image, shifted so that the zero frequency
/// sits at `(rows / 2, cols / 2)`.
///
/// Coefficients are stored in row major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    rows: usize,
    cols: usize,
    data: Vec<Complex<f64>>,
}

impl Spectrum {
    /// Centered transform of a row-major real buffer of `rows * cols` samples.
    ///
    /// # Panics
    /// If `samples.len() != rows * cols`.
    pub fn forward(rows: usize, cols: usize, samples: &[f64]) -> Self {
        assert_eq!(samples.len(), rows * cols, "sample buffer size mismatch");
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft_2d(cols, rows, &mut buffer);
        // fft_2d leaves `cols` rows of `rows` coefficients.
        let buffer = transpose(rows, cols, &buffer);
        Self {
            rows,
            cols,
            data: fftshift(cols, rows, &buffer),
        }
    }

    /// Real part of the inverse transform, scaled back to the input range.
    pub fn inverse(&self) -> Vec<f64> {
        let mut buffer = ifftshift(self.cols, self.rows, &self.data);
        ifft_2d(self.cols, self.rows, &mut buffer);
        let buffer = transpose(self.rows, self.cols, &buffer);
        let fft_coef = 1.0 / (self.rows * self.cols) as f64;
        buffer.iter().map(|c| c.re * fft_coef).collect()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Position of the zero frequency coefficient as `(row, col)`.
    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// Coefficient at `(row, col)` of the centered grid.
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.data[row * self.cols + col]
    }

    /// Centered coefficients in row major order.
    pub fn as_slice(&self) -> &[Complex<f64>] {
        &self.data
    }

    /// Multiply every coefficient by the mask value at the same position.
    ///
    /// # Panics
    /// If the mask does not have the shape of the spectrum.
    pub fn apply_mask(&mut self, mask: &FilterMask) {
        assert_eq!(
            (mask.rows(), mask.cols()),
            (self.rows, self.cols),
            "mask shape does not match spectrum shape"
        );
        for (coef, &gain) in self.data.iter_mut().zip(mask.as_slice()) {
            *coef *= gain;
        }
    }

    /// `20 * ln(|F| + 1)` for every coefficient.
    pub fn log_magnitude(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|c| 20.0 * (c.norm() + 1.0).ln())
            .collect()
    }

    /// Log magnitude stretched to `[0, 255]`, for display.
    pub fn magnitude_image(&self) -> GrayImage {
        raster::normalize_to_gray(self.cols as u32, self.rows as u32, &self.log_magnitude())
    }
}

/// Centered spectrum of a grayscale image.
pub fn forward_transform(img: &GrayImage) -> Result<Spectrum, FilterError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage);
    }
    Ok(Spectrum::forward(
        height as usize,
        width as usize,
        &raster::gray_to_f64(img),
    ))
}

/// Real image reconstructed from a centered spectrum.
pub fn inverse_transform(spectrum: &Spectrum) -> Vec<f64> {
    spectrum.inverse()
}
