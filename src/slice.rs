// SPDX-License-Identifier: MPL-2.0

//! Fourier transform primitives on row-major slices.
//!
//! These are the building blocks of [`Spectrum`](crate::Spectrum).
//! They work directly on flat buffers so that no image type is required.

use rustfft::FftDirection;
use rustfft::{num_complex::Complex, FftPlanner};

/// Compute the 2D Fourier transform of an image buffer.
///
/// The buffer is considered to be stored in row major order,
/// with `height` rows of `width` elements.
/// After the 2D FFT has been applied, the buffer contains the transposed
/// of the Fourier transform since one transposition is needed to process
/// the columns of the image buffer.
///
/// The transformation is not normalized.
/// If the transformed buffer is intended to be processed
/// and then converted back with [`ifft_2d`],
/// multiply once at the end by 1 / (width * height).
pub fn fft_2d(width: usize, height: usize, img_buffer: &mut [Complex<f64>]) {
    fft_2d_with_direction(width, height, img_buffer, FftDirection::Forward)
}

/// Compute the inverse 2D Fourier transform to get back an image buffer.
///
/// Like [`fft_2d`], the result is transposed and not normalized.
pub fn ifft_2d(width: usize, height: usize, img_buffer: &mut [Complex<f64>]) {
    fft_2d_with_direction(width, height, img_buffer, FftDirection::Inverse)
}

fn fft_2d_with_direction(
    width: usize,
    height: usize,
    img_buffer: &mut [Complex<f64>],
    direction: FftDirection,
) {
    debug_assert_eq!(img_buffer.len(), width * height);
    if width == 0 || height == 0 {
        return;
    }

    // Rows first.
    let mut planner = FftPlanner::new();
    let fft_width = planner.plan_fft(width, direction);
    let mut scratch = vec![Complex::default(); fft_width.get_inplace_scratch_len()];
    for row_buffer in img_buffer.chunks_exact_mut(width) {
        fft_width.process_with_scratch(row_buffer, &mut scratch);
    }

    // Columns are contiguous once transposed.
    let mut transposed = transpose(width, height, img_buffer);
    let fft_height = planner.plan_fft(height, direction);
    scratch.resize(fft_height.get_outofplace_scratch_len(), Complex::default());
    for (tr_buf, col_buf) in transposed
        .chunks_exact_mut(height)
        .zip(img_buffer.chunks_exact_mut(height))
    {
        fft_height.process_outofplace_with_scratch(tr_buf, col_buf, &mut scratch);
    }
}

/// Transpose a row-major matrix of `height` rows and `width` columns.
///
/// The result has `width` rows of `height` elements.
pub fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut ind = 0;
    let mut ind_tr;
    let mut transposed = vec![T::default(); matrix.len()];
    for row in 0..height {
        ind_tr = row;
        for _ in 0..width {
            transposed[ind_tr] = matrix[ind];
            ind += 1;
            ind_tr += height;
        }
    }
    transposed
}

/// Shift the 4 quadrants of a Fourier transform to have all the low frequencies
/// at the center of the image.
///
/// The zero frequency ends up at row `height / 2`, column `width / 2`.
pub fn fftshift<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    roll(width, height, matrix, width / 2, height / 2)
}

/// Inverse operation of the quadrants shift performed by [`fftshift`].
///
/// It differs from [`fftshift`] when one dimension has an odd length.
pub fn ifftshift<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    roll(width, height, matrix, width - width / 2, height - height / 2)
}

/// Cyclic shift such that element `(row, col)` moves to
/// `((row + shift_y) % height, (col + shift_x) % width)`.
fn roll<T: Copy + Default>(
    width: usize,
    height: usize,
    matrix: &[T],
    shift_x: usize,
    shift_y: usize,
) -> Vec<T> {
    assert_eq!(matrix.len(), width * height, "matrix size mismatch");
    let mut shifted = vec![T::default(); matrix.len()];
    if width == 0 || height == 0 {
        return shifted;
    }
    let shift_x = shift_x % width;
    for (row, m_row) in matrix.chunks_exact(width).enumerate() {
        let srow_start = ((row + shift_y) % height) * width;
        let s_row = &mut shifted[srow_start..srow_start + width];
        // swap left and right
        s_row[shift_x..width].copy_from_slice(&m_row[0..width - shift_x]);
        s_row[0..shift_x].copy_from_slice(&m_row[width - shift_x..width]);
    }
    shifted
}
