// SPDX-License-Identifier: MPL-2.0

//! Transfer function masks over the centered frequency grid.

use log::trace;

use crate::filter::Filter;

/// Real-valued gains, one per coefficient of a centered spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMask {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FilterMask {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Gain at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Gains in row major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Distance of `(row, col)` to the center `(rows / 2, cols / 2)`.
pub fn center_distance(rows: usize, cols: usize, row: usize, col: usize) -> f64 {
    let di = row as f64 - (rows / 2) as f64;
    let dj = col as f64 - (cols / 2) as f64;
    (di * di + dj * dj).sqrt()
}

/// Evaluate the transfer function of `filter` on a `rows x cols` grid.
pub fn build_mask(rows: usize, cols: usize, filter: &Filter) -> FilterMask {
    let mut data = vec![0.0; rows * cols];
    if cols > 0 {
        for (i, row) in data.chunks_exact_mut(cols).enumerate() {
            for (j, gain) in row.iter_mut().enumerate() {
                *gain = filter.transfer(center_distance(rows, cols, i, j));
            }
        }
    }
    if log::log_enabled!(log::Level::Trace) {
        let (lo, hi) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &g| {
                (lo.min(g), hi.max(g))
            });
        trace!("{} mask {}x{}: gains in [{}, {}]", filter.kind(), rows, cols, lo, hi);
    }
    FilterMask { rows, cols, data }
}
