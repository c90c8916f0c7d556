// SPDX-License-Identifier: MPL-2.0

//! Interoperability with [`nalgebra`] matrices.
//!
//! Row `i`, column `j` of a matrix is pixel `(x = j, y = i)` of the image.
//! nalgebra stores matrices column-major, so every conversion goes
//! through [`DMatrix::from_row_slice`] or a transposition.

use nalgebra::DMatrix;
use rustfft::num_complex::Complex;

use crate::error::FilterError;
use crate::filter::Filter;
use crate::mask::FilterMask;
use crate::pipeline::filter_real;
use crate::spectrum::Spectrum;

impl FilterMask {
    /// Copy of the mask as a `rows x cols` matrix.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.rows(), self.cols(), self.as_slice())
    }
}

impl Spectrum {
    /// Copy of the centered coefficients as a `rows x cols` matrix.
    pub fn to_matrix(&self) -> DMatrix<Complex<f64>> {
        DMatrix::from_row_slice(self.rows(), self.cols(), self.as_slice())
    }

    /// Centered transform of a real matrix.
    pub fn from_matrix(mat: &DMatrix<f64>) -> Self {
        let (rows, cols) = mat.shape();
        Spectrum::forward(rows, cols, mat.transpose().as_slice())
    }
}

/// Filter a real matrix without normalization, see [`filter_real`].
pub fn filter_matrix(mat: &DMatrix<f64>, filter: &Filter) -> Result<DMatrix<f64>, FilterError> {
    let (rows, cols) = mat.shape();
    let filtered = filter_real(rows, cols, mat.transpose().as_slice(), filter)?;
    Ok(DMatrix::from_row_slice(rows, cols, &filtered))
}
