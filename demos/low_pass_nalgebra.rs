// SPDX-License-Identifier: MPL-2.0

//! Gaussian low-pass on an image held in a nalgebra matrix.
//!
//! ```bash
//! cargo run --release --features nalgebra --example low_pass_nalgebra -- input.png
//! ```

use freqfilter::nalgebra::filter_matrix;
use freqfilter::{raster, Filter, Spectrum};
use log::info;
use nalgebra::DMatrix;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.png".to_string());

    let img = raster::to_gray(&image::open(&path)?);
    let (width, height) = img.dimensions();
    let mat = DMatrix::from_row_slice(
        height as usize,
        width as usize,
        &raster::gray_to_f64(&img),
    );

    let spectrum = Spectrum::from_matrix(&mat);
    let coefficients = spectrum.to_matrix();
    let (r, c) = spectrum.center();
    info!("DC coefficient: {}", coefficients[(r, c)]);

    let filtered = filter_matrix(&mat, &Filter::GaussianLowPass { cutoff: 25.0 })?;

    // Back to row-major order for the image buffer.
    let row_major: Vec<f64> = filtered.transpose().iter().copied().collect();
    raster::normalize_to_gray(width, height, &row_major).save("filtered_nalgebra.png")?;
    Ok(())
}
