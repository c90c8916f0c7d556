// SPDX-License-Identifier: MPL-2.0

//! Save the magnitude spectrum of an image before and after masking.
//!
//! ```bash
//! cargo run --release --example spectrum_view -- input.png
//! ```

use std::time::Instant;

use freqfilter::{build_mask, forward_transform, raster, Filter};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.png".to_string());

    // Open image from disk.
    let img = raster::to_gray(&image::open(&path)?);
    let (width, height) = img.dimensions();

    let now = Instant::now();
    let mut spectrum = forward_transform(&img)?;
    info!("FFT: {}ms", now.elapsed().as_millis());
    spectrum.magnitude_image().save("spectrum.png")?;

    // Smooth low-pass whose cutoff scales with the image diagonal.
    let diagonal = (width as f64).hypot(height as f64);
    let filter = Filter::ButterworthLowPass {
        cutoff: 0.07 * diagonal,
        order: 2,
    };
    let now = Instant::now();
    let mask = build_mask(spectrum.rows(), spectrum.cols(), &filter);
    spectrum.apply_mask(&mask);
    info!("apply {} mask: {}ms", filter.kind(), now.elapsed().as_millis());
    spectrum.magnitude_image().save("spectrum_filtered.png")?;

    // Invert the FFT back to the spatial domain of the image.
    let now = Instant::now();
    let filtered = spectrum.inverse();
    info!("convert back to image: {}ms", now.elapsed().as_millis());
    raster::normalize_to_gray(width, height, &filtered).save("filtered.png")?;

    Ok(())
}
