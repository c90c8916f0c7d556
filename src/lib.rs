// SPDX-License-Identifier: MPL-2.0

//! Frequency-domain filters for 2D images.
//!
//! An image is transformed with a centered 2D FFT, multiplied by the
//! transfer function of a [`Filter`] and transformed back. The real result
//! is stretched to the full 8-bit range.
//!
//! ```no_run
//! use freqfilter::{apply_frequency_filter, Filter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("input.png")?;
//! let filter = Filter::ButterworthLowPass { cutoff: 30.0, order: 2 };
//! let smoothed = apply_frequency_filter(&img, &filter)?;
//! smoothed.save("smoothed.png")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod homomorphic;
pub mod mask;
pub mod pipeline;
pub mod raster;
// default implementation on mutable slices
pub mod slice;
pub mod spectrum;

#[cfg(feature = "nalgebra")]
pub mod nalgebra;

pub use error::FilterError;
pub use filter::{Filter, FilterKind, HomomorphicParams};
pub use homomorphic::{homomorphic_filter, homomorphic_filter_gray};
pub use mask::{build_mask, FilterMask};
pub use pipeline::{apply_frequency_filter, filter_gray, filter_real};
pub use spectrum::{forward_transform, inverse_transform, Spectrum};
