// SPDX-License-Identifier: MPL-2.0

//! Error type of the crate.

use thiserror::Error;

/// Errors reported by the filtering operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The input image has no pixels.
    #[error("no image to process: input is empty")]
    EmptyImage,

    /// A sample buffer does not hold `rows * cols` values.
    #[error("expected {expected} samples, got {actual}")]
    SizeMismatch {
        /// Number of samples implied by the dimensions.
        expected: usize,
        /// Length of the buffer.
        actual: usize,
    },

    /// A parameter value makes the transfer function undefined.
    #[error("degenerate filter parameter `{name}`: {value}")]
    DegenerateParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Band radii are not ordered (`inner` must be strictly below `outer`).
    #[error("inner radius {inner} must be smaller than outer radius {outer}")]
    InvalidBand {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },

    /// A filter name could not be parsed.
    #[error("unknown filter kind: {0}")]
    UnknownKind(String),
}
