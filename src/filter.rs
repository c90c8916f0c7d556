// SPDX-License-Identifier: MPL-2.0

//! Filter families and their transfer functions.
//!
//! A [`Filter`] carries the family together with its parameters,
//! so a mask can only be built from a complete and consistent description.
//! All distances are expressed in frequency samples from the center
//! of the shifted spectrum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Default cutoff radius of the low/high-pass families.
pub const DEFAULT_CUTOFF: f64 = 30.0;
/// Default Butterworth order.
pub const DEFAULT_ORDER: u32 = 2;
/// Default inner radius of the band families.
pub const DEFAULT_INNER: f64 = 30.0;
/// Default outer radius of the band families.
pub const DEFAULT_OUTER: f64 = 50.0;

/// Parameters of the homomorphic transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomomorphicParams {
    /// Cutoff radius `d0`.
    pub cutoff: f64,
    /// Gain applied to the lowest frequencies (illumination).
    pub low_gain: f64,
    /// Gain reached by the highest frequencies (reflectance).
    pub high_gain: f64,
    /// Sharpness constant `c` of the transition.
    pub sharpness: f64,
}

impl Default for HomomorphicParams {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            low_gain: 0.5,
            high_gain: 2.0,
            sharpness: 1.0,
        }
    }
}

impl HomomorphicParams {
    /// `(h_high - h_low) * (1 - exp(-c * d^2 / d0^2)) + h_low`
    pub fn transfer(&self, d: f64) -> f64 {
        let ratio = d * d / (self.cutoff * self.cutoff);
        (self.high_gain - self.low_gain) * (1.0 - (-self.sharpness * ratio).exp()) + self.low_gain
    }
}

/// A frequency-domain filter with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Filter {
    /// Keeps frequencies inside the disk of radius `cutoff`.
    #[serde(rename = "low_pass_ideal")]
    IdealLowPass {
        /// Cutoff radius.
        cutoff: f64,
    },
    /// Removes frequencies inside the disk of radius `cutoff`.
    #[serde(rename = "high_pass_ideal")]
    IdealHighPass {
        /// Cutoff radius.
        cutoff: f64,
    },
    /// Keeps the annulus `inner <= d <= outer`.
    #[serde(rename = "band_pass_ideal")]
    IdealBandPass {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },
    /// Removes the annulus `inner <= d <= outer`.
    #[serde(rename = "band_stop_ideal")]
    IdealBandStop {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
    },
    /// `1 / (1 + (d/d0)^(2n))`
    #[serde(rename = "butterworth_low")]
    ButterworthLowPass {
        /// Cutoff radius.
        cutoff: f64,
        /// Filter order.
        order: u32,
    },
    /// `1 / (1 + (d0/d)^(2n))`
    #[serde(rename = "butterworth_high")]
    ButterworthHighPass {
        /// Cutoff radius.
        cutoff: f64,
        /// Filter order.
        order: u32,
    },
    /// Butterworth high-pass at `inner` times Butterworth low-pass at `outer`.
    #[serde(rename = "butterworth_band_pass")]
    ButterworthBandPass {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
        /// Filter order.
        order: u32,
    },
    /// Butterworth band-reject around the geometric center of `inner` and `outer`.
    #[serde(rename = "butterworth_band_stop")]
    ButterworthBandStop {
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
        /// Filter order.
        order: u32,
    },
    /// `exp(-d^2 / (2 d0^2))`
    #[serde(rename = "gaussian_low")]
    GaussianLowPass {
        /// Cutoff radius (standard deviation).
        cutoff: f64,
    },
    /// `1 - exp(-d^2 / (2 d0^2))`
    #[serde(rename = "gaussian_high")]
    GaussianHighPass {
        /// Cutoff radius (standard deviation).
        cutoff: f64,
    },
    /// Gain shaping applied in the log domain, see [`crate::homomorphic`].
    #[serde(rename = "homomorphic")]
    Homomorphic(HomomorphicParams),
}

impl Filter {
    /// The filter of the given family with the default parameters.
    pub fn with_defaults(kind: FilterKind) -> Self {
        let (cutoff, order) = (DEFAULT_CUTOFF, DEFAULT_ORDER);
        let (inner, outer) = (DEFAULT_INNER, DEFAULT_OUTER);
        match kind {
            FilterKind::IdealLowPass => Filter::IdealLowPass { cutoff },
            FilterKind::IdealHighPass => Filter::IdealHighPass { cutoff },
            FilterKind::IdealBandPass => Filter::IdealBandPass { inner, outer },
            FilterKind::IdealBandStop => Filter::IdealBandStop { inner, outer },
            FilterKind::ButterworthLowPass => Filter::ButterworthLowPass { cutoff, order },
            FilterKind::ButterworthHighPass => Filter::ButterworthHighPass { cutoff, order },
            FilterKind::ButterworthBandPass => Filter::ButterworthBandPass {
                inner,
                outer,
                order,
            },
            FilterKind::ButterworthBandStop => Filter::ButterworthBandStop {
                inner,
                outer,
                order,
            },
            FilterKind::GaussianLowPass => Filter::GaussianLowPass { cutoff },
            FilterKind::GaussianHighPass => Filter::GaussianHighPass { cutoff },
            FilterKind::Homomorphic => Filter::Homomorphic(HomomorphicParams::default()),
        }
    }

    /// The family of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::IdealLowPass { .. } => FilterKind::IdealLowPass,
            Filter::IdealHighPass { .. } => FilterKind::IdealHighPass,
            Filter::IdealBandPass { .. } => FilterKind::IdealBandPass,
            Filter::IdealBandStop { .. } => FilterKind::IdealBandStop,
            Filter::ButterworthLowPass { .. } => FilterKind::ButterworthLowPass,
            Filter::ButterworthHighPass { .. } => FilterKind::ButterworthHighPass,
            Filter::ButterworthBandPass { .. } => FilterKind::ButterworthBandPass,
            Filter::ButterworthBandStop { .. } => FilterKind::ButterworthBandStop,
            Filter::GaussianLowPass { .. } => FilterKind::GaussianLowPass,
            Filter::GaussianHighPass { .. } => FilterKind::GaussianHighPass,
            Filter::Homomorphic(_) => FilterKind::Homomorphic,
        }
    }

    /// Value of the transfer function at distance `d` from the spectrum center.
    ///
    /// Finite at `d = 0` for every family.
    pub fn transfer(&self, d: f64) -> f64 {
        match *self {
            Filter::IdealLowPass { cutoff } => ideal_low_pass(d, cutoff),
            Filter::IdealHighPass { cutoff } => 1.0 - ideal_low_pass(d, cutoff),
            Filter::IdealBandPass { inner, outer } => ideal_band_pass(d, inner, outer),
            Filter::IdealBandStop { inner, outer } => 1.0 - ideal_band_pass(d, inner, outer),
            Filter::ButterworthLowPass { cutoff, order } => butterworth_low_pass(d, cutoff, order),
            Filter::ButterworthHighPass { cutoff, order } => {
                butterworth_high_pass(d, cutoff, order)
            }
            Filter::ButterworthBandPass {
                inner,
                outer,
                order,
            } => {
                if d == 0.0 {
                    0.0
                } else {
                    butterworth_high_pass(d, inner, order) * butterworth_low_pass(d, outer, order)
                }
            }
            Filter::ButterworthBandStop {
                inner,
                outer,
                order,
            } => butterworth_band_stop(d, inner, outer, order),
            Filter::GaussianLowPass { cutoff } => gaussian_low_pass(d, cutoff),
            Filter::GaussianHighPass { cutoff } => 1.0 - gaussian_low_pass(d, cutoff),
            Filter::Homomorphic(params) => params.transfer(d),
        }
    }

    /// Reject parameters for which the transfer function is undefined.
    ///
    /// Radii must be finite and non-negative, radii used as divisors
    /// must be strictly positive, and Butterworth orders at least 1. Band ordering is not checked here,
    /// see [`Filter::validate`].
    pub fn check_degenerate(&self) -> Result<(), FilterError> {
        match *self {
            Filter::IdealLowPass { cutoff } | Filter::IdealHighPass { cutoff } => {
                non_negative("cutoff", cutoff)
            }
            Filter::IdealBandPass { inner, outer } | Filter::IdealBandStop { inner, outer } => {
                non_negative("inner", inner)?;
                non_negative("outer", outer)
            }
            Filter::ButterworthLowPass { cutoff, order }
            | Filter::ButterworthHighPass { cutoff, order } => {
                order_at_least_one(order)?;
                positive("cutoff", cutoff)
            }
            Filter::GaussianLowPass { cutoff } | Filter::GaussianHighPass { cutoff } => {
                positive("cutoff", cutoff)
            }
            Filter::ButterworthBandPass {
                inner,
                outer,
                order,
            }
            | Filter::ButterworthBandStop {
                inner,
                outer,
                order,
            } => {
                order_at_least_one(order)?;
                non_negative("inner", inner)?;
                non_negative("outer", outer)
            }
            Filter::Homomorphic(p) => {
                positive("cutoff", p.cutoff)?;
                finite("low_gain", p.low_gain)?;
                finite("high_gain", p.high_gain)?;
                finite("sharpness", p.sharpness)
            }
        }
    }

    /// Check the parameters the way an interactive front end does before
    /// running a filter: every radius strictly positive, order at least 1,
    /// band radii strictly ordered.
    ///
    /// The filtering functions never call this themselves.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.check_degenerate()?;
        match *self {
            Filter::IdealLowPass { cutoff } | Filter::IdealHighPass { cutoff } => {
                positive("cutoff", cutoff)
            }
            Filter::IdealBandPass { inner, outer } | Filter::IdealBandStop { inner, outer } => {
                band(inner, outer)
            }
            Filter::ButterworthLowPass { .. } | Filter::ButterworthHighPass { .. } => Ok(()),
            Filter::ButterworthBandPass { inner, outer, .. }
            | Filter::ButterworthBandStop { inner, outer, .. } => band(inner, outer),
            Filter::GaussianLowPass { .. } | Filter::GaussianHighPass { .. } => Ok(()),
            Filter::Homomorphic(p) => positive("sharpness", p.sharpness),
        }
    }
}

fn ideal_low_pass(d: f64, cutoff: f64) -> f64 {
    if d <= cutoff {
        1.0
    } else {
        0.0
    }
}

fn ideal_band_pass(d: f64, inner: f64, outer: f64) -> f64 {
    if inner <= d && d <= outer {
        1.0
    } else {
        0.0
    }
}

fn butterworth_low_pass(d: f64, cutoff: f64, order: u32) -> f64 {
    if d == 0.0 {
        return 1.0;
    }
    1.0 / (1.0 + (d / cutoff).powf(2.0 * order as f64))
}

fn butterworth_high_pass(d: f64, cutoff: f64, order: u32) -> f64 {
    if d == 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + (cutoff / d).powf(2.0 * order as f64))
}

/// Band-reject with center `sqrt(inner * outer)` and width `outer - inner`.
///
/// Exactly on the center circle the denominator vanishes and the value is 0.
/// This is an approximation kept for compatibility, not a derived limit.
fn butterworth_band_stop(d: f64, inner: f64, outer: f64, order: u32) -> f64 {
    if d == 0.0 {
        return 1.0;
    }
    let denominator = (d * d - inner * outer).powi(2);
    if denominator == 0.0 {
        return 0.0;
    }
    let numerator = (d * (outer - inner)).powi(2);
    1.0 / (1.0 + (numerator / denominator).powf(order as f64))
}

fn gaussian_low_pass(d: f64, cutoff: f64) -> f64 {
    (-(d * d) / (2.0 * cutoff * cutoff)).exp()
}

fn finite(name: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::DegenerateParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), FilterError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(FilterError::DegenerateParameter { name, value });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<(), FilterError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(FilterError::DegenerateParameter { name, value });
    }
    Ok(())
}

fn order_at_least_one(order: u32) -> Result<(), FilterError> {
    if order == 0 {
        return Err(FilterError::DegenerateParameter {
            name: "order",
            value: 0.0,
        });
    }
    Ok(())
}

fn band(inner: f64, outer: f64) -> Result<(), FilterError> {
    positive("inner", inner)?;
    if inner >= outer {
        return Err(FilterError::InvalidBand { inner, outer });
    }
    Ok(())
}

/// Family tag of a [`Filter`], without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Ideal low-pass.
    #[serde(rename = "low_pass_ideal")]
    IdealLowPass,
    /// Ideal high-pass.
    #[serde(rename = "high_pass_ideal")]
    IdealHighPass,
    /// Ideal band-pass.
    #[serde(rename = "band_pass_ideal")]
    IdealBandPass,
    /// Ideal band-stop.
    #[serde(rename = "band_stop_ideal")]
    IdealBandStop,
    /// Butterworth low-pass.
    #[serde(rename = "butterworth_low")]
    ButterworthLowPass,
    /// Butterworth high-pass.
    #[serde(rename = "butterworth_high")]
    ButterworthHighPass,
    /// Butterworth band-pass.
    #[serde(rename = "butterworth_band_pass")]
    ButterworthBandPass,
    /// Butterworth band-stop.
    #[serde(rename = "butterworth_band_stop")]
    ButterworthBandStop,
    /// Gaussian low-pass.
    #[serde(rename = "gaussian_low")]
    GaussianLowPass,
    /// Gaussian high-pass.
    #[serde(rename = "gaussian_high")]
    GaussianHighPass,
    /// Homomorphic.
    #[serde(rename = "homomorphic")]
    Homomorphic,
}

impl FilterKind {
    /// Every filter family.
    pub const ALL: [FilterKind; 11] = [
        FilterKind::IdealLowPass,
        FilterKind::IdealHighPass,
        FilterKind::IdealBandPass,
        FilterKind::IdealBandStop,
        FilterKind::ButterworthLowPass,
        FilterKind::ButterworthHighPass,
        FilterKind::ButterworthBandPass,
        FilterKind::ButterworthBandStop,
        FilterKind::GaussianLowPass,
        FilterKind::GaussianHighPass,
        FilterKind::Homomorphic,
    ];

    /// Stable snake_case name, identical to the serialized tag.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::IdealLowPass => "low_pass_ideal",
            FilterKind::IdealHighPass => "high_pass_ideal",
            FilterKind::IdealBandPass => "band_pass_ideal",
            FilterKind::IdealBandStop => "band_stop_ideal",
            FilterKind::ButterworthLowPass => "butterworth_low",
            FilterKind::ButterworthHighPass => "butterworth_high",
            FilterKind::ButterworthBandPass => "butterworth_band_pass",
            FilterKind::ButterworthBandStop => "butterworth_band_stop",
            FilterKind::GaussianLowPass => "gaussian_low",
            FilterKind::GaussianHighPass => "gaussian_high",
            FilterKind::Homomorphic => "homomorphic",
        }
    }

    /// Whether the family is parameterized by an inner and outer radius.
    pub fn is_band(self) -> bool {
        matches!(
            self,
            FilterKind::IdealBandPass
                | FilterKind::IdealBandStop
                | FilterKind::ButterworthBandPass
                | FilterKind::ButterworthBandStop
        )
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownKind(s.to_string()))
    }
}
