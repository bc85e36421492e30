//! This module finds how far the intensity factor can be pushed before a spectrum's color falls out of
//! the target gamut. That value, `max_saturation`, bounds the factor a user can choose, and half of it
//! is a sensible starting point for a preview.
//!
//! The two spectrum types run into opposite walls of the gamut. Absorption darkens toward black, so the
//! search watches for channels going below 0; emission brightens without limit, so it watches for
//! channels going above 1.

use crate::dataset::SpectralDataset;
use crate::integrate::{tristimulus, SpectrumType};
use crate::space::{ColorSpace, GamutMapping};

/// Bisection steps used by default: enough to exhaust `f64` precision.
pub const DEFAULT_ITERATIONS: u32 = 64;

/// The step count older versions used. Coarser, but indistinguishable on screen.
pub const LEGACY_ITERATIONS: u32 = 24;

/// The calibrated range of the intensity factor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    /// The largest factor at the edge of the gamut.
    pub max: f64,
    /// The factor to start from: half of `max`.
    pub default_factor: f64,
}

impl Saturation {
    fn from_max(max: f64) -> Saturation {
        Saturation {
            max,
            default_factor: max / 2.0,
        }
    }
}

/// Whether a mapped color has crossed the gamut wall that matters for `kind`.
pub fn crossed_boundary(kind: SpectrumType, mapping: &GamutMapping) -> bool {
    match kind {
        SpectrumType::Absorption => mapping.clipped_low,
        SpectrumType::Emission => mapping.clipped_high,
    }
}

/// Where the search starts from: `1000 / total luminance` for absorption, the total luminance itself
/// for emission.
pub fn upper_bound(dataset: &SpectralDataset, kind: SpectrumType) -> f64 {
    match kind {
        SpectrumType::Absorption => 1000.0 / dataset.total_luminance(),
        SpectrumType::Emission => dataset.total_luminance(),
    }
}

/// Bisects `[low, high]` for the point where `crossed` flips from false to true, assuming it is false
/// at `low` and monotonic in between. Returns the upper end of the final bracket, so `crossed` always
/// holds at the result, unless it doesn't even hold at `high`, in which case `high` comes back as is.
/// The bracket shrinks to `(high - low) / 2^iterations`.
pub fn bisect<F>(low: f64, high: f64, iterations: u32, crossed: F) -> f64
where
    F: Fn(f64) -> bool,
{
    if !crossed(high) {
        return high;
    }
    let (mut low, mut high) = (low, high);
    for i in 0..iterations {
        let mid = (low + high) / 2.0;
        if mid <= low || mid >= high {
            // the bracket is as small as floats allow
            break;
        }
        if crossed(mid) {
            high = mid;
        } else {
            low = mid;
        }
        trace!(step = i, low, high, "saturation bisection");
    }
    high
}

/// Finds the largest intensity factor for `dataset` that stays (just) at the gamut boundary of `space`,
/// searching `iterations` bisection steps from `[0, upper_bound]`.
pub fn find_max_saturation(
    dataset: &SpectralDataset,
    kind: SpectrumType,
    space: &ColorSpace,
    iterations: u32,
    upper_bound: f64,
) -> f64 {
    let params = space.params();
    bisect(0.0, upper_bound, iterations, |factor| {
        crossed_boundary(kind, &params.map(tristimulus(dataset, kind, factor)))
    })
}

/// Calibrates the intensity factor for `dataset`, `kind` and `space`.
pub fn solve(
    dataset: &SpectralDataset,
    kind: SpectrumType,
    space: &ColorSpace,
    iterations: u32,
) -> Saturation {
    let bound = upper_bound(dataset, kind);
    if !bound.is_finite() || bound <= 0.0 {
        warn!(bound, "no usable saturation bound, intensity fixed at 0");
        return Saturation::from_max(0.0);
    }
    let max = find_max_saturation(dataset, kind, space, iterations, bound);
    debug!(?kind, space = space.name(), bound, max, "solved saturation");
    Saturation::from_max(max)
}
