//! This module handles the one bound every RGB working space shares: linear channel values have to lie
//! between 0 and 1. Anything outside is clamped, but the excursion is remembered, because the
//! saturation search needs to know which side of the gamut a color fell off.

use crate::consts::GAMUT_TOLERANCE;

/// The result of forcing a linear RGB triple into the unit cube.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clamped {
    /// The clamped channels, each in `[0, 1]`.
    pub channels: [f64; 3],
    /// Some channel was below 0, i.e. darker than the space's black.
    pub clipped_low: bool,
    /// Some channel was above 1, i.e. brighter or more saturated than the space can show.
    pub clipped_high: bool,
}

/// Clamps each channel to `[0, 1]`. Any negative channel sets `clipped_low`; `clipped_high` is only
/// set for channels more than [`GAMUT_TOLERANCE`] above 1. Flags are computed from the values before
/// clamping.
pub fn clamp_unit(channels: [f64; 3]) -> Clamped {
    let mut clamped = [0.; 3];
    let mut clipped_low = false;
    let mut clipped_high = false;
    for (out, &component) in clamped.iter_mut().zip(channels.iter()) {
        if component < 0. {
            clipped_low = true;
        }
        if component > 1. + GAMUT_TOLERANCE {
            clipped_high = true;
        }
        *out = if component < 0. {
            0.
        } else if component > 1. {
            1.
        } else {
            component
        };
    }
    Clamped {
        channels: clamped,
        clipped_low,
        clipped_high,
    }
}
