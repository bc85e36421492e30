//! This module integrates a spectrum into CIE XYZ. How that works depends on what the spectrum
//! measures:
//!
//! - An **absorption** spectrum gives absorbance. Scaled by the intensity factor (think path length ×
//!   concentration), it becomes transmittance `10^(-A·lc)`, which filters the illuminant before the
//!   observer sees it. The result is normalized by the illuminant's own luminance, so a sample that
//!   lets everything through comes out with Y = 1.
//! - An **emission** spectrum is light in its own right. It is scaled by the intensity factor and
//!   integrated directly, with no illuminant and no normalization.

use crate::color::XYZColor;
use crate::dataset::SpectralDataset;

/// What a spectrum measures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectrumType {
    /// Absorbance of a transmissive sample, viewed under the dataset's illuminant.
    Absorption,
    /// Emitted spectral power.
    Emission,
}

impl Default for SpectrumType {
    fn default() -> SpectrumType {
        SpectrumType::Absorption
    }
}

/// Converts absorbance into transmittance at intensity `lc`.
pub fn transmittance(absorbance: f64, lc: f64) -> f64 {
    10f64.powf(-(absorbance * lc))
}

/// Integrates `dataset` into XYZ at the given intensity factor.
pub fn tristimulus(dataset: &SpectralDataset, kind: SpectrumType, factor: f64) -> XYZColor {
    let obs = dataset.observer();
    let cmfs = obs
        .x
        .values()
        .iter()
        .zip(obs.y.values())
        .zip(obs.z.values())
        .map(|((x, y), z)| (*x, *y, *z));
    let spectrum = dataset.spectrum().values();

    match kind {
        SpectrumType::Absorption => {
            let mut xyz = XYZColor::default();
            for (((xb, yb, zb), &absorbance), &power) in
                cmfs.zip(spectrum).zip(dataset.illuminant().values())
            {
                let t = transmittance(absorbance, factor);
                xyz.x += xb * t * power;
                xyz.y += yb * t * power;
                xyz.z += zb * t * power;
            }
            // never zero: SpectralDataset rejects dark illuminants
            xyz.scale(1.0 / dataset.white_luminance())
        }
        SpectrumType::Emission => {
            let mut xyz = XYZColor::default();
            for ((xb, yb, zb), &value) in cmfs.zip(spectrum) {
                let weighted = value * factor;
                xyz.x += xb * weighted;
                xyz.y += yb * weighted;
                xyz.z += zb * weighted;
            }
            xyz
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use crate::illuminants::Illuminant;
    use crate::observer::{ObserverFunctions, DEFAULT_OBSERVER};
    use crate::resample::{ResampledCurve, WavelengthGrid};
    use float_cmp::approx_eq;

    fn dataset(value: f64, illuminant: Illuminant) -> SpectralDataset {
        let grid = WavelengthGrid::default();
        SpectralDataset::new(
            ResampledCurve::constant(grid, value),
            ObserverFunctions::builtin(DEFAULT_OBSERVER, grid).unwrap(),
            illuminant.spectrum(grid).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_transmittance() {
        assert_eq!(transmittance(0.7, 0.0), 1.0);
        assert!(approx_eq!(f64, transmittance(1.0, 1.0), 0.1, epsilon = 1e-15));
        assert!(approx_eq!(f64, transmittance(0.5, 4.0), 0.01, epsilon = 1e-15));
    }

    #[test]
    fn test_zero_factor_is_white() {
        let xyz = tristimulus(&dataset(0.8, Illuminant::D65), SpectrumType::Absorption, 0.0);
        assert!(approx_eq!(f64, xyz.y, 1.0, epsilon = 1e-12));
        let white = Illuminant::D65.white_point();
        assert!(approx_eq!(f64, xyz.x, white[0] / 100.0, epsilon = 1e-3));
        assert!(approx_eq!(f64, xyz.z, white[2] / 100.0, epsilon = 1e-3));
    }

    #[test]
    fn test_flat_absorbance_scales_luminance() {
        // a flat absorbance attenuates every wavelength equally
        let xyz = tristimulus(&dataset(1.0, Illuminant::E), SpectrumType::Absorption, 1.0);
        assert!(approx_eq!(f64, xyz.y, 0.1, epsilon = 1e-12));
        assert!(approx_eq!(f64, xyz.x, 0.1, epsilon = 1e-5));
    }

    #[test]
    fn test_emission_is_linear() {
        let data = dataset(1.0, Illuminant::D65);
        let one = tristimulus(&data, SpectrumType::Emission, 1.0);
        let three = tristimulus(&data, SpectrumType::Emission, 3.0);
        assert!(approx_eq!(f64, one.y, data.total_luminance(), epsilon = 1e-9));
        assert!(approx_eq!(f64, three.x, 3.0 * one.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, three.z, 3.0 * one.z, epsilon = 1e-9));
        assert_eq!(tristimulus(&data, SpectrumType::Emission, 0.0), XYZColor::default());
    }
}
