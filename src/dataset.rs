//! This module ties a resampled spectrum together with the observer and illuminant it is integrated
//! against. A [`SpectralDataset`] is immutable: changing any part of it means building a new one,
//! which recomputes the derived quantities along the way.

use std::convert::TryFrom;

use crate::error::SpectrumError;
use crate::observer::ObserverFunctions;
use crate::resample::{ResampledCurve, WavelengthGrid};

/// A spectrum, observer and illuminant on one shared wavelength grid. Deserializing one rebuilds it
/// with [`SpectralDataset::new`]: stored derived fields are ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct SpectralDataset {
    spectrum: ResampledCurve,
    observer: ObserverFunctions,
    illuminant: ResampledCurve,
    total_luminance: f64,
    white_luminance: f64,
}

#[derive(Deserialize)]
struct RawDataset {
    spectrum: ResampledCurve,
    observer: ObserverFunctions,
    illuminant: ResampledCurve,
}

impl TryFrom<RawDataset> for SpectralDataset {
    type Error = SpectrumError;

    fn try_from(raw: RawDataset) -> Result<SpectralDataset, SpectrumError> {
        SpectralDataset::new(raw.spectrum, raw.observer, raw.illuminant)
    }
}

fn weighted_sum(curve: &ResampledCurve, weights: &ResampledCurve) -> f64 {
    curve
        .values()
        .iter()
        .zip(weights.values())
        .map(|(v, w)| v * w)
        .sum()
}

impl SpectralDataset {
    /// Puts the three together, checking that every curve lives on the same grid.
    ///
    /// # Errors
    /// [`SpectrumError::GridMismatch`] if any two curves have different grids, and
    /// [`SpectrumError::DarkIlluminant`] if the illuminant has no power where the observer can see.
    pub fn new(
        spectrum: ResampledCurve,
        observer: ObserverFunctions,
        illuminant: ResampledCurve,
    ) -> Result<SpectralDataset, SpectrumError> {
        let grid = spectrum.grid();
        let grids = [
            observer.x.grid(),
            observer.y.grid(),
            observer.z.grid(),
            illuminant.grid(),
        ];
        if grids.iter().any(|g| *g != grid) {
            return Err(SpectrumError::GridMismatch);
        }
        let white_luminance = weighted_sum(&illuminant, &observer.y);
        if !(white_luminance > 0.0 && white_luminance.is_finite()) {
            return Err(SpectrumError::DarkIlluminant);
        }
        let total_luminance = weighted_sum(&spectrum, &observer.y);
        Ok(SpectralDataset {
            spectrum,
            observer,
            illuminant,
            total_luminance,
            white_luminance,
        })
    }

    /// The same observer and illuminant with a different spectrum.
    pub fn with_spectrum(&self, spectrum: ResampledCurve) -> Result<SpectralDataset, SpectrumError> {
        SpectralDataset::new(spectrum, self.observer.clone(), self.illuminant.clone())
    }

    /// The shared grid.
    pub fn grid(&self) -> WavelengthGrid {
        self.spectrum.grid()
    }

    /// The resampled spectrum.
    pub fn spectrum(&self) -> &ResampledCurve {
        &self.spectrum
    }

    /// The observer functions.
    pub fn observer(&self) -> &ObserverFunctions {
        &self.observer
    }

    /// The illuminant's relative power.
    pub fn illuminant(&self) -> &ResampledCurve {
        &self.illuminant
    }

    /// Σ spectrum × Ȳ over the grid. Seeds the saturation search.
    pub fn total_luminance(&self) -> f64 {
        self.total_luminance
    }

    /// Σ illuminant × Ȳ over the grid, always positive. Absorption XYZ is divided by this.
    pub fn white_luminance(&self) -> f64 {
        self.white_luminance
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use crate::illuminants::Illuminant;
    use crate::observer::DEFAULT_OBSERVER;
    use float_cmp::approx_eq;

    fn observer(grid: WavelengthGrid) -> ObserverFunctions {
        ObserverFunctions::builtin(DEFAULT_OBSERVER, grid).unwrap()
    }

    #[test]
    fn test_derived_fields() {
        let grid = WavelengthGrid::default();
        let dataset = SpectralDataset::new(
            ResampledCurve::constant(grid, 2.0),
            observer(grid),
            Illuminant::E.spectrum(grid).unwrap(),
        )
        .unwrap();
        assert!(approx_eq!(f64, dataset.total_luminance(), 2.0 * 21.371327, epsilon = 1e-6));
        assert!(approx_eq!(f64, dataset.white_luminance(), 2137.1327, epsilon = 1e-4));

        let replaced = dataset.with_spectrum(ResampledCurve::constant(grid, 0.5)).unwrap();
        assert!(approx_eq!(f64, replaced.total_luminance(), 0.5 * 21.371327, epsilon = 1e-6));
        assert!(approx_eq!(f64, dataset.total_luminance(), 2.0 * 21.371327, epsilon = 1e-6));
    }

    #[test]
    fn test_grid_mismatch() {
        let grid = WavelengthGrid::default();
        let coarse = WavelengthGrid::new(380, 780, 10).unwrap();
        let illuminant = Illuminant::E.spectrum(coarse).unwrap();
        assert!(matches!(
            SpectralDataset::new(ResampledCurve::constant(grid, 1.0), observer(grid), illuminant),
            Err(SpectrumError::GridMismatch)
        ));
    }

    #[test]
    fn test_dark_illuminant() {
        let grid = WavelengthGrid::default();
        let spectrum = ResampledCurve::constant(grid, 1.0);
        assert!(matches!(
            SpectralDataset::new(spectrum.clone(), observer(grid), ResampledCurve::constant(grid, 0.0)),
            Err(SpectrumError::DarkIlluminant)
        ));
        let nan = ResampledCurve::constant(grid, f64::NAN);
        assert!(matches!(
            SpectralDataset::new(spectrum, observer(grid), nan),
            Err(SpectrumError::DarkIlluminant)
        ));
    }

    #[test]
    fn test_deserialize_rebuilds() {
        let grid = WavelengthGrid::default();
        let dataset = SpectralDataset::new(
            ResampledCurve::constant(grid, 1.0),
            observer(grid),
            Illuminant::D65.spectrum(grid).unwrap(),
        )
        .unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        let back: SpectralDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid(), dataset.grid());

        // stale derived values are recomputed
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["total_luminance"] = serde_json::json!(-5.0);
        let back: SpectralDataset = serde_json::from_value(value.clone()).unwrap();
        assert!(approx_eq!(f64, back.total_luminance(), 21.371327, epsilon = 1e-6));

        // a spectrum on another grid is rejected
        let short = ResampledCurve::constant(WavelengthGrid::new(380, 400, 5).unwrap(), 1.0);
        value["spectrum"] = serde_json::to_value(&short).unwrap();
        assert!(serde_json::from_value::<SpectralDataset>(value).is_err());
    }
}
