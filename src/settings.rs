//! This module holds the user-facing knobs of a conversion, gathered in one serializable struct so a
//! host can persist and restore them however it likes.

use crate::illuminants::Illuminant;
use crate::integrate::SpectrumType;
use crate::observer::DEFAULT_OBSERVER;
use crate::resample::WavelengthGrid;
use crate::saturation::DEFAULT_ITERATIONS;
use crate::space::ColorSpace;
use crate::table::Delimiter;

/// Everything that decides how a spectrum becomes a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// How fields are separated in spectrum, observer and illuminant files.
    pub delimiter: Delimiter,
    /// Whether spectra are absorbance or emission.
    pub spectrum_type: SpectrumType,
    /// The RGB space swatches are made in.
    pub color_space: ColorSpace,
    /// The name of a built-in observer.
    pub observer: String,
    /// The built-in illuminant used until a custom one is loaded.
    pub illuminant: Illuminant,
    /// The wavelength grid every curve is resampled onto.
    pub grid: WavelengthGrid,
    /// Bisection steps for the saturation search.
    pub iterations: u32,
    /// The swatch name, if it shouldn't just be the spectrum's file name.
    pub swatch_name: Option<String>,
}

impl Default for ConversionSettings {
    fn default() -> ConversionSettings {
        ConversionSettings {
            delimiter: Delimiter::default(),
            spectrum_type: SpectrumType::default(),
            color_space: ColorSpace::default(),
            observer: DEFAULT_OBSERVER.to_owned(),
            illuminant: Illuminant::default(),
            grid: WavelengthGrid::default(),
            iterations: DEFAULT_ITERATIONS,
            swatch_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConversionSettings::default();
        assert_eq!(settings.delimiter, Delimiter::Comma);
        assert_eq!(settings.spectrum_type, SpectrumType::Absorption);
        assert_eq!(settings.color_space, ColorSpace::AdobeRGB1998);
        assert_eq!(settings.observer, "CIE 1931");
        assert_eq!(settings.grid.len(), 81);
        assert_eq!(settings.iterations, 64);
    }
}
