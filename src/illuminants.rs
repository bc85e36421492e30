//! This module provides the light sources a transmissive sample can be viewed under. An absorption
//! spectrum on its own has no color; it only has one once something shines through it. The
//! illuminant is that something, given as a relative spectral power distribution.
//!
//! The tabulated white points are from the [ASTM E308
//! standard](https://www.astm.org/Standards/E308.htm), normalized so that Y is 100, and are handy for
//! checking that integration against an illuminant's spectrum lands where it should.

use crate::error::SpectrumError;
use crate::resample::{resample, resample_samples, ResampledCurve, WavelengthGrid};
use crate::table::Table;

/// The built-in illuminants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Illuminant {
    /// Average daylight, about 6504 K. The reference white of both sRGB and Adobe RGB (1998).
    D65,
    /// The equal-energy illuminant: the same power at every wavelength.
    E,
}

impl Default for Illuminant {
    fn default() -> Illuminant {
        Illuminant::D65
    }
}

/// Every built-in illuminant, in the same order as the enum.
pub static ILLUMINANTS: [Illuminant; 2] = [Illuminant::D65, Illuminant::E];

/// White points of the built-in illuminants for the CIE 1931 observer, in the same order as
/// [`ILLUMINANTS`].
pub static ILLUMINANT_WHITE_POINTS: [[f64; 3]; 2] = [
    [95.047, 100.000, 108.883],
    [100.000, 100.000, 100.000],
];

#[derive(Debug, Deserialize)]
struct Record {
    wavelength: f64,
    power: f64,
}

impl Illuminant {
    /// Gets the XYZ coordinates of the white point value of the illuminant, with Y = 100.
    pub fn white_point(self) -> [f64; 3] {
        match self {
            Illuminant::D65 => ILLUMINANT_WHITE_POINTS[0],
            Illuminant::E => ILLUMINANT_WHITE_POINTS[1],
        }
    }

    /// The relative spectral power of this illuminant on `grid`. D65 comes from the bundled CIE table,
    /// normalized to 100 at 560 nm.
    pub fn spectrum(self, grid: WavelengthGrid) -> Result<ResampledCurve, SpectrumError> {
        match self {
            Illuminant::D65 => {
                let data = include_str!("../data/cie_d65.csv");
                let mut reader = csv::Reader::from_reader(data.as_bytes());
                let mut samples = vec![];
                for result in reader.deserialize() {
                    let record: Record = result?;
                    samples.push((record.wavelength, record.power));
                }
                resample_samples(&samples, grid)
            }
            Illuminant::E => {
                grid.validate()?;
                Ok(ResampledCurve::constant(grid, 100.0))
            }
        }
    }
}

/// Reads an illuminant from a parsed table: wavelengths in column 0, relative power in column 1.
pub fn illuminant_from_table(table: &Table, grid: WavelengthGrid) -> Result<ResampledCurve, SpectrumError> {
    resample(table, 0, 1, grid)
}
