//! This module puts irregularly sampled spectra onto a common wavelength grid. Measured data comes at
//! whatever wavelengths the instrument felt like, unsorted and with gaps; everything downstream
//! (observer functions, illuminants, integration) needs one value per grid wavelength, with every
//! curve on the very same grid.
//!
//! Each grid wavelength is filled by linear interpolation between the closest sample below it and the
//! closest sample above it. Past the edges of the data the nearest sample is simply repeated, so a
//! resampled curve never has a hole in it.

use std::convert::TryFrom;

use crate::error::SpectrumError;
use crate::table::Table;

/// A closed interval of integer wavelengths, in nanometers, walked at a fixed step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WavelengthGrid {
    /// The first wavelength on the grid.
    pub min: u32,
    /// The last wavelength that may be on the grid. It is only on the grid if `max - min` is a
    /// multiple of `step`.
    pub max: u32,
    /// The distance between neighboring grid wavelengths.
    pub step: u32,
}

impl Default for WavelengthGrid {
    /// The visible range, 380 to 780 nm every 5 nm: 81 points.
    fn default() -> WavelengthGrid {
        WavelengthGrid {
            min: 380,
            max: 780,
            step: 5,
        }
    }
}

impl WavelengthGrid {
    /// Creates a new grid, checking that it actually describes a finite, nonempty set of points.
    pub fn new(min: u32, max: u32, step: u32) -> Result<WavelengthGrid, SpectrumError> {
        let grid = WavelengthGrid { min, max, step };
        grid.validate()?;
        Ok(grid)
    }

    /// Checks that the step is positive and `min <= max`.
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if self.step == 0 || self.min > self.max {
            Err(SpectrumError::InvalidGrid)
        } else {
            Ok(())
        }
    }

    /// The number of wavelengths on the grid.
    pub fn len(&self) -> usize {
        if self.step == 0 || self.min > self.max {
            0
        } else {
            ((self.max - self.min) / self.step) as usize + 1
        }
    }

    /// Whether the grid has no points, which only happens for invalid grids.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grid wavelengths in increasing order.
    pub fn wavelengths(&self) -> impl Iterator<Item = u32> {
        let (min, step) = (self.min, self.step);
        (0..self.len() as u32).map(move |i| min + i * step)
    }

    /// The position of `wavelength` on the grid, if it is a grid point.
    pub fn index_of(&self, wavelength: u32) -> Option<usize> {
        if self.step == 0 || wavelength < self.min || wavelength > self.max {
            return None;
        }
        let offset = wavelength - self.min;
        if offset % self.step == 0 {
            Some((offset / self.step) as usize)
        } else {
            None
        }
    }
}

/// A curve with exactly one value per point of its [`WavelengthGrid`]. Deserialized curves go
/// through [`ResampledCurve::from_values`], so a stored curve can't break that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct ResampledCurve {
    grid: WavelengthGrid,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawCurve {
    grid: WavelengthGrid,
    values: Vec<f64>,
}

impl TryFrom<RawCurve> for ResampledCurve {
    type Error = SpectrumError;

    fn try_from(raw: RawCurve) -> Result<ResampledCurve, SpectrumError> {
        ResampledCurve::from_values(raw.grid, raw.values)
    }
}

impl ResampledCurve {
    /// A curve with the same value everywhere.
    pub fn constant(grid: WavelengthGrid, value: f64) -> ResampledCurve {
        ResampledCurve {
            grid,
            values: vec![value; grid.len()],
        }
    }

    /// Builds a curve from values already on the grid. The number of values must match the grid.
    pub fn from_values(grid: WavelengthGrid, values: Vec<f64>) -> Result<ResampledCurve, SpectrumError> {
        if grid.is_empty() || values.len() != grid.len() {
            return Err(SpectrumError::GridMismatch);
        }
        Ok(ResampledCurve { grid, values })
    }

    /// The grid this curve is sampled on.
    pub fn grid(&self) -> WavelengthGrid {
        self.grid
    }

    /// The values, one per grid wavelength, in increasing wavelength order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The value at a grid wavelength. Wavelengths that aren't grid points have no value.
    pub fn get(&self, wavelength: u32) -> Option<f64> {
        self.grid.index_of(wavelength).map(|i| self.values[i])
    }

    /// Iterates over `(wavelength, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.grid.wavelengths().zip(self.values.iter().cloned())
    }
}

// Reads a cell the way a spreadsheet would: surrounding whitespace is fine, anything that isn't a
// finite number is not.
fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Pulls the `(wavelength, value)` pairs out of two columns of a table, skipping every row where
/// either cell is missing or isn't a number.
pub fn numeric_samples(
    table: &Table,
    wavelength_column: usize,
    value_column: usize,
) -> Result<Vec<(f64, f64)>, SpectrumError> {
    let wavelengths = table.require_column(wavelength_column)?;
    let values = table.require_column(value_column)?;
    Ok(wavelengths
        .iter()
        .enumerate()
        .filter_map(|(j, wl)| {
            let value = values.get(j)?;
            Some((parse_cell(wl)?, parse_cell(value)?))
        })
        .collect())
}

/// Interpolates one grid wavelength from its nearest neighbors. A sample exactly on the wavelength
/// wins outright; otherwise the closest samples strictly below and strictly above are blended. If
/// only one side exists, its value is used as is.
fn interpolate_at(samples: &[(f64, f64)], wavelength: f64) -> Option<f64> {
    let mut below: Option<(f64, f64)> = None;
    let mut above: Option<(f64, f64)> = None;
    let mut exact: Option<f64> = None;

    for &(wl, value) in samples {
        let dist = wl - wavelength;
        if dist > 0.0 {
            if above.map_or(true, |(high, _)| wl < high) {
                above = Some((wl, value));
            }
        } else if dist < 0.0 {
            if below.map_or(true, |(low, _)| wl > low) {
                below = Some((wl, value));
            }
        } else {
            exact = Some(value);
        }
    }

    if exact.is_some() {
        return exact;
    }
    match (below, above) {
        (Some((low, low_value)), Some((high, high_value))) => {
            let t = (wavelength - low) / (high - low);
            Some(low_value + (high_value - low_value) * t)
        }
        (Some((_, value)), None) | (None, Some((_, value))) => Some(value),
        (None, None) => None,
    }
}

/// Resamples `(wavelength, value)` samples onto a grid. The samples may come in any order and may
/// repeat wavelengths. Values are stored as absolute values.
///
/// # Errors
/// [`SpectrumError::NoSamples`] if `samples` is empty, [`SpectrumError::InvalidGrid`] for a bad grid.
pub fn resample_samples(
    samples: &[(f64, f64)],
    grid: WavelengthGrid,
) -> Result<ResampledCurve, SpectrumError> {
    grid.validate()?;
    if samples.is_empty() {
        return Err(SpectrumError::NoSamples);
    }
    let values = grid
        .wavelengths()
        .map(|wl| interpolate_at(samples, f64::from(wl)).map(f64::abs))
        .collect::<Option<Vec<f64>>>()
        .ok_or(SpectrumError::NoSamples)?;
    Ok(ResampledCurve { grid, values })
}

/// Resamples one column of a parsed table against another column of wavelengths. This is how every
/// curve in the crate is made: spectra, observer functions and illuminants alike.
pub fn resample(
    table: &Table,
    wavelength_column: usize,
    value_column: usize,
    grid: WavelengthGrid,
) -> Result<ResampledCurve, SpectrumError> {
    let samples = numeric_samples(table, wavelength_column, value_column)?;
    let skipped = table
        .column(wavelength_column)
        .map_or(0, |c| c.len())
        .saturating_sub(samples.len());
    if skipped > 0 {
        trace!(skipped, "skipped non-numeric rows");
    }
    resample_samples(&samples, grid)
}
