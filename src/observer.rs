//! This module provides observer color-matching functions: the three curves X̄, Ȳ and Z̄ that turn a
//! spectrum into tristimulus values. The CIE 1931 2° observer ships with the crate; others can be
//! read from any delimited file with the wavelength in the first column and X̄, Ȳ, Z̄ in the next
//! three.

use std::collections::HashMap;
use std::convert::TryFrom;

use crate::error::SpectrumError;
use crate::resample::{resample, resample_samples, ResampledCurve, WavelengthGrid};
use crate::table::Table;

/// The name of the observer used when nothing else is chosen.
pub const DEFAULT_OBSERVER: &str = "CIE 1931";

lazy_static! {
    /// The bundled observer tables, by name. Each is a CSV file with a header row and the columns
    /// `wavelength,xbar,ybar,zbar`.
    pub static ref BUILTIN_OBSERVERS: HashMap<&'static str, &'static str> = hashmap! {
        DEFAULT_OBSERVER => include_str!("../data/cie1931_observer.csv"),
    };
}

#[derive(Debug, Deserialize)]
struct Record {
    wavelength: f64,
    xbar: f64,
    ybar: f64,
    zbar: f64,
}

/// The three color-matching functions of an observer, all on the same grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObserver")]
pub struct ObserverFunctions {
    /// X̄, the mostly-red lobe with a small blue bump.
    pub x: ResampledCurve,
    /// Ȳ, which doubles as the photopic luminosity function.
    pub y: ResampledCurve,
    /// Z̄, the blue lobe.
    pub z: ResampledCurve,
}

#[derive(Deserialize)]
struct RawObserver {
    x: ResampledCurve,
    y: ResampledCurve,
    z: ResampledCurve,
}

impl TryFrom<RawObserver> for ObserverFunctions {
    type Error = SpectrumError;

    fn try_from(raw: RawObserver) -> Result<ObserverFunctions, SpectrumError> {
        if raw.x.grid() != raw.y.grid() || raw.z.grid() != raw.y.grid() {
            return Err(SpectrumError::GridMismatch);
        }
        Ok(ObserverFunctions {
            x: raw.x,
            y: raw.y,
            z: raw.z,
        })
    }
}

impl ObserverFunctions {
    /// Loads one of the [`BUILTIN_OBSERVERS`] onto `grid`.
    ///
    /// # Errors
    /// [`SpectrumError::UnknownObserver`] for a name that isn't built in.
    pub fn builtin(name: &str, grid: WavelengthGrid) -> Result<ObserverFunctions, SpectrumError> {
        let data = BUILTIN_OBSERVERS
            .get(name)
            .ok_or_else(|| SpectrumError::UnknownObserver(name.to_owned()))?;
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let (mut xs, mut ys, mut zs) = (vec![], vec![], vec![]);
        for result in reader.deserialize() {
            let record: Record = result?;
            xs.push((record.wavelength, record.xbar));
            ys.push((record.wavelength, record.ybar));
            zs.push((record.wavelength, record.zbar));
        }
        Ok(ObserverFunctions {
            x: resample_samples(&xs, grid)?,
            y: resample_samples(&ys, grid)?,
            z: resample_samples(&zs, grid)?,
        })
    }

    /// Reads an observer from a parsed table: wavelengths in column 0, X̄, Ȳ and Z̄ in columns 1 to 3.
    pub fn from_table(table: &Table, grid: WavelengthGrid) -> Result<ObserverFunctions, SpectrumError> {
        Ok(ObserverFunctions {
            x: resample(table, 0, 1, grid)?,
            y: resample(table, 0, 2, grid)?,
            z: resample(table, 0, 3, grid)?,
        })
    }

    /// The grid shared by all three curves.
    pub fn grid(&self) -> WavelengthGrid {
        self.y.grid()
    }
}
