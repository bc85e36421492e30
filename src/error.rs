//! This module defines the single error type used throughout the crate. Failures are never partial:
//! any operation that returns an `Err` leaves whatever it was going to replace exactly as it was.

use std::error::Error;
use std::fmt;
use std::io;

/// Everything that can go wrong while turning a spectrum file into a color. Rows with unreadable
/// numbers are *not* errors: they are skipped silently during resampling.
#[derive(Debug)]
pub enum SpectrumError {
    /// The widest row of a delimited file had fewer than two columns. This almost always means the
    /// file is not a spectrum at all, or the wrong delimiter was chosen.
    Parse {
        /// The number of columns in the widest row that was found.
        widest: usize,
    },
    /// A column was requested that the parsed table does not have.
    MissingColumn {
        /// The requested column index.
        index: usize,
        /// How many columns the table actually has.
        available: usize,
    },
    /// Not a single row had a numeric wavelength and value, so nothing can be interpolated.
    NoSamples,
    /// A wavelength grid with a zero step or with its minimum above its maximum.
    InvalidGrid,
    /// Two curves that must share a wavelength grid do not.
    GridMismatch,
    /// The illuminant gives the observer no light at all (Σ Ȳ × power is zero or not a number), so an
    /// absorption spectrum can't be normalized against it.
    DarkIlluminant,
    /// An observer name that is not in the built-in registry.
    UnknownObserver(String),
    /// A delimiter that cannot be used to split fields, such as a newline.
    InvalidDelimiter(char),
    /// Reading a file failed.
    Io(io::Error),
    /// One of the bundled data tables could not be read.
    Data(csv::Error),
}

impl fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SpectrumError::Parse { widest } => write!(
                f,
                "invalid file or wrong delimiter: widest row has {} column(s), at least 2 needed",
                widest
            ),
            SpectrumError::MissingColumn { index, available } => write!(
                f,
                "column {} requested but the file only has {} column(s)",
                index, available
            ),
            SpectrumError::NoSamples => write!(f, "no numeric wavelength/value rows found"),
            SpectrumError::InvalidGrid => write!(f, "invalid wavelength grid"),
            SpectrumError::GridMismatch => write!(f, "curves do not share a wavelength grid"),
            SpectrumError::DarkIlluminant => write!(f, "illuminant has no visible power"),
            SpectrumError::UnknownObserver(ref name) => write!(f, "unknown observer \"{}\"", name),
            SpectrumError::InvalidDelimiter(c) => write!(f, "{:?} cannot be used as a delimiter", c),
            SpectrumError::Io(ref e) => write!(f, "could not read file: {}", e),
            SpectrumError::Data(ref e) => write!(f, "bundled data table is corrupt: {}", e),
        }
    }
}

impl Error for SpectrumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SpectrumError::Io(ref e) => Some(e),
            SpectrumError::Data(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SpectrumError {
    fn from(e: io::Error) -> SpectrumError {
        SpectrumError::Io(e)
    }
}

impl From<csv::Error> for SpectrumError {
    fn from(e: csv::Error) -> SpectrumError {
        SpectrumError::Data(e)
    }
}
