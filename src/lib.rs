//! Spectral Swatch turns a measured spectrum into a color you can put in a document. Give it an
//! absorbance or emission curve sampled at whatever wavelengths your instrument used, and it resamples
//! the curve onto a regular grid, integrates it against a standard observer (and, for absorbance, an
//! illuminant) into CIE XYZ, and maps that into Adobe RGB (1998) or sRGB with proper gamut clipping
//! and transfer functions.
//!
//! Absorbance on its own doesn't fix a color: the same dye looks pale in a thin film and nearly black
//! in a thick one. The crate therefore also calibrates the intensity factor, finding the strongest
//! setting that still fits in the target gamut, so a host can offer a slider with sensible bounds.
//!
//! The pieces, from the bottom up:
//!
//! - [`table`] reads delimited text into columns.
//! - [`resample`] interpolates columns onto a [`WavelengthGrid`](resample::WavelengthGrid).
//! - [`observer`] and [`illuminants`] provide the curves a spectrum is weighed against.
//! - [`dataset`] ties the three curves together, [`integrate`] turns them into XYZ.
//! - [`space`] maps XYZ into RGB, [`saturation`] calibrates the intensity.
//! - [`presenter`] formats the result, [`session`] keeps it all together for a host application.

#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
#![allow(clippy::unreadable_literal)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate tracing;

pub mod bound;
pub mod color;
mod consts;
pub mod dataset;
pub mod error;
pub mod illuminants;
pub mod integrate;
pub mod observer;
pub mod prelude;
pub mod presenter;
pub mod resample;
pub mod saturation;
pub mod session;
pub mod settings;
pub mod space;
pub mod table;

pub use error::SpectrumError;
