//! This module brings the most common functionality under a single namespace, to prevent excessive
//! imports: the color types, the session and its sink, the settings and the enums they are made of,
//! and the error type. The lower-level building blocks (parsing, resampling, integration, the
//! saturation search) stay in their own modules.

pub use crate::color::{RGBColor, XYZColor};
pub use crate::error::SpectrumError;
pub use crate::illuminants::Illuminant;
pub use crate::integrate::SpectrumType;
pub use crate::session::{Session, SwatchSink};
pub use crate::settings::ConversionSettings;
pub use crate::space::ColorSpace;
pub use crate::table::Delimiter;
