//! This module maps XYZ tristimulus values into RGB working spaces. Two spaces are built in, Adobe RGB
//! (1998) and sRGB, and any other additive space can be described by the same four ingredients: a
//! matrix from XYZ to linear RGB, a reference white, a reference black, and a transfer function.
//!
//! The mapping runs in four steps:
//!
//! 1. XYZ (normalized so a perfect white has Y = 1) is scaled up to the reference display luminance
//!    and rescaled linearly between the reference black and white, channel by channel.
//! 2. The matrix turns that into linear RGB.
//! 3. Each channel is clamped to `[0, 1]`, remembering whether anything fell off either end.
//! 4. The transfer function encodes each channel.
//!
//! Step 1 is a plain black-point-relative rescaling, not a chromatic adaptation transform: the
//! built-in spaces are D65 and so is the default illuminant.

use crate::bound::clamp_unit;
use crate::color::{RGBColor, XYZColor};
use crate::consts;
use nalgebra::{Matrix3, Vector3};

/// The nonlinearity applied to clamped linear RGB.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransferFunction {
    /// No encoding at all.
    Linear,
    /// A pure power law `x^exponent`. Adobe RGB (1998) uses `256 / 563`, the inverse of its 2.19921875
    /// display gamma.
    Power(f64),
    /// The piecewise sRGB curve: linear near black, a 5/12 power elsewhere.
    SRGB,
}

impl TransferFunction {
    /// Encodes one linear channel value.
    pub fn encode(self, x: f64) -> f64 {
        match self {
            TransferFunction::Linear => x,
            TransferFunction::Power(exponent) => x.powf(exponent),
            TransferFunction::SRGB => {
                if x <= 0.0031308 {
                    x * 323.0 / 25.0
                } else {
                    (211.0 * x.powf(5.0 / 12.0) - 11.0) / 200.0
                }
            }
        }
    }
}

/// Everything needed to describe an RGB working space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBSpace {
    /// The XYZ to linear RGB matrix, row by row.
    pub matrix: [[f64; 3]; 3],
    /// The reference white `[Xw, Yw, Zw]`, in absolute units (cd/m² for the built-in spaces).
    pub white: [f64; 3],
    /// The reference black `[Xk, Yk, Zk]`, in the same units as `white`.
    pub black: [f64; 3],
    /// The encoding applied after clamping.
    pub transfer: TransferFunction,
}

impl RGBSpace {
    fn from_matrix(
        mat: Matrix3<f64>,
        white: [f64; 3],
        black: [f64; 3],
        transfer: TransferFunction,
    ) -> RGBSpace {
        let mut matrix = [[0.; 3]; 3];
        for (i, row) in matrix.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = mat[(i, j)];
            }
        }
        RGBSpace {
            matrix,
            white,
            black,
            transfer,
        }
    }

    /// The XYZ to linear RGB matrix.
    pub fn transform(&self) -> Matrix3<f64> {
        let m = &self.matrix;
        Matrix3::new(
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        )
    }

    /// Scales normalized XYZ up to the reference luminance and rescales it between the reference black
    /// and white. Normalized white `(Xw/Yw, 1, Zw/Yw)` comes out unchanged.
    pub fn adapt(&self, xyz: XYZColor) -> [f64; 3] {
        let [xw, yw, zw] = self.white;
        let [xk, yk, zk] = self.black;
        let (x, y, z) = (xyz.x * yw, xyz.y * yw, xyz.z * yw);
        [
            ((x - xk) / (xw - xk)) * (xw / yw),
            (y - yk) / (yw - yk),
            ((z - zk) / (zw - zk)) * (zw / yw),
        ]
    }

    /// Linear RGB, before any clamping.
    pub fn linear_rgb(&self, xyz: XYZColor) -> [f64; 3] {
        let [xn, yn, zn] = self.adapt(xyz);
        let rgb = self.transform() * Vector3::new(xn, yn, zn);
        [rgb[0], rgb[1], rgb[2]]
    }

    /// Maps an XYZ color into this space. See the module documentation for the steps.
    pub fn map(&self, xyz: XYZColor) -> GamutMapping {
        let linear = self.linear_rgb(xyz);
        let clamped = clamp_unit(linear);
        let transfer = self.transfer;
        GamutMapping {
            rgb: RGBColor::from(clamped.channels).map(|c| transfer.encode(c)),
            linear,
            clipped_low: clamped.clipped_low,
            clipped_high: clamped.clipped_high,
        }
    }
}

/// The outcome of mapping one XYZ color into an RGB space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamutMapping {
    /// The encoded color, every channel in `[0, 1]`.
    pub rgb: RGBColor,
    /// The linear channels before clamping.
    pub linear: [f64; 3],
    /// Whether some linear channel was below 0.
    pub clipped_low: bool,
    /// Whether some linear channel was above 1.
    pub clipped_high: bool,
}

impl GamutMapping {
    /// Whether the color had to be clamped at all.
    pub fn in_gamut(&self) -> bool {
        !self.clipped_low && !self.clipped_high
    }
}

/// The RGB working spaces a swatch can be built in.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Adobe RGB (1998), the wide-gamut space used by most print workflows.
    AdobeRGB1998,
    /// sRGB, the space of the web and of most consumer displays.
    SRGB,
    /// Any other space, described directly.
    Custom(RGBSpace),
}

impl Default for ColorSpace {
    fn default() -> ColorSpace {
        ColorSpace::AdobeRGB1998
    }
}

impl ColorSpace {
    /// The built-in spaces, in menu order.
    pub const BUILTIN: [ColorSpace; 2] = [ColorSpace::AdobeRGB1998, ColorSpace::SRGB];

    /// A human-readable name.
    pub fn name(&self) -> &'static str {
        match *self {
            ColorSpace::AdobeRGB1998 => "Adobe RGB (1998)",
            ColorSpace::SRGB => "sRGB",
            ColorSpace::Custom(_) => "Custom",
        }
    }

    /// The full description of the space.
    pub fn params(&self) -> RGBSpace {
        match *self {
            ColorSpace::AdobeRGB1998 => RGBSpace::from_matrix(
                consts::ADOBE_RGB_TRANSFORM_MAT(),
                consts::ADOBE_RGB_WHITE,
                consts::ADOBE_RGB_BLACK,
                TransferFunction::Power(256.0 / 563.0),
            ),
            ColorSpace::SRGB => RGBSpace::from_matrix(
                consts::STANDARD_RGB_TRANSFORM_MAT(),
                consts::STANDARD_RGB_WHITE,
                consts::STANDARD_RGB_BLACK,
                TransferFunction::SRGB,
            ),
            ColorSpace::Custom(space) => space,
        }
    }

    /// The reference white normalized to Y = 1, i.e. the XYZ color that maps to RGB (1, 1, 1).
    pub fn normalized_white(&self) -> XYZColor {
        let [xw, yw, zw] = self.params().white;
        XYZColor {
            x: xw / yw,
            y: 1.0,
            z: zw / yw,
        }
    }

    /// Maps an XYZ color into this space, clamping and encoding it.
    pub fn map(&self, xyz: XYZColor) -> GamutMapping {
        self.params().map(xyz)
    }
}
