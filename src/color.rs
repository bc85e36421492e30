//! This module defines the two kinds of color values that flow through the crate: CIE 1931 XYZ
//! tristimulus values straight out of spectral integration, and RGB triples in some target working
//! space.

/// A point in the CIE 1931 XYZ color space. For absorption spectra these are normalized so that a
/// perfectly transparent sample has `y == 1`; for emission spectra they are left unnormalized and grow
/// with the emission intensity.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis, a mixture of the three cone responses.
    pub x: f64,
    /// The Y axis, luminance.
    pub y: f64,
    /// The Z axis, roughly the response of the short-wavelength cones.
    pub z: f64,
}

impl XYZColor {
    /// The components as an array `[x, y, z]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Scales every component by `factor`.
    pub fn scale(self, factor: f64) -> XYZColor {
        XYZColor {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl From<[f64; 3]> for XYZColor {
    fn from(xyz: [f64; 3]) -> XYZColor {
        XYZColor {
            x: xyz[0],
            y: xyz[1],
            z: xyz[2],
        }
    }
}

/// A color in an RGB working space, each component a float between 0 and 1 once it has been through
/// gamut clamping and the space's transfer function. Conversion to 8-bit values lives in
/// [`presenter`](crate::presenter).
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red channel.
    pub r: f64,
    /// The green channel.
    pub g: f64,
    /// The blue channel.
    pub b: f64,
}

impl RGBColor {
    /// The components as an array `[r, g, b]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Applies `f` to each channel.
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> RGBColor {
        RGBColor {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

impl From<[f64; 3]> for RGBColor {
    fn from(rgb: [f64; 3]) -> RGBColor {
        RGBColor {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }
}
