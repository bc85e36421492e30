//! This file provides the constants that define the built-in RGB working spaces: the matrices that
//! take XYZ to linear RGB, and the reference display white and black points, expressed in cd/m² so
//! that the black-point compensation in [`space`](crate::space) can work in absolute terms.

use nalgebra::Matrix3;

/// XYZ to linear Adobe RGB (1998), from section 4.3.4.2 of the Adobe RGB (1998) Color Image Encoding
/// document, except that the last entry is 1.01514 rather than the published 1.01517.
#[allow(non_snake_case)]
pub fn ADOBE_RGB_TRANSFORM_MAT() -> Matrix3<f64> {
    Matrix3::new(
        02.04159,
        -0.56501,
        -0.34473,
        -0.96924,
        01.87597,
        00.04156,
        00.01344,
        -0.11836,
        01.01514,
    )
}

/// XYZ to linear sRGB, as in IEC 61966-2-1.
#[allow(non_snake_case)]
pub fn STANDARD_RGB_TRANSFORM_MAT() -> Matrix3<f64> {
    Matrix3::new(
        03.2406,
        -1.5372,
        -0.4986,
        -0.9689,
        01.8758,
        00.0415,
        00.0557,
        -0.2040,
        01.0570,
    )
}

/// Reference display white of Adobe RGB (1998): D65 at 160 cd/m².
pub const ADOBE_RGB_WHITE: [f64; 3] = [152.07, 160.00, 174.25];

/// Reference display black of Adobe RGB (1998), at 0.5557 cd/m².
pub const ADOBE_RGB_BLACK: [f64; 3] = [0.5282, 0.5557, 0.6052];

/// Reference display white of sRGB: D65 at 80 cd/m².
pub const STANDARD_RGB_WHITE: [f64; 3] = [76.04, 80.00, 87.12];

/// Reference black of sRGB: the 0.2 cd/m² of veiling glare in the reference viewing environment.
pub const STANDARD_RGB_BLACK: [f64; 3] = [0.1901, 0.2000, 0.2178];

/// How far above 1 a linear channel may go before it counts as clipped high. A space's own white
/// point lands a few parts in 10⁵ above 1 because the published constants are rounded. There is no
/// slack below 0: any negative channel is out of gamut.
pub const GAMUT_TOLERANCE: f64 = 1e-3;
