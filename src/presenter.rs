//! This file turns RGB colors into the numbers and strings a user interface shows: 8-bit channel
//! values, a labeled description, and the Euclidean distance between two colors in 0–255 space. That
//! distance is a measure of rounding error and nothing else; it is not perceptually meaningful in
//! any RGB space, and should never be used to judge how different two colors look.

use crate::color::RGBColor;

impl RGBColor {
    /// The channels multiplied by 255, without rounding.
    pub fn scaled(self) -> [f64; 3] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0]
    }

    /// The channels as 0–255 integers, rounded to nearest. This is what a swatch is made from.
    /// Channels outside `[0, 1]` saturate.
    pub fn normalized(self) -> [u8; 3] {
        let round = |x: f64| (x * 255.0).round().max(0.0).min(255.0) as u8;
        [round(self.r), round(self.g), round(self.b)]
    }

    /// A label such as `R: 255, G: 128, B: 0`.
    pub fn describe(self) -> String {
        let [r, g, b] = self.normalized();
        format!("R: {}, G: {}, B: {}", r, g, b)
    }

    /// How far rounding to 8 bits moved this color, in 0–255 units.
    pub fn rounding_error(self) -> f64 {
        let [r, g, b] = self.normalized();
        rgb_distance(self.scaled(), [f64::from(r), f64::from(g), f64::from(b)])
    }
}

/// The Euclidean distance between two RGB triples, rounded to two decimal places.
pub fn rgb_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
    (d * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(rgb_distance([255., 0., 0.], [0., 0., 0.]), 255.00);
        assert_eq!(rgb_distance([3., 4., 0.], [0., 0., 0.]), 5.0);
        assert_eq!(rgb_distance([1., 1., 1.], [0., 0., 0.]), 1.73);
        assert_eq!(rgb_distance([10., 20., 30.], [10., 20., 30.]), 0.0);
    }

    #[test]
    fn test_normalized() {
        let c = RGBColor { r: 1.0, g: 0.5, b: 0.0 };
        // 127.5 rounds away from zero
        assert_eq!(c.normalized(), [255, 128, 0]);
        assert_eq!(c.scaled(), [255.0, 127.5, 0.0]);
        assert_eq!(c.describe(), "R: 255, G: 128, B: 0");
        assert_eq!(RGBColor { r: 1.2, g: -0.1, b: 0.2 }.normalized(), [255, 0, 51]);
    }

    #[test]
    fn test_rounding_error() {
        assert_eq!(RGBColor { r: 1.0, g: 0.0, b: 1.0 }.rounding_error(), 0.0);
        assert_eq!(RGBColor { r: 1.0, g: 0.5, b: 0.0 }.rounding_error(), 0.5);
    }
}
