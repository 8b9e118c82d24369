//! Pixel type and conversions to and from the clustering working space.

use palette::{IntoColor, Lab, LinSrgb, Srgb};

use crate::config::ColorSpace;

/// An sRGB pixel with 8-bit channels.
pub type Pixel = Srgb<u8>;

/// A pixel mapped into a working color space.
pub type Point = [f32; 3];

/// Map a pixel into `space`.
pub fn to_point(pixel: Pixel, space: ColorSpace) -> Point {
    match space {
        ColorSpace::Rgb => [
            pixel.red as f32,
            pixel.green as f32,
            pixel.blue as f32,
        ],
        ColorSpace::Lab => {
            let linear: LinSrgb<f32> = pixel.into_linear();
            let lab: Lab = linear.into_color();
            [lab.l, lab.a, lab.b]
        }
    }
}

/// Map a point from `space` back to the nearest displayable pixel.
///
/// Out-of-gamut values are clamped channel-wise.
pub fn from_point(point: Point, space: ColorSpace) -> Pixel {
    match space {
        ColorSpace::Rgb => Srgb::new(
            clamp_channel(point[0]),
            clamp_channel(point[1]),
            clamp_channel(point[2]),
        ),
        ColorSpace::Lab => {
            let lab: Lab = Lab::new(point[0], point[1], point[2]);
            let linear: LinSrgb<f32> = lab.into_color();
            let rgb: Srgb<f32> = Srgb::from_linear(linear);
            Srgb::new(
                clamp_channel(rgb.red * 255.0),
                clamp_channel(rgb.green * 255.0),
                clamp_channel(rgb.blue * 255.0),
            )
        }
    }
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Upper-case `RRGGBB` string for a pixel.
pub fn to_hex(pixel: Pixel) -> String {
    format!("{:02X}{:02X}{:02X}", pixel.red, pixel.green, pixel.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_round_trip_is_exact() {
        let pixel = Srgb::new(12u8, 200, 255);
        assert_eq!(from_point(to_point(pixel, ColorSpace::Rgb), ColorSpace::Rgb), pixel);
    }

    #[test]
    fn test_lab_round_trip_primaries() {
        for pixel in [
            Srgb::new(255u8, 0, 0),
            Srgb::new(0u8, 255, 0),
            Srgb::new(0u8, 0, 255),
            Srgb::new(255u8, 255, 255),
            Srgb::new(0u8, 0, 0),
        ] {
            let back = from_point(to_point(pixel, ColorSpace::Lab), ColorSpace::Lab);
            for (a, b) in [
                (back.red, pixel.red),
                (back.green, pixel.green),
                (back.blue, pixel.blue),
            ] {
                assert!(a.abs_diff(b) <= 1, "{back:?} vs {pixel:?}");
            }
        }
    }

    #[test]
    fn test_clamping() {
        let pixel = from_point([-20.0, 300.0, 127.6], ColorSpace::Rgb);
        assert_eq!(pixel, Srgb::new(0u8, 255, 128));
        assert_eq!(from_point([f32::NAN, 0.0, 0.0], ColorSpace::Rgb).red, 0);
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(Srgb::new(255u8, 8, 171)), "FF08AB");
    }
}
