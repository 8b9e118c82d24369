//! Turning encoded images into pixels.
//!
//! Fetching the bytes (file, URL, upload) is up to the caller; decode
//! failures are returned, never replaced by an empty or partial palette.

use image::{DynamicImage, GenericImageView};
use palette::Srgb;

use crate::PaletteResult;
use crate::color::Pixel;

/// Decode `input` (PNG, JPEG, GIF, ...) and collect its visible pixels.
pub fn pixels_from_bytes(input: &[u8]) -> PaletteResult<Vec<Pixel>> {
    let img = image::load_from_memory(input)?;
    Ok(pixels_from_image(&img))
}

/// Opaque and partially transparent pixels of `img`, in row-major order.
///
/// Fully transparent pixels carry no visible color and are skipped.
pub fn pixels_from_image(img: &DynamicImage) -> Vec<Pixel> {
    let (w, h) = img.dimensions();
    let raw = img.to_rgba8().into_raw();

    let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
    for chunk in raw.chunks(4) {
        if chunk[3] == 0 {
            continue;
        }
        pixels.push(Srgb::new(chunk[0], chunk[1], chunk[2]));
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaletteError;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png() {
        let img = RgbaImage::from_fn(4, 3, |x, _| {
            if x < 2 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        let pixels = pixels_from_bytes(&encode_png(img)).unwrap();
        assert_eq!(pixels.len(), 12);
        assert_eq!(pixels[0], Srgb::new(255u8, 0, 0));
        assert_eq!(pixels[3], Srgb::new(0u8, 0, 255));
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let img = RgbaImage::from_fn(2, 2, |x, y| {
            if x == y { Rgba([0, 0, 0, 0]) } else { Rgba([10, 20, 30, 128]) }
        });
        let pixels = pixels_from_bytes(&encode_png(img)).unwrap();
        assert_eq!(pixels, vec![Srgb::new(10u8, 20, 30); 2]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = pixels_from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(PaletteError::Decode(_))));
    }
}
