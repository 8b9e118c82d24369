//! Palette extraction regression test
//!
//! Reproducibility and sensitivity of the extracted palette to seed, model
//! and source image, plus the sizing edge cases.

use palette::Srgb;
use palette_extract::{
    ColorSpace, ExtractConfig, ModelKind, PaletteError, Pixel, extract, extract_palette,
    extract_palette_bytes,
};

fn solid(len: usize, color: Pixel) -> Vec<Pixel> {
    vec![color; len]
}

/// Smooth two-axis gradient with a blue ramp, `w * h` pixels.
fn create_color_gradient(w: u32, h: u32) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let r = ((x * 255) / w.max(1)) as u8;
            let g = ((y * 255) / h.max(1)) as u8;
            let b = (128u32.wrapping_add((x + y) * 64 / (w + h).max(1))) as u8;
            pixels.push(Srgb::new(r, g, b));
        }
    }
    pixels
}

/// Mostly dark blues with a few warm highlights.
fn create_night_scene(w: u32, h: u32) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let pixel = if (x * 7 + y * 3) % 23 == 0 {
                Srgb::new(250, 180 + (x % 40) as u8, 40)
            } else {
                Srgb::new((x % 30) as u8, (y % 50) as u8, 90 + ((x + y) % 100) as u8)
            };
            pixels.push(pixel);
        }
    }
    pixels
}

#[test]
fn extract_is_deterministic() {
    let pixels = create_color_gradient(64, 64);
    for model in ModelKind::ALL {
        let config = ExtractConfig::new(500, 6, model, 7);
        let first = extract(&pixels, &config).unwrap();
        let second = extract(&pixels, &config).unwrap();
        assert_eq!(first, second, "{model}");
    }
}

#[test]
fn extract_palette_size_respected() {
    let pixels = create_color_gradient(64, 64);
    for model in ModelKind::ALL {
        for k in [1, 2, 5, 15] {
            let palette = extract_palette(&pixels, 500, k, model, 42).unwrap();
            assert_eq!(palette.len(), k, "{model} k={k}");
        }
    }
}

#[test]
fn extract_seed_changes_palette() {
    let pixels = create_color_gradient(64, 64);
    let a = extract_palette(&pixels, 500, 5, ModelKind::KMeans, 1).unwrap();
    let b = extract_palette(&pixels, 500, 5, ModelKind::KMeans, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn extract_model_changes_palette() {
    let pixels = create_color_gradient(64, 64);
    let palettes: Vec<Vec<Pixel>> = ModelKind::ALL
        .into_iter()
        .map(|model| extract_palette(&pixels, 500, 5, model, 42).unwrap())
        .collect();

    // Consecutive entries in the picker order must disagree.
    for pair in palettes.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn extract_image_changes_palette() {
    let day = create_color_gradient(64, 64);
    let night = create_night_scene(64, 64);
    let a = extract_palette(&day, 500, 5, ModelKind::KMeans, 42).unwrap();
    let b = extract_palette(&night, 500, 5, ModelKind::KMeans, 42).unwrap();
    assert_ne!(a, b);
}

#[test]
fn extract_rejects_zero_sizes() {
    let pixels = create_color_gradient(8, 8);
    assert!(matches!(
        extract_palette(&pixels, 0, 3, ModelKind::KMeans, 42),
        Err(PaletteError::InvalidInput(_))
    ));
    assert!(matches!(
        extract_palette(&pixels, 500, 0, ModelKind::KMeans, 42),
        Err(PaletteError::InvalidInput(_))
    ));
    assert!(matches!(
        extract_palette(&[], 500, 3, ModelKind::KMeans, 42),
        Err(PaletteError::InvalidInput(_))
    ));
}

#[test]
fn extract_solid_red() {
    let pixels = solid(10_000, Srgb::new(255, 0, 0));
    let palette = extract_palette(&pixels, 500, 3, ModelKind::KMeans, 42).unwrap();
    assert_eq!(palette.len(), 3);
    for color in palette {
        assert!(color.red >= 254, "{color:?}");
        assert!(color.green <= 1 && color.blue <= 1, "{color:?}");
    }
}

#[test]
fn extract_solid_red_every_model() {
    let pixels = solid(1_000, Srgb::new(255, 0, 0));
    for model in ModelKind::ALL {
        let palette = extract_palette(&pixels, 500, 3, model, 42).unwrap();
        assert_eq!(palette, vec![Srgb::new(255, 0, 0); 3], "{model}");
    }
}

#[test]
fn extract_sample_size_clamped() {
    let pixels = create_color_gradient(10, 10);
    let clamped = extract_palette(&pixels, 1_000_000, 4, ModelKind::KMeans, 42).unwrap();
    let exact = extract_palette(&pixels, 100, 4, ModelKind::KMeans, 42).unwrap();
    assert_eq!(clamped.len(), 4);
    // Both runs cluster every pixel with the same RNG stream.
    assert_eq!(clamped, exact);
}

#[test]
fn extract_lab_space() {
    let mut pixels = solid(300, Srgb::new(0, 128, 0));
    pixels.extend(solid(300, Srgb::new(255, 255, 0)));
    let config = ExtractConfig::new(600, 2, ModelKind::KMeans, 3).with_color_space(ColorSpace::Lab);
    let mut palette = extract(&pixels, &config).unwrap();
    palette.sort_by_key(|p| p.red);

    let expected = [Srgb::new(0u8, 128, 0), Srgb::new(255u8, 255, 0)];
    for (got, want) in palette.iter().zip(expected) {
        assert!(got.red.abs_diff(want.red) <= 1, "{got:?}");
        assert!(got.green.abs_diff(want.green) <= 1, "{got:?}");
        assert!(got.blue.abs_diff(want.blue) <= 1, "{got:?}");
    }
}

#[test]
fn extract_bytes_surfaces_decode_errors() {
    let result = extract_palette_bytes(b"\x89PNG but truncated", &ExtractConfig::default());
    assert!(matches!(result, Err(PaletteError::Decode(_))));
}
