//! sRGB to CIE L*a*b* (D65) conversion.
//!
//! The scalar [`rgb_to_lab`] is the reference. [`rgb_to_lab_batch`] converts a
//! whole pixel buffer using a lookup table for the gamma expansion and gives
//! the same numbers.

use palette::{white_point::D65, Lab};

/// Lab color with the D65 white point, as used throughout the crate
pub type LabColor = Lab<D65, f32>;

const XN: f64 = 95.047;
const YN: f64 = 100.0;
const ZN: f64 = 108.883;

const DELTA: f64 = 6.0 / 29.0;

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Undo the sRGB transfer curve for a channel in `[0, 1]`.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn linear_to_lab(r: f64, g: f64, b: f64) -> LabColor {
    let m = &SRGB_TO_XYZ;
    let x = (m[0][0] * r + m[0][1] * g + m[0][2] * b) * 100.0;
    let y = (m[1][0] * r + m[1][1] * g + m[1][2] * b) * 100.0;
    let z = (m[2][0] * r + m[2][1] * g + m[2][2] * b) * 100.0;

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    Lab::new(
        (116.0 * fy - 16.0) as f32,
        (500.0 * (fx - fy)) as f32,
        (200.0 * (fy - fz)) as f32,
    )
}

/// Convert one sRGB byte triple to Lab.
pub fn rgb_to_lab(rgb: [u8; 3]) -> LabColor {
    let [r, g, b] = rgb.map(|c| srgb_to_linear(c as f64 / 255.0));
    linear_to_lab(r, g, b)
}

/// Convert a buffer of sRGB triples to Lab, one output per input.
pub fn rgb_to_lab_batch(pixels: &[[u8; 3]]) -> Vec<LabColor> {
    let mut linear = [0.0f64; 256];
    for (i, slot) in linear.iter_mut().enumerate() {
        *slot = srgb_to_linear(i as f64 / 255.0);
    }

    pixels
        .iter()
        .map(|p| {
            linear_to_lab(
                linear[p[0] as usize],
                linear[p[1] as usize],
                linear[p[2] as usize],
            )
        })
        .collect()
}

/// Squared CIE76 color difference. Only used for ranking, so no square root.
#[inline]
pub fn delta_e76_squared(a: LabColor, b: LabColor) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    dl * dl + da * da + db * db
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::{FromColor, Srgb};

    fn assert_lab_close(actual: LabColor, expected: (f32, f32, f32), tolerance: f32) {
        assert!(
            (actual.l - expected.0).abs() <= tolerance
                && (actual.a - expected.1).abs() <= tolerance
                && (actual.b - expected.2).abs() <= tolerance,
            "got ({}, {}, {}), expected {:?}",
            actual.l,
            actual.a,
            actual.b,
            expected
        );
    }

    #[test]
    fn test_reference_points() {
        assert_lab_close(rgb_to_lab([0, 0, 0]), (0.0, 0.0, 0.0), 1e-3);
        assert_lab_close(rgb_to_lab([255, 255, 255]), (100.0, 0.0, 0.0), 1e-2);
        // Well known CIE Lab value for pure sRGB red
        assert_lab_close(rgb_to_lab([255, 0, 0]), (53.24, 80.09, 67.20), 0.05);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let mut pixels = Vec::new();
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(17) {
                    pixels.push([r as u8, g as u8, b as u8]);
                }
            }
        }
        pixels.push([10, 10, 10]); // below the linear-segment threshold

        let batch = rgb_to_lab_batch(&pixels);
        assert_eq!(batch.len(), pixels.len());
        for (pixel, lab) in pixels.iter().zip(batch.iter()) {
            let scalar = rgb_to_lab(*pixel);
            assert_lab_close(*lab, (scalar.l, scalar.a, scalar.b), 1e-3);
        }
    }

    #[test]
    fn test_agrees_with_palette_crate() {
        for rgb in [[199, 43, 59], [38, 150, 182], [158, 207, 52], [66, 66, 66]] {
            let srgb = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format::<f32>();
            let reference: LabColor = Lab::from_color(srgb);
            assert_lab_close(rgb_to_lab(rgb), (reference.l, reference.a, reference.b), 0.05);
        }
    }

    #[test]
    fn test_delta_e76_squared() {
        let a = Lab::new(50.0, 10.0, -10.0);
        let b = Lab::new(53.0, 14.0, -10.0);
        assert!((delta_e76_squared(a, b) - 25.0).abs() < 1e-4);
        assert_eq!(delta_e76_squared(a, a), 0.0);
    }
}
