//! Image acquisition: decode, drop alpha onto white, bound the size.

use crate::error::{ChartError, Result};
use image::{imageops::FilterType, Rgb, RgbImage, RgbaImage};

/// Smallest accepted value for the longest-side limit
pub const MIN_MAX_SIZE: u32 = 16;
/// Largest accepted value for the longest-side limit
pub const MAX_MAX_SIZE: u32 = 600;

/// Decode image bytes (PNG, JPEG, ...) into opaque RGB over a white background.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(ChartError::invalid_input("decoded image has zero area"));
    }
    Ok(flatten_onto_white(&img.to_rgba8()))
}

/// Alpha blend with white background
pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        let blend = |c: u8| (c as f32 * a + 255.0 * (1.0 - a)).round() as u8;
        Rgb([blend(p[0]), blend(p[1]), blend(p[2])])
    })
}

pub fn clamp_max_size(max_size: u32) -> u32 {
    max_size.clamp(MIN_MAX_SIZE, MAX_MAX_SIZE)
}

/// Shrink so the longest side is at most `clamp_max_size(max_size)`, keeping
/// the aspect ratio. Nearest-neighbour keeps colors crisp. Smaller images are
/// returned unchanged.
pub fn resize_keep_ratio(img: &RgbImage, max_size: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let max_size = clamp_max_size(max_size);
    if w.max(h) <= max_size {
        return img.clone();
    }
    let scale = w.max(h) as f32 / max_size as f32;
    let new_w = (w as f32 / scale).round().max(1.0) as u32;
    let new_h = (h as f32 / scale).round().max(1.0) as u32;
    image::imageops::resize(img, new_w, new_h, FilterType::Nearest)
}
