//! PNG encoding and base64 data URLs for transport.

use crate::error::{ChartError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// `data:image/png;base64,...` for an image
pub fn png_data_url(image: &RgbImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
}

/// PNG bytes back out of a data URL produced by [`png_data_url`].
pub fn decode_png_data_url(url: &str) -> Result<Vec<u8>> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| ChartError::Transport("not a base64 PNG data URL".to_string()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| ChartError::Transport(format!("invalid base64 payload: {e}")))
}
