//! Pixel and label grids, stored row-major.

use crate::error::{ChartError, Result};
use image::RgbImage;

/// `height × width` sRGB pixels. Always at least 1×1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::invalid_input(format!(
                "pixel grid must be at least 1x1, got {width}x{height}"
            )));
        }
        if pixels.len() != width * height {
            return Err(ChartError::invalid_input(format!(
                "pixel buffer length {} does not match dimensions {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from rows; every row must have the same non-zero length.
    pub fn from_rows(rows: &[Vec<[u8; 3]>]) -> Result<Self> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(ChartError::invalid_input(format!(
                "row {y} has {} pixels, expected {width}",
                row.len()
            )));
        }
        let pixels = rows.iter().flatten().copied().collect();
        Self::new(width, rows.len(), pixels)
    }

    /// Build from interleaved RGB samples that are not already bytes.
    ///
    /// Every sample must be a finite whole-range value in `0.0..=255.0`; it is
    /// rounded to the nearest byte.
    pub fn from_samples(width: usize, height: usize, samples: &[f32]) -> Result<Self> {
        if samples.len() != width * height * 3 {
            return Err(ChartError::invalid_input(format!(
                "sample buffer length {} does not match dimensions {width}x{height}x3",
                samples.len()
            )));
        }
        if let Some((i, v)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 255.0)
        {
            return Err(ChartError::invalid_input(format!(
                "sample {i} is {v}, expected a finite value in 0..=255"
            )));
        }
        let pixels = samples
            .chunks_exact(3)
            .map(|c| [c[0].round() as u8, c[1].round() as u8, c[2].round() as u8])
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn from_rgb_image(image: &RgbImage) -> Result<Self> {
        let pixels = image.pixels().map(|p| p.0).collect();
        Self::new(image.width() as usize, image.height() as usize, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// One palette index per pixel, same shape as the [`PixelGrid`] it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    labels: Vec<u16>,
}

impl LabelGrid {
    pub fn new(width: usize, height: usize, labels: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 || labels.len() != width * height {
            return Err(ChartError::invalid_input(format!(
                "label buffer length {} does not fit a {width}x{height} grid",
                labels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    /// Labels produced one-per-pixel for an already validated grid.
    pub(crate) fn for_pixels(grid: &PixelGrid, labels: Vec<u16>) -> Self {
        debug_assert_eq!(labels.len(), grid.pixels().len());
        Self {
            width: grid.width(),
            height: grid.height(),
            labels,
        }
    }

    pub fn from_rows(rows: &[Vec<u16>]) -> Result<Self> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(ChartError::invalid_input("label rows have different lengths"));
        }
        Self::new(width, rows.len(), rows.concat())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[u16] {
        &self.labels
    }

    pub(crate) fn labels_mut(&mut self) -> &mut [u16] {
        &mut self.labels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y * self.width + x])
    }

    pub fn rows(&self) -> Vec<Vec<u16>> {
        self.labels
            .chunks(self.width)
            .map(|row| row.to_vec())
            .collect()
    }
}
