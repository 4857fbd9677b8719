//! Raster chart rendering: tinted cells with symbols, a stitch grid and a legend.

use crate::glyphs::{glyph_pixels, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::grid::LabelGrid;
use crate::legend::LegendEntry;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

/// Chart symbols, assigned to legend entries in order and reused cyclically.
pub const SYMBOLS: [char; 30] = [
    'S', 'O', 'T', '*', 'D', 'X', '+', '#', '%', '@', 'A', 'B', 'C', 'E', 'H', 'K', 'M', 'N', 'P',
    'R', 'U', 'V', 'W', 'Y', 'Z', '0', '1', '2', '3', '4',
];

const FALLBACK_SYMBOL: char = 'X';
const SWATCH: u32 = 19;
const OUTLINE: [u8; 3] = [120, 120, 120];
const TEXT_SCALE: u32 = 2;

pub fn symbol_for(position: usize) -> char {
    SYMBOLS[position % SYMBOLS.len()]
}

/// Drawing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub cell: u32,
    pub padding: u32,
    /// Fraction of the way each cell color is moved toward white
    pub tint: f32,
    pub thin_line: [u8; 3],
    pub bold_line: [u8; 3],
    /// A bold grid line every this many cells
    pub major_every: u32,
    pub legend_header: u32,
    pub legend_row: u32,
    pub title: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            cell: 20,
            padding: 30,
            tint: 0.22,
            thin_line: [200, 200, 200],
            bold_line: [140, 140, 140],
            major_every: 10,
            legend_header: 48,
            legend_row: 22,
            title: "Legend (DMC)".to_string(),
        }
    }
}

/// How one label is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAttributes {
    pub symbol: char,
    pub rgb: [u8; 3],
}

/// Label → drawing attributes, built once per chart from the ordered legend.
#[derive(Debug, Clone)]
pub struct ChartKey {
    by_label: Vec<Option<KeyAttributes>>,
}

impl ChartKey {
    pub fn new(legend: &[LegendEntry], palette_len: usize) -> Self {
        let mut by_label = vec![None; palette_len];
        for (position, entry) in legend.iter().enumerate() {
            if let Some(slot) = by_label.get_mut(entry.index) {
                *slot = Some(KeyAttributes {
                    symbol: symbol_for(position),
                    rgb: entry.rgb(),
                });
            }
        }
        Self { by_label }
    }

    pub fn get(&self, label: u16) -> Option<&KeyAttributes> {
        self.by_label.get(label as usize).and_then(Option::as_ref)
    }
}

/// Move a color toward white by `amount` (0 = unchanged, 1 = white).
pub fn tint(rgb: [u8; 3], amount: f32) -> [u8; 3] {
    rgb.map(|c| (c as f32 + (255.0 - c as f32) * amount) as u8)
}

fn legend_line(entry: &LegendEntry) -> String {
    format!("{} - {}  ({})", entry.code, entry.name, entry.count)
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale
}

/// Canvas size for a chart of `labels` with `legend`.
pub fn chart_dimensions(labels: &LabelGrid, legend: &[LegendEntry], style: &ChartStyle) -> (u32, u32) {
    let cell = style.cell.max(1);
    let grid_w = labels.width() as u32 * cell;
    let grid_h = labels.height() as u32 * cell;
    let legend_w = legend
        .iter()
        .map(|entry| 2 * 26 + text_width(&legend_line(entry), TEXT_SCALE))
        .chain(std::iter::once(text_width(&style.title, TEXT_SCALE)))
        .max()
        .unwrap_or(0);
    let width = 2 * style.padding + grid_w.max(legend_w);
    let height = 2 * style.padding + grid_h + style.legend_header + style.legend_row * legend.len() as u32;
    (width, height)
}

/// Render a chart. `legend` must be in its final order; symbols follow it.
pub fn render_chart(
    labels: &LabelGrid,
    legend: &[LegendEntry],
    palette_len: usize,
    style: &ChartStyle,
) -> RgbImage {
    let key = ChartKey::new(legend, palette_len);
    let (width, height) = chart_dimensions(labels, legend, style);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    let cell = style.cell.max(1);
    let pad = style.padding;
    let cols = labels.width() as u32;
    let rows = labels.height() as u32;

    // squares and symbols
    let symbol_scale = ((cell as f32 * 0.72 / GLYPH_HEIGHT as f32) as u32).max(1);
    for y in 0..rows {
        for x in 0..cols {
            let label = labels.labels()[(y * cols + x) as usize];
            let (rgb, symbol) = match key.get(label) {
                Some(attrs) => (attrs.rgb, attrs.symbol),
                None => ([255, 255, 255], FALLBACK_SYMBOL),
            };
            let x0 = pad + x * cell;
            let y0 = pad + y * cell;
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(x0 as i32, y0 as i32).of_size(cell, cell),
                Rgb(tint(rgb, style.tint)),
            );
            let gx = x0 + cell.saturating_sub(GLYPH_WIDTH * symbol_scale) / 2;
            let gy = y0 + cell.saturating_sub(GLYPH_HEIGHT * symbol_scale) / 2;
            draw_glyph(&mut canvas, symbol, gx, gy, symbol_scale, [0, 0, 0]);
        }
    }

    // grid
    let major = style.major_every.max(1);
    let grid_right = (pad + cols * cell) as f32;
    let grid_bottom = (pad + rows * cell) as f32;
    for gx in 0..=cols {
        let color = if gx % major == 0 { style.bold_line } else { style.thin_line };
        let line_x = (pad + gx * cell) as f32;
        draw_line_segment_mut(&mut canvas, (line_x, pad as f32), (line_x, grid_bottom), Rgb(color));
    }
    for gy in 0..=rows {
        let color = if gy % major == 0 { style.bold_line } else { style.thin_line };
        let line_y = (pad + gy * cell) as f32;
        draw_line_segment_mut(&mut canvas, (pad as f32, line_y), (grid_right, line_y), Rgb(color));
    }

    // legend
    let lx = pad;
    let ly = pad + rows * cell + 24;
    draw_text(&mut canvas, &style.title, lx, ly - 20, TEXT_SCALE, [0, 0, 0]);
    for (i, entry) in legend.iter().enumerate() {
        let yline = ly + i as u32 * style.legend_row;
        let swatch = Rect::at(lx as i32, yline as i32).of_size(SWATCH, SWATCH);
        draw_filled_rect_mut(&mut canvas, swatch, Rgb(entry.rgb()));
        draw_hollow_rect_mut(&mut canvas, swatch, Rgb(OUTLINE));

        let sbx = lx + 26;
        let symbol_box = Rect::at(sbx as i32, yline as i32).of_size(SWATCH, SWATCH);
        draw_filled_rect_mut(&mut canvas, symbol_box, Rgb([255, 255, 255]));
        draw_hollow_rect_mut(&mut canvas, symbol_box, Rgb(OUTLINE));
        draw_glyph(&mut canvas, symbol_for(i), sbx + 4, yline + 2, TEXT_SCALE, [0, 0, 0]);

        draw_text(&mut canvas, &legend_line(entry), sbx + 26, yline + 2, TEXT_SCALE, [20, 20, 20]);
    }

    canvas
}

fn draw_glyph(canvas: &mut RgbImage, ch: char, x: u32, y: u32, scale: u32, color: [u8; 3]) {
    for (col, row) in glyph_pixels(ch) {
        let rect = Rect::at((x + col * scale) as i32, (y + row * scale) as i32).of_size(scale, scale);
        draw_filled_rect_mut(canvas, rect, Rgb(color));
    }
}

fn draw_text(canvas: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: [u8; 3]) {
    let mut cursor = x;
    for ch in text.chars() {
        draw_glyph(canvas, ch, cursor, y, scale, color);
        cursor += GLYPH_ADVANCE * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, code: &str, rgb: [u8; 3], count: u32) -> LegendEntry {
        LegendEntry {
            index,
            code: code.to_string(),
            name: format!("Thread {code}"),
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            count,
        }
    }

    #[test]
    fn test_symbols_cycle() {
        assert_eq!(symbol_for(0), 'S');
        assert_eq!(symbol_for(29), '4');
        assert_eq!(symbol_for(30), 'S');
        assert_eq!(symbol_for(31), 'O');
    }

    #[test]
    fn test_tint() {
        assert_eq!(tint([0, 0, 0], 0.22), [56, 56, 56]);
        assert_eq!(tint([255, 255, 255], 0.22), [255, 255, 255]);
        assert_eq!(tint([100, 0, 200], 0.0), [100, 0, 200]);
    }

    #[test]
    fn test_key_follows_legend_order_not_palette_order() {
        let legend = vec![entry(5, "B", [255, 255, 255], 10), entry(2, "A", [0, 0, 0], 3)];
        let key = ChartKey::new(&legend, 9);
        assert_eq!(key.get(5).map(|a| a.symbol), Some('S'));
        assert_eq!(key.get(2).map(|a| a.symbol), Some('O'));
        assert_eq!(key.get(2).map(|a| a.rgb), Some([0, 0, 0]));
        assert!(key.get(0).is_none());
        assert!(key.get(100).is_none());
    }

    #[test]
    fn test_key_distinguishes_entries_with_same_rgb() {
        let legend = vec![entry(0, "A", [10, 10, 10], 2), entry(1, "B", [10, 10, 10], 1)];
        let key = ChartKey::new(&legend, 2);
        assert_ne!(key.get(0).map(|a| a.symbol), key.get(1).map(|a| a.symbol));
    }

    #[test]
    fn test_render_layout() {
        let style = ChartStyle::default();
        let labels = LabelGrid::from_rows(&vec![vec![0u16; 12]; 12]).unwrap();
        let legend = vec![entry(0, "310", [0, 0, 0], 144)];
        let chart = render_chart(&labels, &legend, 1, &style);

        let grid_px = 12 * style.cell;
        assert_eq!(
            (chart.width(), chart.height()),
            chart_dimensions(&labels, &legend, &style)
        );
        assert!(chart.width() >= 2 * style.padding + grid_px);
        assert_eq!(
            chart.height(),
            2 * style.padding + grid_px + style.legend_header + style.legend_row
        );

        let pad = style.padding;
        // cell interior, away from the centred symbol
        assert_eq!(chart.get_pixel(pad + 1, pad + 1).0, [56, 56, 56]);
        // bold line at column 0 and 10, thin line at column 1
        assert_eq!(chart.get_pixel(pad, pad + 5).0, style.bold_line);
        assert_eq!(chart.get_pixel(pad + 10 * style.cell, pad + 5).0, style.bold_line);
        assert_eq!(chart.get_pixel(pad + style.cell, pad + 5).0, style.thin_line);
        // legend swatch fill
        let ly = pad + grid_px + 24;
        assert_eq!(chart.get_pixel(pad + 5, ly + 5).0, [0, 0, 0]);
        assert_eq!(chart.get_pixel(pad, ly).0, OUTLINE);
    }

    #[test]
    fn test_canvas_grows_to_fit_legend() {
        let style = ChartStyle::default();
        let labels = LabelGrid::from_rows(&[vec![0u16]]).unwrap();
        let legend = vec![entry(0, "B5200", [255, 255, 255], 1)];
        let (width, _) = chart_dimensions(&labels, &legend, &style);
        let line = legend_line(&legend[0]);
        assert_eq!(width, 2 * style.padding + 52 + text_width(&line, TEXT_SCALE));
    }
}
