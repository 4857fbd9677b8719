//! 5×7 bitmap glyphs for chart symbols and legend text.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance per character, in glyph pixels (one column of spacing).
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of the glyph for `ch`, top to bottom. Lowercase letters use the
/// uppercase form. `None` for characters without a glyph.
pub fn glyph(ch: char) -> Option<[&'static str; 7]> {
    let glyph = match ch.to_ascii_uppercase() {
        'A' => [
            "01110", "10001", "10001", "11111", "10001", "10001", "10001",
        ],
        'B' => [
            "11110", "10001", "10001", "11110", "10001", "10001", "11110",
        ],
        'C' => [
            "01111", "10000", "10000", "10000", "10000", "10000", "01111",
        ],
        'D' => [
            "11110", "10001", "10001", "10001", "10001", "10001", "11110",
        ],
        'E' => [
            "11111", "10000", "10000", "11110", "10000", "10000", "11111",
        ],
        'F' => [
            "11111", "10000", "10000", "11110", "10000", "10000", "10000",
        ],
        'G' => [
            "01111", "10000", "10000", "10011", "10001", "10001", "01111",
        ],
        'H' => [
            "10001", "10001", "10001", "11111", "10001", "10001", "10001",
        ],
        'I' => [
            "01110", "00100", "00100", "00100", "00100", "00100", "01110",
        ],
        'J' => [
            "00111", "00010", "00010", "00010", "00010", "10010", "01100",
        ],
        'K' => [
            "10001", "10010", "10100", "11000", "10100", "10010", "10001",
        ],
        'L' => [
            "10000", "10000", "10000", "10000", "10000", "10000", "11111",
        ],
        'M' => [
            "10001", "11011", "10101", "10101", "10001", "10001", "10001",
        ],
        'N' => [
            "10001", "11001", "10101", "10011", "10001", "10001", "10001",
        ],
        'O' => [
            "01110", "10001", "10001", "10001", "10001", "10001", "01110",
        ],
        'P' => [
            "11110", "10001", "10001", "11110", "10000", "10000", "10000",
        ],
        'Q' => [
            "01110", "10001", "10001", "10001", "10101", "10010", "01101",
        ],
        'R' => [
            "11110", "10001", "10001", "11110", "10100", "10010", "10001",
        ],
        'S' => [
            "01111", "10000", "10000", "01110", "00001", "00001", "11110",
        ],
        'T' => [
            "11111", "00100", "00100", "00100", "00100", "00100", "00100",
        ],
        'U' => [
            "10001", "10001", "10001", "10001", "10001", "10001", "01110",
        ],
        'V' => [
            "10001", "10001", "10001", "10001", "10001", "01010", "00100",
        ],
        'W' => [
            "10001", "10001", "10001", "10101", "10101", "10101", "01010",
        ],
        'X' => [
            "10001", "10001", "01010", "00100", "01010", "10001", "10001",
        ],
        'Y' => [
            "10001", "10001", "01010", "00100", "00100", "00100", "00100",
        ],
        'Z' => [
            "11111", "00001", "00010", "00100", "01000", "10000", "11111",
        ],
        '0' => [
            "01110", "10001", "10011", "10101", "11001", "10001", "01110",
        ],
        '1' => [
            "00100", "01100", "00100", "00100", "00100", "00100", "01110",
        ],
        '2' => [
            "01110", "10001", "00001", "00010", "00100", "01000", "11111",
        ],
        '3' => [
            "11110", "00001", "00001", "01110", "00001", "00001", "11110",
        ],
        '4' => [
            "00010", "00110", "01010", "10010", "11111", "00010", "00010",
        ],
        '5' => [
            "11111", "10000", "11110", "00001", "00001", "10001", "01110",
        ],
        '6' => [
            "00110", "01000", "10000", "11110", "10001", "10001", "01110",
        ],
        '7' => [
            "11111", "00001", "00010", "00100", "01000", "01000", "01000",
        ],
        '8' => [
            "01110", "10001", "10001", "01110", "10001", "10001", "01110",
        ],
        '9' => [
            "01110", "10001", "10001", "01111", "00001", "00010", "01100",
        ],
        '*' => [
            "00100", "10101", "01110", "11111", "01110", "10101", "00100",
        ],
        '+' => [
            "00100", "00100", "00100", "11111", "00100", "00100", "00100",
        ],
        '#' => [
            "01010", "11111", "01010", "01010", "11111", "01010", "01010",
        ],
        '%' => [
            "11001", "11010", "00100", "01000", "10110", "00110", "00000",
        ],
        '@' => [
            "01110", "10001", "10111", "10101", "10111", "10000", "01110",
        ],
        '-' => [
            "00000", "00000", "00000", "11111", "00000", "00000", "00000",
        ],
        '(' => [
            "00010", "00100", "01000", "01000", "01000", "00100", "00010",
        ],
        ')' => [
            "01000", "00100", "00010", "00010", "00010", "00100", "01000",
        ],
        '.' => [
            "00000", "00000", "00000", "00000", "00000", "01100", "01100",
        ],
        ',' => [
            "00000", "00000", "00000", "00000", "01100", "00100", "01000",
        ],
        '/' => [
            "00001", "00001", "00010", "00100", "01000", "10000", "10000",
        ],
        '\'' => [
            "00100", "00100", "01000", "00000", "00000", "00000", "00000",
        ],
        _ => return None,
    };

    Some(glyph)
}

/// Set pixels of a glyph as `(col, row)` offsets inside the 5×7 cell.
pub fn glyph_pixels(ch: char) -> impl Iterator<Item = (u32, u32)> {
    glyph(ch).into_iter().flat_map(|rows| {
        rows.into_iter().enumerate().flat_map(|(row, bits)| {
            bits.bytes()
                .enumerate()
                .filter(|(_, bit)| *bit == b'1')
                .map(move |(col, _)| (col as u32, row as u32))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_shapes_are_5x7() {
        let chars = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789*+#%@-().,/'";
        for ch in chars.chars() {
            let rows = glyph(ch).unwrap_or_else(|| panic!("missing glyph for {ch:?}"));
            for row in rows {
                assert_eq!(row.len(), GLYPH_WIDTH as usize, "bad row in {ch:?}");
                assert!(row.bytes().all(|b| b == b'0' || b == b'1'));
            }
        }
    }

    #[test]
    fn test_lowercase_and_unknown() {
        assert_eq!(glyph('k'), glyph('K'));
        assert!(glyph(' ').is_none());
        assert!(glyph('~').is_none());
        assert_eq!(glyph_pixels(' ').count(), 0);
    }

    #[test]
    fn test_plus_pixels() {
        let pixels: Vec<(u32, u32)> = glyph_pixels('+').collect();
        assert_eq!(pixels.len(), 11);
        assert!(pixels.contains(&(2, 0)));
        assert!(pixels.contains(&(0, 3)));
        assert!(!pixels.contains(&(0, 0)));
    }
}
