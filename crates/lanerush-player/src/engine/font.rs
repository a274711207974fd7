//! Built-in 5×7 bitmap font, scaled by an integer factor
//!
//! Lowercase letters render as uppercase; characters without a glyph
//! render as blanks of the same advance.

use super::FrameBuffer;

const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;
/// Gap between characters, in unscaled pixels
const SPACING: i32 = 1;
/// Gap between lines, in unscaled pixels
const LEADING: i32 = 2;

/// Rows top to bottom; bit 4 is the leftmost column
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        _ => [0; 7],
    }
}

/// Width in pixels of `text` drawn at `scale`
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_W + SPACING) - SPACING) * scale
}

/// Glyph height in pixels at `scale`
pub fn text_height(scale: i32) -> i32 {
    GLYPH_H * scale
}

/// Distance between baselines of consecutive lines
pub fn line_height(scale: i32) -> i32 {
    (GLYPH_H + LEADING) * scale
}

/// Draw `text` with its top-left corner at (x, y)
pub fn draw_text(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let advance = (GLYPH_W + SPACING) * scale;
    for (i, ch) in text.chars().enumerate() {
        let gx = x + i as i32 * advance;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (0x10 >> col) != 0 {
                    fb.fill_rect(gx + col * scale, y + row as i32 * scale, scale, scale, color);
                }
            }
        }
    }
}

/// Draw `text` centered on (cx, cy)
pub fn draw_text_centered(fb: &mut FrameBuffer, cx: i32, cy: i32, text: &str, scale: i32, color: u32) {
    let x = cx - text_width(text, scale) / 2;
    let y = cy - text_height(scale) / 2;
    draw_text(fb, x, y, text, scale, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounts_for_spacing_and_scale() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 1), 11);
        assert_eq!(text_width("AB", 3), 33);
    }

    #[test]
    fn hud_and_menu_text_have_glyphs() {
        for ch in "Time: 0123456789 Level Completed START NEW GAME EXIT".chars() {
            if ch != ' ' {
                assert_ne!(glyph(ch), [0; 7], "no glyph for {:?}", ch);
            }
        }
        assert_eq!(glyph('e'), glyph('E'));
    }

    #[test]
    fn drawing_stays_inside_text_box() {
        let mut fb = FrameBuffer::new(64, 32);
        draw_text(&mut fb, 4, 4, "HI", 2, 0xFFFFFFFF);

        let lit: Vec<(i32, i32)> = (0..32)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y) == Some(0xFFFFFFFF))
            .collect();
        assert!(!lit.is_empty());
        let w = text_width("HI", 2);
        assert!(lit.iter().all(|&(x, y)| x >= 4 && x < 4 + w && y >= 4 && y < 4 + 14));
    }

    #[test]
    fn clipped_text_does_not_panic() {
        let mut fb = FrameBuffer::new(16, 16);
        draw_text(&mut fb, -20, -5, "CLIPPED", 3, 0xFFFF0000);
        draw_text_centered(&mut fb, 15, 15, "OFF EDGE", 4, 0xFFFF0000);
    }
}
