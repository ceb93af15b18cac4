//! CPU rasterisation of indicator sprite textures.
//!
//! A sprite is a filled, anti-aliased disc in the axis colour with an
//! optional black label drawn from a small built-in bitmap font.

use crate::gfx::gizmos::LabelDesc;

/// Side of a label texture in pixels
pub const LABEL_TEXTURE_SIZE: u32 = 64;

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
const GLYPH_SCALE: usize = 3;
const GLYPH_SPACING: usize = 1;

/// Rows of a 5x7 glyph, most significant of the low five bits on the left
fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c.to_ascii_uppercase() {
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(rows)
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Rasterises `label` into tightly packed RGBA8 rows.
pub fn rasterize_label(label: &LabelDesc) -> Vec<u8> {
    let size = LABEL_TEXTURE_SIZE as usize;
    let mut pixels = vec![0u8; size * size * 4];

    let center = size as f32 * 0.5;
    let radius = label.disc_radius * size as f32;
    let rgb = label.color.map(to_byte);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let i = (y * size + x) * 4;
                pixels[i..i + 3].copy_from_slice(&rgb);
                pixels[i + 3] = to_byte(coverage);
            }
        }
    }

    if let Some(text) = &label.text {
        draw_text(&mut pixels, size, text);
    }

    pixels
}

fn draw_text(pixels: &mut [u8], size: usize, text: &str) {
    let glyphs: Vec<[u8; GLYPH_HEIGHT]> = text
        .chars()
        .filter_map(|c| {
            let rows = glyph(c);
            if rows.is_none() {
                log::warn!("No glyph for '{}' in indicator label", c);
            }
            rows
        })
        .collect();
    if glyphs.is_empty() {
        return;
    }

    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * GLYPH_SCALE;
    let text_width = glyphs.len() * advance - GLYPH_SPACING * GLYPH_SCALE;
    let text_height = GLYPH_HEIGHT * GLYPH_SCALE;
    let left = size.saturating_sub(text_width) / 2;
    let top = size.saturating_sub(text_height) / 2;

    for (n, rows) in glyphs.iter().enumerate() {
        let origin_x = left + n * advance;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if (*bits >> (GLYPH_WIDTH - 1 - column)) & 1 == 0 {
                    continue;
                }
                for sy in 0..GLYPH_SCALE {
                    for sx in 0..GLYPH_SCALE {
                        let x = origin_x + column * GLYPH_SCALE + sx;
                        let y = top + row * GLYPH_SCALE + sy;
                        if x < size && y < size {
                            let i = (y * size + x) * 4;
                            pixels[i..i + 4].copy_from_slice(&[0, 0, 0, 255]);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixels: &[u8], x: usize, y: usize) -> [u8; 4] {
        let i = (y * LABEL_TEXTURE_SIZE as usize + x) * 4;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    fn label(text: Option<&str>, disc_radius: f32) -> LabelDesc {
        LabelDesc {
            text: text.map(str::to_string),
            color: [1.0, 0.0, 0.0],
            disc_radius,
        }
    }

    #[test]
    fn test_disc_without_text() {
        let pixels = rasterize_label(&label(None, 0.25));
        assert_eq!(pixels.len(), 64 * 64 * 4);
        assert_eq!(pixel(&pixels, 32, 32), [255, 0, 0, 255]);
        // Outside the 16px disc
        assert_eq!(pixel(&pixels, 32, 10)[3], 0);
        assert_eq!(pixel(&pixels, 0, 0)[3], 0);
    }

    #[test]
    fn test_text_is_drawn_in_black() {
        let pixels = rasterize_label(&label(Some("X"), 0.25));
        // Top-left stroke of the X: glyph starts at (24, 21)
        assert_eq!(pixel(&pixels, 26, 22), [0, 0, 0, 255]);
        // Centre of the X is a stroke as well
        assert_eq!(pixel(&pixels, 32, 31), [0, 0, 0, 255]);
    }

    #[test]
    fn test_unknown_glyphs_are_skipped() {
        let with_unknown = rasterize_label(&label(Some("?"), 0.45));
        let plain = rasterize_label(&label(None, 0.45));
        assert_eq!(with_unknown, plain);
    }
}
