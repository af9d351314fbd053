//! Text rendering
//!
//! The simulation only ever writes a ball counter and a title card, so the
//! built-in font is a 3x5 glyph set: digits, uppercase letters, and space.
//! Anything else advances the cursor without drawing.

use crate::framebuffer::FrameBuffer;

/// Draws ASCII strings into a framebuffer
pub trait TextRenderer {
    fn draw_string(&mut self, buffer: &mut FrameBuffer, x: i32, y: i32, text: &str);
}

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
/// Horizontal advance per character (glyph plus one column gap)
const ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, top first; bit 2 is the left column
type Glyph = [u8; GLYPH_HEIGHT as usize];

const DIGITS: [Glyph; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

const LETTERS: [Glyph; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch.to_ascii_uppercase() {
        c @ '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        c @ 'A'..='Z' => Some(&LETTERS[c as usize - 'A' as usize]),
        _ => None,
    }
}

/// Built-in 3x5 font
#[derive(Debug, Default, Clone, Copy)]
pub struct MiniFont;

impl MiniFont {
    /// Pixel width of `text` when drawn
    pub fn text_width(text: &str) -> i32 {
        match text.chars().count() as i32 {
            0 => 0,
            n => n * ADVANCE - 1,
        }
    }
}

impl TextRenderer for MiniFont {
    fn draw_string(&mut self, buffer: &mut FrameBuffer, x: i32, y: i32, text: &str) {
        let mut cursor = x;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (dy, bits) in rows.iter().enumerate() {
                    for dx in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                            buffer.set_pixel(cursor + dx, y + dy as i32, true);
                        }
                    }
                }
            }
            cursor += ADVANCE;
        }
    }
}
