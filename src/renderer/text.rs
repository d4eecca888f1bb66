//! 5x7 bitmap text for status messages
//!
//! Glyphs are five column bytes, bit 0 at the top. Each character is
//! streamed as a 5x8 cell and the pen advances six pixels.

use crate::Color;
use crate::geom::{Region, Vec2};
use crate::platform::DisplaySink;

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 8;
pub const GLYPH_ADVANCE: i32 = 6;

/// Column data for the supported characters; anything else is blank
fn glyph(c: char) -> [u8; 5] {
    match c {
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        'V' => [0x1F, 0x20, 0x40, 0x20, 0x1F],
        'W' => [0x3F, 0x40, 0x38, 0x40, 0x3F],
        'Y' => [0x07, 0x08, 0x70, 0x08, 0x07],
        'c' => [0x38, 0x44, 0x44, 0x44, 0x20],
        'e' => [0x38, 0x54, 0x54, 0x54, 0x18],
        'o' => [0x38, 0x44, 0x44, 0x44, 0x38],
        'r' => [0x7C, 0x08, 0x04, 0x04, 0x08],
        _ => [0; 5],
    }
}

/// Draw one character cell with its top-left corner at `origin`
pub fn draw_char<D: DisplaySink + ?Sized>(
    display: &mut D,
    origin: Vec2,
    c: char,
    fg: Color,
    bg: Color,
) {
    let columns = glyph(c);
    display.set_draw_area(Region::new(
        origin,
        origin + Vec2::new(GLYPH_WIDTH - 1, GLYPH_HEIGHT - 1),
    ));
    for row in 0..GLYPH_HEIGHT {
        for col in columns {
            let lit = col & (1 << row) != 0;
            display.write_color(if lit { fg } else { bg });
        }
    }
}

/// Draw `text` left to right starting at `origin`, skipping cells that
/// would leave `screen`
pub fn draw_string<D: DisplaySink + ?Sized>(
    display: &mut D,
    screen: &Region,
    origin: Vec2,
    text: &str,
    fg: Color,
    bg: Color,
) {
    let mut pen = origin;
    for c in text.chars() {
        let cell = Region::new(pen, pen + Vec2::new(GLYPH_WIDTH - 1, GLYPH_HEIGHT - 1));
        if screen.contains(cell.top_left) && screen.contains(cell.bottom_right) {
            draw_char(display, pen, c, fg, bg);
        }
        pen.x += GLYPH_ADVANCE;
    }
}

/// Format `prefix` followed by `value` into `buf` without allocating
pub fn format_count<'a>(buf: &'a mut [u8; 16], prefix: &str, value: u32) -> &'a str {
    let mut digits = [0u8; 10];
    let mut n = value;
    let mut len = 0;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    let prefix = &prefix.as_bytes()[..prefix.len().min(buf.len() - len)];
    buf[..prefix.len()].copy_from_slice(prefix);
    for i in 0..len {
        buf[prefix.len() + i] = digits[len - 1 - i];
    }
    // A truncated prefix may end mid-character
    std::str::from_utf8(&buf[..prefix.len() + len]).unwrap_or("")
}
