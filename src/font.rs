use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};
use tracing::warn;

/// Point size used for every table cell.
pub const FONT_SIZE: f32 = 20.0;

/// Default font file probed when no explicit font is given.
const DEFAULT_FONT_FILE: &str = "msyh.ttc";

/// Well-known locations probed for the default font file.
const SYSTEM_FONT_DIRS: [&str; 3] = [
    "C:\\Windows\\Fonts",
    "/usr/share/fonts",
    "/System/Library/Fonts",
];

/// Table text face.
///
/// Either a TrueType face loaded from disk, or `Builtin`, a degraded 5x7
/// bitmap face used when no face can be found. The builtin face covers
/// printable ASCII; any other character renders as a hollow box.
pub enum TableFont {
    Truetype(Font<'static>),
    Builtin,
}

impl TableFont {
    /// Probe `explicit`, then the default font file in the working directory,
    /// then the system font directories. A miss degrades to the builtin face
    /// with a warning; font resolution never fails a row or a run.
    pub fn resolve(explicit: Option<&Path>) -> TableFont {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        candidates.push(PathBuf::from(DEFAULT_FONT_FILE));
        for dir in SYSTEM_FONT_DIRS {
            candidates.push(Path::new(dir).join(DEFAULT_FONT_FILE));
        }

        for candidate in &candidates {
            let Ok(bytes) = std::fs::read(candidate) else {
                continue;
            };
            match Font::try_from_vec(bytes) {
                Some(font) => return TableFont::Truetype(font),
                None => warn!("'{}' is not a usable font face", candidate.display()),
            }
        }

        warn!("no table font found, using the builtin bitmap face");
        TableFont::Builtin
    }

    /// Draw one line of text at `x`, vertically centered within the row band
    /// `[row_top, row_top + row_height)`. Glyph coverage is alpha-blended onto
    /// the canvas and clipped at the image bounds.
    pub fn draw_text(
        &self,
        img: &mut RgbImage,
        x: i32,
        row_top: i32,
        row_height: u32,
        color: Rgb<u8>,
        text: &str,
    ) {
        match self {
            TableFont::Truetype(font) => {
                draw_truetype(img, font, x, row_top, row_height, color, text);
            }
            TableFont::Builtin => draw_builtin(img, x, row_top, row_height, color, text),
        }
    }
}

fn draw_truetype(
    img: &mut RgbImage,
    font: &Font<'static>,
    x: i32,
    row_top: i32,
    row_height: u32,
    color: Rgb<u8>,
    text: &str,
) {
    let scale = Scale::uniform(FONT_SIZE);
    let v_metrics = font.v_metrics(scale);
    // descent is negative; ascent - descent is the full line height.
    let line_height = v_metrics.ascent - v_metrics.descent;
    let baseline = row_top as f32 + (row_height as f32 - line_height) / 2.0 + v_metrics.ascent;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            blend_pixel(img, gx as i32 + bb.min.x, gy as i32 + bb.min.y, color, coverage);
        });
    }
}

const BUILTIN_SCALE: i32 = 2;
const BUILTIN_COLS: i32 = 5;
const BUILTIN_ROWS: i32 = 7;

fn draw_builtin(
    img: &mut RgbImage,
    x: i32,
    row_top: i32,
    row_height: u32,
    color: Rgb<u8>,
    text: &str,
) {
    let glyph_height = BUILTIN_ROWS * BUILTIN_SCALE;
    let top = row_top + (row_height as i32 - glyph_height) / 2;

    let mut caret = x;
    for ch in text.chars() {
        let columns = builtin_glyph(ch);
        for (cx, column) in columns.iter().enumerate() {
            for ry in 0..BUILTIN_ROWS {
                if column & (1 << ry) == 0 {
                    continue;
                }
                for sx in 0..BUILTIN_SCALE {
                    for sy in 0..BUILTIN_SCALE {
                        blend_pixel(
                            img,
                            caret + cx as i32 * BUILTIN_SCALE + sx,
                            top + ry * BUILTIN_SCALE + sy,
                            color,
                            1.0,
                        );
                    }
                }
            }
        }
        caret += (BUILTIN_COLS + 1) * BUILTIN_SCALE;
    }
}

fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if coverage <= 0.0 || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    let a = coverage.min(1.0);
    let inv = 1.0 - a;
    let dst = img.get_pixel_mut(x, y);
    for c in 0..3 {
        dst.0[c] = (f32::from(color.0[c]) * a + f32::from(dst.0[c]) * inv).round() as u8;
    }
}

/// Rendered for any character the builtin face has no glyph for.
const BUILTIN_BOX: [u8; 5] = [0x7F, 0x41, 0x41, 0x41, 0x7F];

/// Classic 5x7 column-major bitmap glyphs for printable ASCII (0x20..=0x7E).
/// Bit 0 of each column byte is the top row.
#[rustfmt::skip]
const BUILTIN_GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

fn builtin_glyph(ch: char) -> [u8; 5] {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        BUILTIN_GLYPHS[(code - 0x20) as usize]
    } else {
        BUILTIN_BOX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_font_degrades_to_builtin() {
        let font = TableFont::resolve(Some(Path::new("/definitely/not/here.ttf")));
        assert!(matches!(font, TableFont::Builtin));
    }

    #[test]
    fn builtin_draw_marks_pixels_inside_the_row_band() {
        let mut img = RgbImage::from_pixel(200, 40, Rgb([255, 255, 255]));
        TableFont::Builtin.draw_text(&mut img, 10, 0, 40, Rgb([0, 0, 0]), "X1");

        let dark = img.pixels().filter(|p| p.0 == [0, 0, 0]).count();
        assert!(dark > 0);
        // Glyphs are 14 px tall, centered in the 40 px band: rows 13..27.
        for x in 0..img.width() {
            for y in 0..5 {
                assert_eq!(*img.get_pixel(x, y), Rgb([255, 255, 255]));
            }
        }
    }

    #[test]
    fn non_ascii_renders_the_box_glyph() {
        let mut img = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        TableFont::Builtin.draw_text(&mut img, 4, 0, 40, Rgb([0, 0, 0]), "品");

        // The box outline puts ink in the top-left corner of the glyph cell.
        assert_eq!(*img.get_pixel(4, 13), Rgb([0, 0, 0]));
    }

    #[test]
    fn drawing_clips_at_image_bounds() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        TableFont::Builtin.draw_text(&mut img, -8, -20, 40, Rgb([0, 0, 0]), "MM");
        TableFont::Builtin.draw_text(&mut img, 8, 0, 10, Rgb([0, 0, 0]), "MM");
    }
}
