use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::{domain::FaceRectangle, Error, Result};

/// Pixel size of one font cell.
pub const GLYPH_SCALE: i32 = 2;
pub const GLYPH_WIDTH: i32 = 3 * GLYPH_SCALE;
pub const GLYPH_HEIGHT: i32 = 5 * GLYPH_SCALE;
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + GLYPH_SCALE;

pub fn open_rgb_image(path: &Path) -> Result<RgbImage> {
    if !path.is_file() {
        return Err(Error::FileNotFound(PathBuf::from(path)));
    }
    let image = image::open(path).map_err(|e| Error::UndecodableImage { path: PathBuf::from(path), message: e.to_string() })?;
    Ok(image.to_rgb8())
}

/// Draws a 2 px outline covering `left..=left+width` and `top..=top+height`.
pub fn draw_face_box(img: &mut RgbImage, rect: &FaceRectangle, color: Rgb<u8>) {
    let width = rect.width.max(0) as u32;
    let height = rect.height.max(0) as u32;
    draw_hollow_rect_mut(img, Rect::at(rect.left, rect.top).of_size(width + 1, height + 1), color);
    if width > 1 && height > 1 {
        draw_hollow_rect_mut(img, Rect::at(rect.left + 1, rect.top + 1).of_size(width - 1, height - 1), color);
    }
}

/// Draws `text` with its bottom edge on `baseline`. Pixels outside the image are dropped.
pub fn draw_text(img: &mut RgbImage, x: i32, baseline: i32, text: &str, color: Rgb<u8>) {
    let top = baseline - GLYPH_HEIGHT;
    for (position, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let origin = x + position as i32 * GLYPH_ADVANCE;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..3 {
                if (bits >> (2 - col)) & 1 == 1 {
                    fill_cell(img, origin + col * GLYPH_SCALE, top + row as i32 * GLYPH_SCALE, color);
                }
            }
        }
    }
}

fn fill_cell(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for dy in 0..GLYPH_SCALE {
        for dx in 0..GLYPH_SCALE {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && px < w && py >= 0 && py < h {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

// 3x5 patterns, one byte per row, high bit on the left.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => return None,
    };
    Some(rows)
}
