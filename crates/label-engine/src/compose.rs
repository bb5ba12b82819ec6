//! Image composition helpers: paste and stack label images.

use image::{GrayImage, Rgba, RgbaImage};

/// White RGBA canvas of the given size.
pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
}

/// Paste an RGBA image onto `base` at the given position, clipped to
/// the base bounds. Labels are pure black-and-white, so no blending.
pub fn paste(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx;
        let ty = y + dy;
        if tx < base.width() && ty < base.height() {
            base.put_pixel(tx, ty, *pixel);
        }
    }
}

/// Paste a grayscale image (QR glyph) onto `base` at the given position.
pub fn paste_gray(base: &mut RgbaImage, top: &GrayImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx;
        let ty = y + dy;
        if tx < base.width() && ty < base.height() {
            let v = pixel.0[0];
            base.put_pixel(tx, ty, Rgba([v, v, v, 255]));
        }
    }
}

/// Stack images vertically, left-aligned, with `gap` white pixels
/// between them. Output width is the maximum input width.
pub fn stack_vertical(images: &[RgbaImage], gap: u32) -> RgbaImage {
    if images.is_empty() {
        return blank_canvas(1, 1);
    }

    let max_width = images.iter().map(|i| i.width()).max().unwrap_or(1);
    let total_height: u32 = images.iter().map(|i| i.height()).sum::<u32>()
        + gap * (images.len() as u32 - 1);

    let mut result = blank_canvas(max_width, total_height);
    let mut y_offset = 0u32;
    for img in images {
        paste(&mut result, img, 0, y_offset);
        y_offset += img.height() + gap;
    }

    result
}
