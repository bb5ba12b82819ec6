//! Preview image helpers: stacked label sheets and PNG encoding.

use image::RgbaImage;
use std::io::Cursor;

use crate::Result;
use crate::compose::stack_vertical;

/// Vertical gap between labels in a stacked preview sheet.
const PREVIEW_GAP: u32 = 20;

/// Stack rendered labels into one preview sheet.
pub fn preview_sheet(labels: &[RgbaImage]) -> RgbaImage {
    stack_vertical(labels, PREVIEW_GAP)
}

/// Encode a label image as PNG bytes (for the web preview endpoint).
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::blank_canvas;

    #[test]
    fn sheet_height_includes_gaps() {
        let labels = vec![blank_canvas(696, 271), blank_canvas(696, 271)];
        let sheet = preview_sheet(&labels);
        assert_eq!(sheet.height(), 271 * 2 + PREVIEW_GAP);
        assert_eq!(sheet.width(), 696);
    }

    #[test]
    fn png_bytes_start_with_signature() {
        let img = blank_canvas(10, 10);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
