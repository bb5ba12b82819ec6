//! Convert rendered label images into a QL raster command stream.

use image::{GrayImage, imageops};
use tracing::debug;

use crate::protocol::{self, PrintOptions};
use crate::{QlError, Result, TAPE_62_PRINTABLE};

/// Conversion options for one page.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Binarization threshold as a percentage; pixels darker than
    /// `threshold%` of full white print black.
    pub threshold: f32,
    /// Rotate the image 90° before printing (landscape labels).
    pub rotate: bool,
    pub print: PrintOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            threshold: 70.0,
            rotate: true,
            print: PrintOptions::default(),
        }
    }
}

/// Convert a grayscale label image into the full command stream for one
/// page. `first_page` and `last_page` control the job preamble and the
/// final feed; a multi-label batch passes `last_page = false` for every
/// page but the last so the tape is not fed and cut between labels.
pub fn convert(
    img: &GrayImage,
    opts: &ConvertOptions,
    first_page: bool,
    last_page: bool,
) -> Result<Vec<u8>> {
    let oriented;
    let img = if opts.rotate {
        oriented = imageops::rotate90(img);
        &oriented
    } else {
        img
    };

    let (width, height) = img.dimensions();
    if width > TAPE_62_PRINTABLE {
        return Err(QlError::ImageTooWide {
            actual: width,
            max: TAPE_62_PRINTABLE,
        });
    }
    if height == 0 {
        return Err(QlError::EmptyImage);
    }

    let cutoff = ((opts.threshold / 100.0) * 255.0).clamp(0.0, 255.0) as u8;
    debug!(width, height, cutoff, "converting image to raster commands");

    let mut out = protocol::page_preamble(62, height, &opts.print, first_page);
    let mut row = vec![0u8; width as usize];
    for y in 0..height {
        for (x, px) in row.iter_mut().enumerate() {
            let luma = img.get_pixel(x as u32, y).0[0];
            *px = u8::from(luma < cutoff);
        }
        out.extend(protocol::encode_row(&row));
    }
    out.extend(protocol::end_page(last_page));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn white_image(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([255]))
    }

    #[test]
    fn portrait_image_passes_width_check() {
        let img = white_image(696, 40);
        let opts = ConvertOptions {
            rotate: false,
            ..Default::default()
        };
        let stream = convert(&img, &opts, true, true).unwrap();
        assert_eq!(*stream.last().unwrap(), 0x1a);
    }

    #[test]
    fn rotation_swaps_dimensions() {
        // 696 wide landscape label becomes 271 wide after rotation.
        let img = white_image(696, 271);
        let stream = convert(&img, &ConvertOptions::default(), true, true).unwrap();
        assert!(!stream.is_empty());
    }

    #[test]
    fn too_wide_image_is_rejected() {
        let img = white_image(800, 10);
        let opts = ConvertOptions {
            rotate: false,
            ..Default::default()
        };
        let err = convert(&img, &opts, true, true).unwrap_err();
        assert!(matches!(err, QlError::ImageTooWide { actual: 800, .. }));
    }

    #[test]
    fn raster_line_count_matches_height() {
        let img = white_image(100, 25);
        let opts = ConvertOptions {
            rotate: false,
            ..Default::default()
        };
        let stream = convert(&img, &opts, true, true).unwrap();
        let line_count = stream.windows(3).filter(|w| w == &[0x67, 0x00, 90]).count();
        assert_eq!(line_count, 25);
    }

    #[test]
    fn dark_pixels_become_set_bits() {
        let mut img = white_image(8, 1);
        img.put_pixel(0, 0, Luma([0]));
        let opts = ConvertOptions {
            rotate: false,
            ..Default::default()
        };
        let stream = convert(&img, &opts, true, true).unwrap();
        let pos = stream
            .windows(3)
            .position(|w| w == [0x67, 0x00, 90])
            .unwrap();
        let payload = &stream[pos + 3..pos + 3 + 90];
        assert!(payload.iter().any(|&b| b != 0));
    }

    #[test]
    fn threshold_controls_binarization() {
        let img = GrayImage::from_pixel(8, 1, Luma([150]));
        let base = ConvertOptions {
            rotate: false,
            ..Default::default()
        };

        // 150 < 70% of 255 (=178): prints black at the default threshold.
        let dark = convert(&img, &base, true, true).unwrap();
        let low = ConvertOptions {
            threshold: 40.0,
            ..base
        };
        // 150 >= 40% of 255 (=102): stays white at a low threshold.
        let light = convert(&img, &low, true, true).unwrap();

        let payload_of = |stream: &[u8]| {
            let pos = stream
                .windows(3)
                .position(|w| w == [0x67, 0x00, 90])
                .unwrap();
            stream[pos + 3..pos + 3 + 90].to_vec()
        };
        assert!(payload_of(&dark).iter().any(|&b| b != 0));
        assert!(payload_of(&light).iter().all(|&b| b == 0));
    }

    #[test]
    fn middle_page_has_no_final_feed() {
        let img = white_image(100, 5);
        let opts = ConvertOptions {
            rotate: false,
            print: PrintOptions {
                cut: false,
                hq: true,
            },
            ..Default::default()
        };
        let stream = convert(&img, &opts, false, false).unwrap();
        assert_eq!(*stream.last().unwrap(), 0x0c);
    }
}
