//! Single-product label composition: text on the left, QR on the right.

use ab_glyph::{Font, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use crate::compose::{blank_canvas, paste_gray};
use crate::fit::{FitResult, TextBox, fit_text};
use crate::measure::{Measurer, ScaledFont};
use crate::qr::generate_qr;
use crate::{DEFAULT_QR_SIZE, LABEL_HEIGHT, LABEL_WIDTH, Result, SINGLE_LABEL_SIZES};

/// Extra pixels between wrapped lines on a single label.
const LINE_SPACING: u32 = 12;

/// Maximum wrapped lines on a single label.
const MAX_LINES: usize = 3;

/// Geometry of one label render. Immutable per render call.
#[derive(Debug, Clone, Copy)]
pub struct LabelSpec {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// QR glyph edge length in pixels.
    pub qr_size: u32,
    /// Left margin before the text block.
    pub margin: u32,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            width: LABEL_WIDTH,
            height: LABEL_HEIGHT,
            qr_size: DEFAULT_QR_SIZE,
            margin: 10,
        }
    }
}

/// Render a product label: QR code at a fixed offset on the right,
/// wrapped product text vertically centered in the remaining width.
///
/// `sizes` overrides the default font-size ladder; a single-element
/// slice pins the size (the `--font-size` flag). Never fails on long
/// text; the layout degrades to overflow instead.
pub fn render_label(
    font: &impl Font,
    text: &str,
    spec: &LabelSpec,
    sizes: Option<&[f32]>,
) -> Result<RgbaImage> {
    let mut img = blank_canvas(spec.width, spec.height);

    // QR keeps a fixed size, clamped to the label height. A zero size
    // drops the glyph and gives the whole width to the text.
    let qr_size = spec.qr_size.min(spec.height.saturating_sub(20));
    let qr_x = if qr_size > 0 {
        let qr = generate_qr(text, qr_size)?;
        let qr_x = spec.width.saturating_sub(qr_size + 10);
        let qr_y = (spec.height - qr_size) / 2;
        paste_gray(&mut img, &qr, qr_x, qr_y);
        qr_x
    } else {
        spec.width
    };

    let bounds = TextBox {
        width: qr_x.saturating_sub(spec.margin + 15),
        height: spec.height,
        max_lines: MAX_LINES,
        line_spacing: LINE_SPACING,
    };
    let sizes = sizes.unwrap_or(&SINGLE_LABEL_SIZES);
    let fit = fit_text(|s| ScaledFont::new(font, s), sizes, text, &bounds);

    if !fit.fits {
        debug!(text, size = fit.chosen_size, "text overflows label, rendering anyway");
    }

    draw_lines(&mut img, font, &fit, spec.margin as i32, spec.height);
    Ok(img)
}

/// Draw wrapped lines vertically centered, left-aligned at `x`.
fn draw_lines(img: &mut RgbaImage, font: &impl Font, fit: &FitResult, x: i32, canvas_height: u32) {
    let scale = PxScale::from(fit.chosen_size);
    let line_height = ScaledFont::new(font, fit.chosen_size).line_height() + LINE_SPACING;
    let total_height = fit.lines.len() as u32 * line_height;
    let y0 = canvas_height.saturating_sub(total_height) as i32 / 2;

    for (i, line) in fit.lines.iter().enumerate() {
        let y = y0 + i as i32 * line_height as i32;
        draw_text_mut(img, Rgba([0, 0, 0, 255]), x, y, scale, font, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_defaults_match_62mm_tape() {
        let spec = LabelSpec::default();
        assert_eq!(spec.width, 696);
        assert_eq!(spec.height, 271);
    }

    #[test]
    fn renders_canvas_with_qr_on_right() {
        let Ok(font) = crate::font::load_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let spec = LabelSpec::default();
        let img = render_label(&font, "Organic Honey 500g", &spec, None).unwrap();
        assert_eq!(img.dimensions(), (spec.width, spec.height));

        // Right half must contain QR black pixels, left half text pixels.
        let right_black = img
            .enumerate_pixels()
            .any(|(x, _, p)| x > spec.width / 2 && p.0[0] == 0);
        let left_black = img
            .enumerate_pixels()
            .any(|(x, _, p)| x < spec.width / 2 && p.0[0] == 0);
        assert!(right_black);
        assert!(left_black);
    }

    #[test]
    fn very_long_name_still_renders() {
        let Ok(font) = crate::font::load_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let text = "Extraordinarily Long Artisanal Product Name With Many Descriptive Words \
                    That Cannot Possibly Fit";
        let img = render_label(&font, text, &LabelSpec::default(), None).unwrap();
        assert_eq!(img.width(), LABEL_WIDTH);
    }

    #[test]
    fn pinned_font_size_is_accepted() {
        let Ok(font) = crate::font::load_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let img = render_label(&font, "Tea", &LabelSpec::default(), Some(&[28.0])).unwrap();
        assert_eq!(img.height(), LABEL_HEIGHT);
    }
}
