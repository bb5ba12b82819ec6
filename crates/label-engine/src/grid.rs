//! Grid labels: several product cells composited onto one printable label.
//!
//! Each cell carries 90°-rotated product text on the left and a small
//! QR glyph on the right, so four cells fit side by side on 62mm tape.

use ab_glyph::{Font, PxScale};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_text_mut;

use crate::compose::{blank_canvas, paste, paste_gray};
use crate::fit::{TextBox, fit_text};
use crate::measure::{Measurer, ScaledFont};
use crate::qr::generate_qr;
use crate::{GRID_CELL_SIZES, LABEL_WIDTH, Result};

/// Cell height for landscape grid labels.
pub const CELL_HEIGHT: u32 = 250;

/// Gap between adjacent cells.
pub const CELL_GAP: u32 = 2;

/// QR glyph edge length inside a grid cell.
const CELL_QR_SIZE: u32 = 100;

/// Extra pixels between wrapped lines inside a cell.
const LINE_SPACING: u32 = 4;

/// Maximum wrapped lines per cell.
const MAX_LINES: usize = 3;

const SEPARATOR_GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Render one grid cell: rotated text on the left, QR on the right.
pub fn render_cell(font: &impl Font, text: &str, cell_width: u32, cell_height: u32) -> Result<RgbaImage> {
    let mut img = blank_canvas(cell_width, cell_height);

    let qr_size = CELL_QR_SIZE.min(cell_height.saturating_sub(20));
    let qr = generate_qr(text, qr_size)?;
    let qr_x = cell_width.saturating_sub(qr_size + 5);
    let qr_y = (cell_height - qr_size) / 2;
    paste_gray(&mut img, &qr, qr_x, qr_y);

    // The text is rotated 90° CCW, so line width is budgeted against the
    // cell height and the stacked line thickness against the remaining width.
    let bounds = TextBox {
        width: cell_height.saturating_sub(20),
        height: qr_x.saturating_sub(15),
        max_lines: MAX_LINES,
        line_spacing: LINE_SPACING,
    };
    let fit = fit_text(|s| ScaledFont::new(font, s), &GRID_CELL_SIZES, text, &bounds);

    let text_img = rotated_text_block(font, &fit.lines, fit.chosen_size);
    let text_y = (cell_height.saturating_sub(text_img.height())) / 2;
    paste(&mut img, &text_img, 5, text_y);

    Ok(img)
}

/// Draw wrapped lines horizontally, then rotate the block 90° CCW so it
/// reads bottom-to-top.
fn rotated_text_block(font: &impl Font, lines: &[String], size: f32) -> RgbaImage {
    let measurer = ScaledFont::new(font, size);
    let line_height = measurer.line_height() + LINE_SPACING;
    let max_line_width = lines
        .iter()
        .map(|l| measurer.text_width(l))
        .max()
        .unwrap_or(0);

    let mut block = blank_canvas(max_line_width + 10, lines.len() as u32 * line_height + 10);
    let scale = PxScale::from(size);
    for (i, line) in lines.iter().enumerate() {
        let y = 5 + i as i32 * line_height as i32;
        draw_text_mut(&mut block, Rgba([0, 0, 0, 255]), 5, y, scale, font, line);
    }

    imageops::rotate270(&block)
}

/// Compose a grid label from up to `columns * rows` products.
///
/// Cells are placed row-major with a small gap and light-gray separator
/// lines between columns.
pub fn render_grid(
    font: &impl Font,
    products: &[String],
    columns: u32,
    rows: u32,
    label_width: u32,
) -> Result<RgbaImage> {
    let columns = columns.max(1);
    let rows = rows.max(1);
    let cell_width = (label_width - (columns - 1) * CELL_GAP) / columns;
    let label_height = rows * CELL_HEIGHT + (rows - 1) * CELL_GAP;

    let mut label = blank_canvas(label_width, label_height);

    for (idx, product) in products.iter().enumerate() {
        let idx = idx as u32;
        if idx >= columns * rows {
            break;
        }
        let col = idx % columns;
        let row = idx / columns;
        let x = col * (cell_width + CELL_GAP);
        let y = row * (CELL_HEIGHT + CELL_GAP);

        let cell = render_cell(font, product, cell_width, CELL_HEIGHT)?;
        paste(&mut label, &cell, x, y);
    }

    // Separator lines between columns.
    for col in 0..columns.saturating_sub(1) {
        let line_x = (col + 1) * (cell_width + CELL_GAP) - CELL_GAP / 2 - 1;
        if line_x < label_width {
            for y in 0..label_height {
                label.put_pixel(line_x, y, SEPARATOR_GRAY);
            }
        }
    }

    Ok(label)
}

/// Default grid label width (full 62mm tape).
pub fn default_grid(font: &impl Font, products: &[String], columns: u32, rows: u32) -> Result<RgbaImage> {
    render_grid(font, products, columns, rows, LABEL_WIDTH)
}
