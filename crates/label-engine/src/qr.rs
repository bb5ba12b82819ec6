//! QR code glyph generation for label images.

use image::{GrayImage, Luma, imageops};
use qrcode::{EcLevel, QrCode};

use crate::Result;

/// Generate a QR code image encoding `data`, sized exactly
/// `target_size` × `target_size` pixels.
///
/// Low error correction keeps the module count small so each module
/// stays several printer dots wide.
pub fn generate_qr(data: &str, target_size: u32) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    // One quiet-zone module on each side.
    let total_modules = module_count + 2;
    let scale = (target_size / total_modules).max(1);
    let img_size = total_modules * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (i as u32) % module_count + 1;
        let my = (i as u32) / module_count + 1;
        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(mx * scale + dx, my * scale + dy, Luma([0u8]));
            }
        }
    }

    if img_size != target_size {
        img = imageops::resize(
            &img,
            target_size,
            target_size,
            imageops::FilterType::Nearest,
        );
    }

    Ok(img)
}
