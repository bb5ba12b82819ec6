//! Label composition library for Brother QL continuous tape.
//!
//! Renders product-name-plus-QR-code label images: font discovery,
//! pixel-accurate text measurement, greedy word wrap, descending
//! font-size fitting, and single/grid label composition.

pub mod compose;
pub mod fit;
pub mod font;
pub mod grid;
pub mod label;
pub mod measure;
pub mod preview;
pub mod qr;
pub mod wrap;

// Re-exports for convenience
pub use fit::{FitResult, TextBox, fit_text};
pub use font::load_system_font;
pub use label::{LabelSpec, render_label};
pub use measure::{Measurer, ScaledFont};

/// Printable width for 62mm continuous tape at 300 dpi.
pub const LABEL_WIDTH: u32 = 696;

/// Default label height (29mm at 300 dpi).
pub const LABEL_HEIGHT: u32 = 271;

/// Default QR glyph edge length for single-product labels.
pub const DEFAULT_QR_SIZE: u32 = 180;

/// Font size ladder for single-product labels, largest first.
pub const SINGLE_LABEL_SIZES: [f32; 5] = [32.0, 28.0, 24.0, 20.0, 18.0];

/// Font size ladder for grid cells, largest first.
pub const GRID_CELL_SIZES: [f32; 5] = [18.0, 16.0, 14.0, 12.0, 10.0];

/// Errors that can occur while composing label images.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("No usable system font found (tried {0} candidate paths)")]
    NoSystemFont(usize),

    #[error("Failed to load font {path}: {reason}")]
    FontLoad { path: String, reason: String },

    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for label-engine operations.
pub type Result<T> = std::result::Result<T, LabelError>;
