//! Brother QL raster command generation and transport.
//!
//! Builds the raster protocol byte stream for QL-series label printers
//! (QL-700, 62mm continuous tape) and sends it over a USB device node
//! or a raw CUPS queue.

pub mod convert;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use convert::{ConvertOptions, convert};
pub use protocol::{PrintOptions, RASTER_LINE_BYTES};
pub use transport::{DiscoveredPrinter, PrinterTarget, discover};

/// Print head width in pins for QL-series printers.
pub const HEAD_PINS: u32 = 720;

/// Printable dots across 62mm continuous tape.
pub const TAPE_62_PRINTABLE: u32 = 696;

/// Unprintable pin offset on the right edge of 62mm tape.
pub const TAPE_62_OFFSET: u32 = 12;

/// Brother's USB vendor ID.
pub const BROTHER_VENDOR_ID: u16 = 0x04f9;

/// QL-700 USB product ID.
pub const QL700_PRODUCT_ID: u16 = 0x2042;

/// Errors that can occur during raster conversion or transport.
#[derive(Debug, thiserror::Error)]
pub enum QlError {
    #[error("Image too wide for 62mm tape: {actual}px (max {max}px)")]
    ImageTooWide { actual: u32, max: u32 },

    #[error("Image has zero height")]
    EmptyImage,

    #[error("Invalid printer identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("No USB printer device node found for {0}")]
    DeviceNotFound(String),

    #[error("Spooler command failed: {0}")]
    Spooler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ql-raster operations.
pub type Result<T> = std::result::Result<T, QlError>;
