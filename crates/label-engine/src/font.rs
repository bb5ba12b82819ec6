//! System font discovery and loading.

use ab_glyph::FontVec;
use tracing::debug;

use crate::{LabelError, Result};

/// Candidate bold fonts in order of preference. The second field is the
/// face index for TTC collections.
const FONT_CANDIDATES: &[(&str, u32)] = &[
    ("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf", 0),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        0,
    ),
    ("/usr/share/fonts/TTF/DejaVuSans-Bold.ttf", 0),
    ("/System/Library/Fonts/Helvetica.ttc", 1),
    ("/System/Library/Fonts/Supplemental/Arial Bold.ttf", 0),
    ("C:\\Windows\\Fonts\\arialbd.ttf", 0),
    ("/System/Library/Fonts/Helvetica.ttc", 0),
];

/// Load a font from a TTF/OTF/TTC file.
pub fn load_font_file(path: &str, index: u32) -> Result<FontVec> {
    let data = std::fs::read(path).map_err(|e| LabelError::FontLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    FontVec::try_from_vec_and_index(data, index).map_err(|e| LabelError::FontLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Find and load the first available bold system font.
pub fn load_system_font() -> Result<FontVec> {
    for &(path, index) in FONT_CANDIDATES {
        match load_font_file(path, index) {
            Ok(font) => {
                debug!(path, index, "Loaded system font");
                return Ok(font);
            }
            Err(_) => continue,
        }
    }
    Err(LabelError::NoSystemFont(FONT_CANDIDATES.len()))
}
