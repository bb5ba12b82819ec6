//! Pixel-accurate text measurement.
//!
//! Wrapping and fitting decisions are made against true rendered widths,
//! not character counts. The `Measurer` trait is the seam between the
//! layout algorithms and the font backend.

use ab_glyph::{Font, PxScale, ScaleFont};

/// Measures candidate lines at one fixed font size.
pub trait Measurer {
    /// Rendered pixel width of `text` at this size.
    fn text_width(&self, text: &str) -> u32;

    /// Height of one rendered line at this size.
    fn line_height(&self) -> u32;
}

/// A font scaled to a fixed pixel size.
pub struct ScaledFont<'a, F: Font> {
    font: &'a F,
    scale: PxScale,
}

impl<'a, F: Font> ScaledFont<'a, F> {
    pub fn new(font: &'a F, size: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(size),
        }
    }
}

impl<F: Font> Measurer for ScaledFont<'_, F> {
    fn text_width(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = prev_glyph {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        width.ceil() as u32
    }

    fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedAdvance;
    use super::*;

    #[test]
    fn fixed_advance_counts_chars() {
        let m = FixedAdvance {
            advance: 10,
            height: 12,
        };
        assert_eq!(m.text_width("abcd"), 40);
        assert_eq!(m.text_width(""), 0);
        assert_eq!(m.line_height(), 12);
    }

    #[test]
    fn scaled_font_measures_real_font_if_available() {
        let Ok(font) = crate::font::load_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let m = ScaledFont::new(&font, 24.0);
        let narrow = m.text_width("i");
        let wide = m.text_width("WWWW");
        assert!(wide > narrow);
        assert!(m.line_height() > 0);
    }
}
