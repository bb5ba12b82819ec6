//! Font-size fitting: pick the largest size whose wrapped lines fit a box.

use crate::measure::Measurer;
use crate::wrap::wrap_words;

/// Pixel box the wrapped text must fit inside.
#[derive(Debug, Clone, Copy)]
pub struct TextBox {
    /// Available width for each line.
    pub width: u32,
    /// Available height for all lines together.
    pub height: u32,
    /// Hard cap on the number of wrapped lines.
    pub max_lines: usize,
    /// Extra pixels added to the font's line height per line.
    pub line_spacing: u32,
}

/// Outcome of a fitting pass. Always produced, even when nothing fits.
#[derive(Debug, Clone)]
pub struct FitResult {
    pub lines: Vec<String>,
    pub chosen_size: f32,
    /// False when the smallest candidate still overflows the box.
    pub fits: bool,
}

/// Try candidate sizes from largest to smallest and return the first
/// whose wrap fits `bounds`; fall back to the smallest candidate's wrap
/// (possibly overflowing) when none does.
///
/// `at_size` produces a measurer for one candidate size, so callers can
/// plug in a real scaled font or a synthetic metric.
pub fn fit_text<M, F>(at_size: F, sizes: &[f32], text: &str, bounds: &TextBox) -> FitResult
where
    M: Measurer,
    F: Fn(f32) -> M,
{
    debug_assert!(!sizes.is_empty(), "at least one candidate size required");

    let mut fallback: Option<FitResult> = None;

    for &size in sizes {
        let measurer = at_size(size);
        let lines = wrap_words(&measurer, text, bounds.width);
        let total_height = lines.len() as u32 * (measurer.line_height() + bounds.line_spacing);

        if lines.len() <= bounds.max_lines && total_height <= bounds.height {
            return FitResult {
                lines,
                chosen_size: size,
                fits: true,
            };
        }

        fallback = Some(FitResult {
            lines,
            chosen_size: size,
            fits: false,
        });
    }

    // Smallest candidate, unclipped. Degrade gracefully rather than error.
    fallback.unwrap_or(FitResult {
        lines: vec![text.to_string()],
        chosen_size: sizes.last().copied().unwrap_or(10.0),
        fits: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::test_support::FixedAdvance;

    /// Advance scales linearly with font size: size px per char, size+2 tall.
    fn at_size(size: f32) -> FixedAdvance {
        FixedAdvance {
            advance: size as u32,
            height: size as u32 + 2,
        }
    }

    const SIZES: [f32; 3] = [32.0, 24.0, 16.0];

    #[test]
    fn large_box_picks_largest_size() {
        let bounds = TextBox {
            width: 1000,
            height: 500,
            max_lines: 3,
            line_spacing: 4,
        };
        let result = fit_text(at_size, &SIZES, "short text", &bounds);
        assert!(result.fits);
        assert_eq!(result.chosen_size, 32.0);
        assert_eq!(result.lines, vec!["short text"]);
    }

    #[test]
    fn tight_box_steps_down_sizes() {
        // At 32px/char a 10-char line is 320px; at 16px it is 160px.
        let bounds = TextBox {
            width: 200,
            height: 500,
            max_lines: 1,
            line_spacing: 0,
        };
        let result = fit_text(at_size, &SIZES, "0123456789", &bounds);
        assert!(result.fits);
        assert_eq!(result.chosen_size, 16.0);
    }

    #[test]
    fn falls_back_to_smallest_when_nothing_fits() {
        let bounds = TextBox {
            width: 40,
            height: 20,
            max_lines: 1,
            line_spacing: 0,
        };
        let result = fit_text(
            at_size,
            &SIZES,
            "several words that cannot possibly fit",
            &bounds,
        );
        assert!(!result.fits);
        assert_eq!(result.chosen_size, 16.0);
        assert!(!result.lines.is_empty());
    }

    #[test]
    fn fitting_result_respects_width_budget() {
        let bounds = TextBox {
            width: 300,
            height: 200,
            max_lines: 3,
            line_spacing: 4,
        };
        let result = fit_text(at_size, &SIZES, "alpha beta gamma delta epsilon", &bounds);
        assert!(result.fits);
        let m = at_size(result.chosen_size);
        for line in &result.lines {
            assert!(m.text_width(line) <= bounds.width, "line {line:?} too wide");
        }
    }

    #[test]
    fn always_returns_at_least_one_line() {
        let bounds = TextBox {
            width: 10,
            height: 10,
            max_lines: 1,
            line_spacing: 0,
        };
        let result = fit_text(at_size, &SIZES, "", &bounds);
        assert!(!result.lines.is_empty());
    }

    #[test]
    fn line_count_cap_forces_smaller_size() {
        // Wide enough for 2 words per line at 16px but only 1 at 32px.
        let bounds = TextBox {
            width: 180,
            height: 500,
            max_lines: 2,
            line_spacing: 0,
        };
        let result = fit_text(at_size, &SIZES, "abcd efgh ijkl", &bounds);
        assert!(result.fits);
        assert!(result.lines.len() <= 2);
        assert!(result.chosen_size < 32.0);
    }
}
