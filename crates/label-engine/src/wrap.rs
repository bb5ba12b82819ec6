//! Greedy word wrapping against a pixel width budget.

use crate::measure::Measurer;

/// Wrap `text` into lines no wider than `max_width` pixels.
///
/// Words are packed greedily. A single word wider than `max_width` is
/// emitted as its own overflowing line rather than broken or dropped;
/// the caller degrades gracefully instead of failing.
pub fn wrap_words(measurer: &impl Measurer, text: &str, max_width: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let mut candidate = current.join(" ");
        if !candidate.is_empty() {
            candidate.push(' ');
        }
        candidate.push_str(word);

        if measurer.text_width(&candidate) <= max_width {
            current.push(word);
        } else if current.is_empty() {
            // Word alone exceeds the budget; keep it whole.
            lines.push(word.to_string());
        } else {
            lines.push(current.join(" "));
            current = vec![word];
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::test_support::FixedAdvance;

    fn measurer() -> FixedAdvance {
        FixedAdvance {
            advance: 10,
            height: 12,
        }
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_words(&measurer(), "abc def", 200);
        assert_eq!(lines, vec!["abc def"]);
    }

    #[test]
    fn wraps_at_width_budget() {
        // "aaaa bbbb" = 90px joined; budget 50px fits one word (40px) plus space.
        let lines = wrap_words(&measurer(), "aaaa bbbb", 50);
        assert_eq!(lines, vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn no_line_exceeds_budget_when_words_fit() {
        let m = measurer();
        let text = "one two three four five six seven";
        let lines = wrap_words(&m, text, 80);
        for line in &lines {
            assert!(m.text_width(line) <= 80, "line {line:?} too wide");
        }
    }

    #[test]
    fn overlong_word_is_kept_whole() {
        let lines = wrap_words(&measurer(), "abcdefghij xy", 50);
        assert_eq!(lines, vec!["abcdefghij", "xy"]);
    }

    #[test]
    fn empty_text_yields_single_empty_line() {
        let lines = wrap_words(&measurer(), "", 100);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn whitespace_only_yields_single_empty_line() {
        let lines = wrap_words(&measurer(), "   \t  ", 100);
        assert_eq!(lines, vec![String::new()]);
    }
}
