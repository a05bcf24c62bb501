//! Greedy word wrapping.

/// Break `text` into lines no wider than `max_width`.
///
/// Words are appended to the current line until the measured width of the
/// line plus the next word exceeds `max_width`; that word then starts a new
/// line. Words are never split, so a single word wider than `max_width`
/// ends up alone on its own line. Runs of whitespace collapse to one space.
///
/// ```
/// use motes_text::wrap::wrap_words;
///
/// let measure = |s: &str| s.chars().count() as f32 * 10.0;
/// let lines = wrap_words("the quick brown fox", 100.0, measure);
/// assert_eq!(lines, vec!["the quick", "brown fox"]);
/// ```
pub fn wrap_words(text: &str, max_width: f32, mut measure: impl FnMut(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monospace(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_words("", 300.0, monospace).is_empty());
        assert!(wrap_words("   \t ", 300.0, monospace).is_empty());
    }

    #[test]
    fn test_single_line_fits() {
        assert_eq!(wrap_words("Gen-Z", 300.0, monospace), vec!["Gen-Z"]);
    }

    #[test]
    fn test_long_word_is_not_split() {
        let word = "supercalifragilisticexpialidocious";
        assert_eq!(wrap_words(word, 50.0, monospace), vec![word]);
    }

    #[test]
    fn test_long_word_between_short_ones() {
        let lines = wrap_words("a extraordinarily b", 50.0, monospace);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        // "abcd efgh" is 9 chars = 90 units
        assert_eq!(wrap_words("abcd efgh", 90.0, monospace), vec!["abcd efgh"]);
        assert_eq!(
            wrap_words("abcd efgh", 89.0, monospace),
            vec!["abcd", "efgh"]
        );
    }

    #[test]
    fn test_lines_never_exceed_limit_unless_single_word() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for max_width in [40.0, 75.0, 120.0, 300.0] {
            for line in wrap_words(text, max_width, monospace) {
                assert!(
                    monospace(&line) <= max_width || !line.contains(' '),
                    "line {:?} exceeds {}",
                    line,
                    max_width
                );
            }
        }
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(
            wrap_words("  hello    world ", 300.0, monospace),
            vec!["hello world"]
        );
    }
}
