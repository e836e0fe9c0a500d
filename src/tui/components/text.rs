//! Width-aware string helpers shared by the components.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal cells, ending with "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_strings_are_untouched() {
        assert_eq!(truncate_to_width("Heat", 10), "Heat");
        assert_eq!(truncate_to_width("Heat", 4), "Heat");
    }

    #[test]
    fn test_long_strings_get_ellipsis() {
        assert_eq!(truncate_to_width("The Matrix Reloaded", 10), "The Matri…");
        assert_eq!(truncate_to_width("The Matrix Reloaded", 10).width(), 10);
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Each CJK character is two cells wide.
        let cut = truncate_to_width("千と千尋の神隠し", 7);
        assert_eq!(cut, "千と千…");
        assert!(cut.width() <= 7);
    }

    #[test]
    fn test_zero_width_budget() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
