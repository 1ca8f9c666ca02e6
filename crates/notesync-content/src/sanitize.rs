//! Control character stripping

/// Remove control characters that cannot appear in note markup.
///
/// Tab, line feed and carriage return are kept; every other character in the
/// Unicode `Cc` category is dropped.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Whether the text contains a control character that markup cannot carry.
pub(crate) fn find_control_char(text: &str) -> Option<(usize, char)> {
    text.char_indices()
        .find(|(_, c)| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bell_and_nul_but_keeps_whitespace() {
        let dirty = "a\u{0}b\u{7}\tc\r\nd\u{1b}[0m";
        assert_eq!(strip_control_chars(dirty), "ab\tc\r\nd[0m");
    }

    #[test]
    fn strips_c1_controls() {
        assert_eq!(strip_control_chars("x\u{85}y\u{9f}"), "xy");
    }

    #[test]
    fn leaves_non_ascii_text_alone() {
        let text = "café ✓ 日本語";
        assert_eq!(strip_control_chars(text), text);
        assert!(find_control_char(text).is_none());
    }
}
