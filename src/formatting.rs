//! `FormattingDiscriminator` (C7): detects whitespace-only differences
//! and lets the comparer override a modification's impact to
//! `FormattingOnly` (spec.md §4.7).

/// Strip every whitespace character from `s`.
pub(crate) fn strip_all_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `true` if `old` and `new` are identical once all whitespace is
/// removed. Absent content (`None`) is handled by the caller, never here
/// — per spec.md §4.7, null/absent content is always `false`.
pub fn is_formatting_only(old_text: &str, new_text: &str) -> bool {
    strip_all_whitespace(old_text) == strip_all_whitespace(new_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pure_whitespace_changes() {
        assert!(is_formatting_only(
            "{ return a + b; }",
            "{  return   a +   b;  }"
        ));
    }

    #[test]
    fn rejects_textual_changes() {
        assert!(!is_formatting_only("{ return a + b; }", "{ return a - b; }"));
    }

    #[test]
    fn identical_text_is_formatting_only() {
        assert!(is_formatting_only("same", "same"));
    }
}
