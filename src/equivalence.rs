//! `SubtreeEquivalence` (C4): a fast structural-equality pruning check,
//! used only to decide whether to emit anything for a matched pair —
//! never to drive recursion (spec.md §4.4).

use crate::formatting::strip_all_whitespace;
use crate::node::SyntaxNode;
use crate::types::{DiffOptions, WhitespaceMode};

/// `true` if `old` and `new` are equivalent subtrees under `options`.
///
/// Structural equality (ignoring source spans and trivia) is always
/// checked first and is the fast path the whole engine leans on — see
/// `RecursiveTreeComparer::compare_level`, which treats a `true` result
/// here as "emit nothing, don't recurse" for a matched pair. Only when
/// structural equality fails and a lenient whitespace mode is in effect
/// do we fall back to comparing normalized text.
pub fn are_equivalent<N: SyntaxNode>(old: &N, new: &N, options: &DiffOptions) -> bool {
    if old.structural_equal(new) {
        return true;
    }

    match options.whitespace_mode {
        WhitespaceMode::IgnoreLeadingTrailing => {
            old.normalized_text().trim() == new.normalized_text().trim()
        }
        WhitespaceMode::IgnoreAll | WhitespaceMode::LanguageAware => {
            strip_all_whitespace(&old.normalized_text()) == strip_all_whitespace(&new.normalized_text())
        }
        WhitespaceMode::Exact => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureNode;

    #[test]
    fn identical_trees_are_equivalent() {
        let a = FixtureNode::method("Add", vec!["int".into(), "int".into()]);
        let b = FixtureNode::method("Add", vec!["int".into(), "int".into()]);
        assert!(are_equivalent(&a, &b, &DiffOptions::default()));
    }

    #[test]
    fn differing_bodies_are_not_equivalent_under_exact_mode() {
        let a = FixtureNode::method_with_body("M", vec![], "{ return a   +b; }");
        let b = FixtureNode::method_with_body("M", vec![], "{ return a+ b; }");
        assert!(!are_equivalent(&a, &b, &DiffOptions::default()));
    }

    #[test]
    fn ignore_all_whitespace_mode_treats_reformatted_bodies_as_equivalent() {
        let a = FixtureNode::method_with_body("M", vec![], "{ return a + b; }");
        let b = FixtureNode::method_with_body("M", vec![], "{return a+b;}");
        let opts = DiffOptions::default().with_whitespace_mode(WhitespaceMode::IgnoreAll);
        assert!(are_equivalent(&a, &b, &opts));
    }
}
