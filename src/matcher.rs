//! `SiblingMatcher` (C3): O(n+m) hash-keyed pairing of two sibling
//! sequences.
//!
//! This replaces the teacher crate's own sibling-matching approach —
//! Yang's O(n·m) dynamic-programming alignment for ordered children and
//! a Hungarian O(n³) assignment for unordered ones — with the single
//! hash-keyed pass spec.md §4.3 calls for. Declaration lists don't need
//! a similarity-scored alignment: two declarations either share the same
//! `(name, kind, signature)` or they don't, and that's enough to pair
//! them unambiguously (overloads are told apart by signature; true
//! renames fall out as unmatched pairs for the caller to merge — see
//! `comparer::detect_renames`).

use std::collections::{HashMap, VecDeque};

use crate::node::NodeDescriptor;
use crate::types::SymbolKind;

type MatchKey<'a> = (Option<&'a str>, SymbolKind, Option<&'a str>);

/// Result of matching two sibling sequences.
#[derive(Debug, Clone, Default)]
pub struct SiblingMatch {
    /// `(old_index, new_index)` pairs, in old-side order.
    pub matched: Vec<(usize, usize)>,
    pub unmatched_old: Vec<usize>,
    pub unmatched_new: Vec<usize>,
}

/// Pair `old` and `new` siblings by `(name, kind, signature)`.
///
/// Builds a hash map from key to a queue of new-side indices (O(m)), then
/// walks `old` left to right popping the first available new index for
/// each key (O(n)). Overloads sharing a key are paired in source order on
/// both sides because the queue preserves insertion order and `old` is
/// walked in order. No global cross-product is computed.
pub fn match_siblings(old: &[NodeDescriptor], new: &[NodeDescriptor]) -> SiblingMatch {
    let mut by_key: HashMap<MatchKey<'_>, VecDeque<usize>> = HashMap::with_capacity(new.len());
    for (j, descriptor) in new.iter().enumerate() {
        by_key.entry(descriptor.match_key()).or_default().push_back(j);
    }

    let mut matched = Vec::new();
    let mut unmatched_old = Vec::new();
    let mut matched_new = vec![false; new.len()];

    for (i, descriptor) in old.iter().enumerate() {
        let popped = by_key
            .get_mut(&descriptor.match_key())
            .and_then(VecDeque::pop_front);
        match popped {
            Some(j) => {
                matched.push((i, j));
                matched_new[j] = true;
            }
            None => unmatched_old.push(i),
        }
    }

    let unmatched_new = matched_new
        .iter()
        .enumerate()
        .filter_map(|(j, &was_matched)| (!was_matched).then_some(j))
        .collect();

    SiblingMatch {
        matched,
        unmatched_old,
        unmatched_new,
    }
}
