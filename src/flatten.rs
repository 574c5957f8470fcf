//! `ChangeFlattener` (C8): non-destructive read-only views over a change
//! forest (spec.md §4.8). None of these mutate or re-filter the forest —
//! `minimum_impact` filtering happens at emit time in `comparer.rs`, not
//! here.

use crate::types::{Change, ImpactLevel, SymbolKind};

/// Depth-first pre-order iteration over `changes` and all their
/// descendants. Mirrors the accumulate-into-`out` recursion the teacher
/// crate's `CstNode::collect_leaves_inner` uses for its own traversal.
#[must_use]
pub fn flatten(changes: &[Change]) -> Vec<&Change> {
    let mut out = Vec::new();
    flatten_into(changes, &mut out);
    out
}

fn flatten_into<'a>(changes: &'a [Change], out: &mut Vec<&'a Change>) {
    for change in changes {
        out.push(change);
        flatten_into(&change.children, out);
    }
}

/// Total number of changes in the forest, including nested ones.
#[must_use]
pub fn count_all(changes: &[Change]) -> usize {
    flatten(changes).len()
}

/// All changes (at any depth) whose `name` matches exactly.
#[must_use]
pub fn find_by_name<'a>(changes: &'a [Change], name: &str) -> Vec<&'a Change> {
    flatten(changes)
        .into_iter()
        .filter(|c| c.name.as_deref() == Some(name))
        .collect()
}

/// All changes (at any depth) of the given `SymbolKind`.
#[must_use]
pub fn of_kind(changes: &[Change], kind: SymbolKind) -> Vec<&Change> {
    flatten(changes).into_iter().filter(|c| c.kind == kind).collect()
}

/// All changes (at any depth) whose impact is at least `minimum`.
#[must_use]
pub fn of_impact_at_least(changes: &[Change], minimum: ImpactLevel) -> Vec<&Change> {
    flatten(changes)
        .into_iter()
        .filter(|c| c.impact >= minimum)
        .collect()
}
