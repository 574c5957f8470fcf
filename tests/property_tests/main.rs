//! Property-based tests for the testable invariants the component design
//! calls out: no duplicate emission, line-ordering, skip-identical, and
//! monotonic impact filtering.
//!
//! Uses proptest to generate random sibling lists rather than hand-picked
//! fixtures, the same way the pack's UI-types crate property-tests its own
//! geometric invariants.

use proptest::prelude::*;
use semdiff::fixture::FixtureNode;
use semdiff::{compare, flatten, CancellationToken, Change, DiffOptions, ImpactLevel};

/// A small, bounded vocabulary keeps collisions (matches, renames) common
/// enough that the generated trees actually exercise matching, not just
/// all-added/all-removed trees.
const NAMES: &[&str] = &["Alpha", "Bravo", "Charlie", "Delta", "Echo"];

#[derive(Debug, Clone)]
struct MemberSpec {
    name_index: usize,
    arity: usize,
}

fn arb_member() -> impl Strategy<Value = MemberSpec> {
    (0..NAMES.len(), 0usize..3).prop_map(|(name_index, arity)| MemberSpec { name_index, arity })
}

fn arb_members() -> impl Strategy<Value = Vec<MemberSpec>> {
    prop::collection::vec(arb_member(), 0..8)
}

fn build_class(members: &[MemberSpec]) -> FixtureNode {
    let methods = members
        .iter()
        .map(|m| {
            let param_types: Vec<String> = (0..m.arity).map(|_| "int".to_string()).collect();
            FixtureNode::method(NAMES[m.name_index], param_types)
        })
        .collect();
    FixtureNode::type_decl("C", methods)
}

fn run(old: &FixtureNode, new: &FixtureNode) -> Vec<Change> {
    compare(Some(old), Some(new), &DiffOptions::default(), &CancellationToken::new()).unwrap()
}

/// Recursively checks that every sibling group in the forest — the
/// top-level list and each change's own `children` — is strictly
/// ascending by `sort_line()`.
fn levels_are_ordered(changes: &[Change]) -> bool {
    changes.windows(2).all(|pair| pair[0].sort_line() < pair[1].sort_line())
        && changes.iter().all(|c| levels_are_ordered(&c.children))
}

/// Reimplements the "retain a parent if it has a retained descendant"
/// rule independently of the crate's own filtering, so the
/// monotonic-impact-filtering property test has genuine signal rather than
/// comparing the engine against itself.
fn filter_post(changes: &[Change], minimum: ImpactLevel) -> Vec<Change> {
    changes
        .iter()
        .filter_map(|c| {
            let children = filter_post(&c.children, minimum);
            if c.impact >= minimum || !children.is_empty() {
                let mut kept = c.clone();
                kept.children = children;
                Some(kept)
            } else {
                None
            }
        })
        .collect()
}

proptest! {
    /// Property 3 (skip-identical): comparing a tree against a structural
    /// clone of itself always returns no changes.
    #[test]
    fn prop_identical_trees_yield_no_changes(members in arb_members()) {
        let tree = build_class(&members);
        let clone = build_class(&members);
        let changes = run(&tree, &clone);
        prop_assert!(changes.is_empty());
    }

    /// Property 2 (line-ordering): siblings in the output forest are
    /// strictly ascending by effective start line. Checked at every level
    /// of nesting, not just the top — `compare_level` sorts each sibling
    /// group it returns, including the root wrapper's own children, and
    /// the invariant holds independently at each level.
    #[test]
    fn prop_siblings_are_strictly_line_ordered(old_members in arb_members(), new_members in arb_members()) {
        let old = build_class(&old_members);
        let new = build_class(&new_members);
        let changes = run(&old, &new);
        prop_assert!(levels_are_ordered(&changes));
    }

    /// Property 1 (no duplicate emission): every source node — identified
    /// by its unique `FixtureNode` span, since `fresh_line()` never repeats
    /// a line within a single compare — is referred to by at most one
    /// change on its old side and at most one on its new side, anywhere in
    /// the output forest (the root wrapper included).
    #[test]
    fn prop_no_duplicate_changes_per_node(old_members in arb_members(), new_members in arb_members()) {
        let old = build_class(&old_members);
        let new = build_class(&new_members);
        let changes = run(&old, &new);
        let flat = flatten(&changes);

        let mut seen_old = std::collections::HashSet::new();
        let mut seen_new = std::collections::HashSet::new();
        for change in &flat {
            if let Some(loc) = &change.old_location {
                prop_assert!(seen_old.insert(loc.start_line), "duplicate change for old node at line {}", loc.start_line);
            }
            if let Some(loc) = &change.new_location {
                prop_assert!(seen_new.insert(loc.start_line), "duplicate change for new node at line {}", loc.start_line);
            }
        }
    }

    /// Property 5 (monotonic impact filtering): filtering with
    /// `minimum_impact = L` up front matches filtering the unrestricted
    /// result in post, with retained parents keeping retained descendants.
    #[test]
    fn prop_minimum_impact_matches_post_hoc_filtering(
        old_members in arb_members(),
        new_members in arb_members(),
    ) {
        let old = build_class(&old_members);
        let new = build_class(&new_members);

        for level in [
            ImpactLevel::FormattingOnly,
            ImpactLevel::NonBreaking,
            ImpactLevel::BreakingInternalApi,
            ImpactLevel::BreakingPublicApi,
        ] {
            let opts = DiffOptions::default().with_minimum_impact(level);
            let direct = compare(Some(&old), Some(&new), &opts, &CancellationToken::new()).unwrap();
            let everything = run(&old, &new);
            let post_filtered = filter_post(&everything, level);
            prop_assert_eq!(direct, post_filtered);
        }
    }
}
