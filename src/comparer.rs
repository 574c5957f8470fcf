//! `RecursiveTreeComparer` (C5): the engine that ties extraction (C1),
//! visibility (C2), sibling matching (C3), equivalence (C4), the
//! formatting discriminator (C7), and impact classification (C6) into the
//! recursive comparison spec.md §4.5 describes.
//!
//! Structured the way the teacher crate's `resolver::resolve` pipeline
//! composes its own stages — extract, match, recurse, classify — except
//! here every stage is a pure function over borrowed trees rather than a
//! mutable merge-state object threaded through.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::cancellation::CancellationToken;
use crate::equivalence;
use crate::error::CompareError;
use crate::formatting;
use crate::impact::{self, ClassifyContext};
use crate::matcher;
use crate::node::{extract_children, ExtractionContext, NodeDescriptor, SyntaxNode};
use crate::types::{Change, ChangeType, DiffOptions, ImpactLevel, SymbolKind};

/// Compare two trees and return the forest of changes between them.
///
/// Both roots are required (spec.md §4.5.5): there is no whole-file
/// add/remove case here, since an absent side can't furnish the location
/// information a caller would need for it. A caller comparing against a
/// brand-new or deleted file constructs that `Change` directly instead of
/// calling into this engine.
///
/// When both roots are themselves declarations (`NodeDescriptor::from`
/// succeeds for each), the root pair is compared exactly like any other
/// matched pair one level down — `process_matched_pair` decides whether
/// the two roots are equivalent, a pure formatting difference, or genuinely
/// changed, and wraps a real change for the root around whatever its
/// children produce. A root with no declaration kind of its own (a bare
/// file/compilation-unit container) has nothing to wrap a `Change` around,
/// so its children are compared directly instead.
pub fn compare<N>(
    old_root: Option<&N>,
    new_root: Option<&N>,
    options: &DiffOptions,
    cancellation: &CancellationToken,
) -> Result<Vec<Change>, CompareError>
where
    N: SyntaxNode + Sync,
{
    let old_root = old_root.ok_or(CompareError::NullInput("old"))?;
    let new_root = new_root.ok_or(CompareError::NullInput("new"))?;

    if cancellation.is_cancelled() {
        tracing::debug!("compare called with an already-cancelled token");
        return Err(CompareError::Cancelled);
    }

    let ctx = ExtractionContext::root();
    let result = match (NodeDescriptor::from(old_root, &ctx), NodeDescriptor::from(new_root, &ctx)) {
        (Some(old_desc), Some(new_desc)) => {
            tracing::debug!(
                name = ?new_desc.name,
                kind = ?new_desc.kind,
                "root is itself a declaration; comparing it as a matched pair"
            );
            process_matched_pair(old_root, &old_desc, new_root, &new_desc, false, options, cancellation)
                .map(|change| change.into_iter().collect())
        }
        _ => {
            let old_children = extract_children(old_root, SymbolKind::Namespace, false, &ctx);
            let new_children = extract_children(new_root, SymbolKind::Namespace, false, &ctx);
            tracing::debug!(
                old_count = old_children.len(),
                new_count = new_children.len(),
                whitespace_mode = ?options.whitespace_mode,
                "root carries no declaration kind of its own; comparing its top-level children"
            );
            compare_level(&old_children, &new_children, options, cancellation)
        }
    };
    if let Ok(changes) = &result {
        tracing::debug!(change_count = changes.len(), "tree comparison finished");
    }
    result
}

/// Compare one level of siblings (already extracted) and return the
/// changes they produce, sorted by effective source line.
fn compare_level<N>(
    old: &[(&N, NodeDescriptor)],
    new: &[(&N, NodeDescriptor)],
    options: &DiffOptions,
    cancellation: &CancellationToken,
) -> Result<Vec<Change>, CompareError>
where
    N: SyntaxNode + Sync,
{
    let span = tracing::debug_span!("compare_level", old_count = old.len(), new_count = new.len());
    let _enter = span.enter();

    if cancellation.is_cancelled() {
        tracing::warn!("cancellation observed mid-traversal, aborting compare_level");
        return Err(CompareError::Cancelled);
    }

    let old_descriptors: Vec<NodeDescriptor> = old.iter().map(|(_, d)| d.clone()).collect();
    let new_descriptors: Vec<NodeDescriptor> = new.iter().map(|(_, d)| d.clone()).collect();
    let sibling_match = matcher::match_siblings(&old_descriptors, &new_descriptors);
    let moved = moved_flags(&sibling_match.matched);
    tracing::trace!(
        matched = sibling_match.matched.len(),
        unmatched_old = sibling_match.unmatched_old.len(),
        unmatched_new = sibling_match.unmatched_new.len(),
        moved = moved.iter().filter(|m| **m).count(),
        "siblings matched"
    );

    let matched_changes = compare_matched_pairs(old, new, &sibling_match.matched, &moved, options, cancellation)?;

    let (rename_changes, consumed_old, consumed_new) =
        detect_renames(&sibling_match.unmatched_old, &sibling_match.unmatched_new, old, new);
    if !rename_changes.is_empty() {
        tracing::trace!(count = rename_changes.len(), "merged unmatched pairs into renames");
    }

    let removed_changes = sibling_match
        .unmatched_old
        .iter()
        .filter(|i| !consumed_old.contains(i))
        .map(|&i| build_removed_change(&old[i].1));

    let added_changes = sibling_match
        .unmatched_new
        .iter()
        .filter(|j| !consumed_new.contains(j))
        .map(|&j| build_added_change(&new[j].1));

    let mut all: Vec<Change> = matched_changes;
    all.extend(rename_changes);
    all.extend(removed_changes);
    all.extend(added_changes);
    all.retain(|c| meets_threshold(c, options.minimum_impact));
    all.sort_by_key(Change::sort_line);

    Ok(all)
}

/// Process every matched pair, fanning out over `rayon` once the count
/// crosses `options.parallel_threshold` (spec.md §4.5.4) and otherwise
/// walking sequentially — same output either way.
fn compare_matched_pairs<N>(
    old: &[(&N, NodeDescriptor)],
    new: &[(&N, NodeDescriptor)],
    matched: &[(usize, usize)],
    moved: &[bool],
    options: &DiffOptions,
    cancellation: &CancellationToken,
) -> Result<Vec<Change>, CompareError>
where
    N: SyntaxNode + Sync,
{
    if matched.len() >= options.parallel_threshold {
        use rayon::prelude::*;
        let results: Vec<Option<Change>> = matched
            .par_iter()
            .zip(moved.par_iter())
            .map(|(&(i, j), &is_moved)| {
                process_matched_pair(old[i].0, &old[i].1, new[j].0, &new[j].1, is_moved, options, cancellation)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(results.into_iter().flatten().collect())
    } else {
        let mut out = Vec::with_capacity(matched.len());
        for (&(i, j), &is_moved) in matched.iter().zip(moved.iter()) {
            if let Some(change) =
                process_matched_pair(old[i].0, &old[i].1, new[j].0, &new[j].1, is_moved, options, cancellation)?
            {
                out.push(change);
            }
        }
        Ok(out)
    }
}

/// Compare a single matched pair. Returns `None` when nothing should be
/// emitted — either the pair is truly unchanged (invariant 3, spec.md
/// §8) or it's a pure formatting difference suppressed by
/// `include_formatting`.
fn process_matched_pair<N>(
    old_node: &N,
    old_desc: &NodeDescriptor,
    new_node: &N,
    new_desc: &NodeDescriptor,
    is_moved: bool,
    options: &DiffOptions,
    cancellation: &CancellationToken,
) -> Result<Option<Change>, CompareError>
where
    N: SyntaxNode + Sync,
{
    if cancellation.is_cancelled() {
        tracing::warn!("cancellation observed mid-traversal, aborting matched-pair comparison");
        return Err(CompareError::Cancelled);
    }

    if equivalence::are_equivalent(old_node, new_node, options) {
        tracing::trace!(name = ?new_desc.name, kind = ?new_desc.kind, moved = is_moved, "subtree pruned as equivalent");
        if is_moved {
            let (impact, caveats) = impact::classify(
                ChangeType::Moved,
                new_desc.kind,
                old_desc.visibility.most_exposed(new_desc.visibility),
                ClassifyContext {
                    is_signature_change: false,
                    is_same_scope_move: true,
                },
            );
            return Ok(Some(Change {
                change_type: ChangeType::Moved,
                kind: new_desc.kind,
                name: new_desc.name.clone(),
                old_location: Some(old_desc.span.clone()),
                new_location: Some(new_desc.span.clone()),
                old_content: None,
                new_content: None,
                impact,
                caveats,
                children: vec![],
            }));
        }
        return Ok(None);
    }

    if formatting::is_formatting_only(&old_desc.text_normalized, &new_desc.text_normalized) {
        if !options.include_formatting {
            return Ok(None);
        }
        return Ok(Some(Change {
            change_type: ChangeType::Modified,
            kind: new_desc.kind,
            name: new_desc.name.clone(),
            old_location: Some(old_desc.span.clone()),
            new_location: Some(new_desc.span.clone()),
            old_content: Some(old_desc.text_normalized.clone()),
            new_content: Some(new_desc.text_normalized.clone()),
            impact: ImpactLevel::FormattingOnly,
            caveats: vec![],
            children: vec![],
        }));
    }

    let child_ctx = ExtractionContext::root().for_children_of(old_desc.kind, old_node.is_interface());
    let old_children = extract_children(old_node, old_desc.kind, old_node.is_interface(), &child_ctx);
    let new_children = extract_children(new_node, new_desc.kind, new_node.is_interface(), &child_ctx);
    let nested = compare_level(&old_children, &new_children, options, cancellation)?;

    let is_signature_change =
        old_desc.visibility != new_desc.visibility || old_desc.signature != new_desc.signature;

    let (impact, caveats) = impact::classify(
        ChangeType::Modified,
        new_desc.kind,
        old_desc.visibility.most_exposed(new_desc.visibility),
        ClassifyContext {
            is_signature_change,
            is_same_scope_move: false,
        },
    );

    let change = Change {
        change_type: ChangeType::Modified,
        kind: new_desc.kind,
        name: new_desc.name.clone(),
        old_location: Some(old_desc.span.clone()),
        new_location: Some(new_desc.span.clone()),
        old_content: Some(old_desc.text_normalized.clone()),
        new_content: Some(new_desc.text_normalized.clone()),
        impact,
        caveats,
        children: nested,
    };

    if meets_threshold(&change, options.minimum_impact) {
        Ok(Some(change))
    } else {
        Ok(None)
    }
}

/// Merge leftover unmatched old/new siblings that share a kind *and a
/// signature* into `Renamed` changes rather than separate `Removed`+
/// `Added` ones (spec.md §4.5.2: same kind, same signature, different
/// name). Pairs in source order; any excess on either side falls through
/// as a plain removal or addition.
///
/// A same-name signature change (`M(int)` → `M(int,int)`) never reaches
/// this function as a pairing candidate in practice — `match_siblings`'
/// key already includes signature, so the two sides would have matched
/// there if the signature hadn't changed. Keying this grouping by
/// `(kind, signature)` rather than `kind` alone keeps that case out: it
/// only ever sees entries with equal signatures on both sides, so any two
/// that pair here are guaranteed to differ in name.
fn detect_renames<N: SyntaxNode>(
    unmatched_old: &[usize],
    unmatched_new: &[usize],
    old: &[(&N, NodeDescriptor)],
    new: &[(&N, NodeDescriptor)],
) -> (Vec<Change>, HashSet<usize>, HashSet<usize>) {
    let mut by_key_new: HashMap<(SymbolKind, Option<String>), VecDeque<usize>> = HashMap::new();
    for &j in unmatched_new {
        let key = (new[j].1.kind, new[j].1.signature.clone());
        by_key_new.entry(key).or_default().push_back(j);
    }

    let mut renames = Vec::new();
    let mut consumed_old = HashSet::new();
    let mut consumed_new = HashSet::new();

    for &i in unmatched_old {
        let key = (old[i].1.kind, old[i].1.signature.clone());
        let Some(queue) = by_key_new.get_mut(&key) else {
            continue;
        };
        let Some(pos) = queue.iter().position(|&j| new[j].1.name != old[i].1.name) else {
            continue;
        };
        let j = queue.remove(pos).expect("position() found this index");
        renames.push(build_rename_change(&old[i].1, &new[j].1));
        consumed_old.insert(i);
        consumed_new.insert(j);
    }

    (renames, consumed_old, consumed_new)
}

fn build_rename_change(old_desc: &NodeDescriptor, new_desc: &NodeDescriptor) -> Change {
    let (impact, caveats) = impact::classify(
        ChangeType::Renamed,
        new_desc.kind,
        old_desc.visibility.most_exposed(new_desc.visibility),
        ClassifyContext::default(),
    );
    Change {
        change_type: ChangeType::Renamed,
        kind: new_desc.kind,
        name: new_desc.name.clone(),
        old_location: Some(old_desc.span.clone()),
        new_location: Some(new_desc.span.clone()),
        old_content: Some(old_desc.text_normalized.clone()),
        new_content: Some(new_desc.text_normalized.clone()),
        impact,
        caveats,
        children: vec![],
    }
}

fn build_removed_change(descriptor: &NodeDescriptor) -> Change {
    let (impact, caveats) = impact::classify(
        ChangeType::Removed,
        descriptor.kind,
        descriptor.visibility,
        ClassifyContext::default(),
    );
    Change {
        change_type: ChangeType::Removed,
        kind: descriptor.kind,
        name: descriptor.name.clone(),
        old_location: Some(descriptor.span.clone()),
        new_location: None,
        old_content: Some(descriptor.text_normalized.clone()),
        new_content: None,
        impact,
        caveats,
        children: vec![],
    }
}

fn build_added_change(descriptor: &NodeDescriptor) -> Change {
    let (impact, caveats) = impact::classify(
        ChangeType::Added,
        descriptor.kind,
        descriptor.visibility,
        ClassifyContext::default(),
    );
    Change {
        change_type: ChangeType::Added,
        kind: descriptor.kind,
        name: descriptor.name.clone(),
        old_location: None,
        new_location: Some(descriptor.span.clone()),
        old_content: None,
        new_content: Some(descriptor.text_normalized.clone()),
        impact,
        caveats,
        children: vec![],
    }
}

/// A matched change is retained if its own impact clears the bar, or if
/// it carries a nested change that does — a parent whose own signature
/// didn't change still needs to surface a breaking change three levels
/// down (spec.md §4.8).
fn meets_threshold(change: &Change, minimum: ImpactLevel) -> bool {
    change.impact >= minimum || !change.children.is_empty()
}

/// For each matched pair (already in old-index order), flag whether it
/// sits outside the longest run of matched pairs whose new-side index is
/// increasing — i.e. whether satisfying its position would require
/// reordering siblings (spec.md §4.5.3). O(n²) patience-style scan; sibling
/// lists are small enough that this never matters in practice.
fn moved_flags(matched: &[(usize, usize)]) -> Vec<bool> {
    let n = matched.len();
    if n == 0 {
        return vec![];
    }

    let new_idx: Vec<usize> = matched.iter().map(|&(_, j)| j).collect();
    let mut lengths = vec![1usize; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];

    for i in 0..n {
        for j in 0..i {
            if new_idx[j] < new_idx[i] && lengths[j] + 1 > lengths[i] {
                lengths[i] = lengths[j] + 1;
                prev[i] = Some(j);
            }
        }
    }

    let mut best = 0;
    for i in 1..n {
        if lengths[i] > lengths[best] {
            best = i;
        }
    }

    let mut in_order = vec![false; n];
    let mut cur = Some(best);
    while let Some(i) = cur {
        in_order[i] = true;
        cur = prev[i];
    }

    in_order.into_iter().map(|kept| !kept).collect()
}
