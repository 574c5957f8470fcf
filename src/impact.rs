//! `ImpactClassifier` (C6): a pure decision table mapping a change's
//! shape to an `ImpactLevel` plus human-readable caveats (spec.md §4.6).
//!
//! Modeled as a single `match`, not a rule-object registry — unlike the
//! teacher crate's `PatternRegistry` (a `Vec<Box<dyn PatternRule>>` tried
//! in order), every row here is mutually exclusive on its own guards, so
//! a `match` is both simpler and lets the compiler flag a missing arm.

use crate::types::{ChangeType, SymbolKind, Visibility};

/// Extra facts the classifier needs beyond `(change_type, symbol_kind,
/// visibility)` — whether this is a signature-level modification, and
/// whether a move stayed within the same matched parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifyContext {
    pub is_signature_change: bool,
    pub is_same_scope_move: bool,
}

const PARAMETER_RENAME_CAVEAT: &str = "Parameter rename may break callers using named arguments";
const PRIVATE_RENAME_CAVEAT: &str = "Private member rename may break reflection or serialization";
const SAME_SCOPE_MOVE_CAVEAT: &str = "Code reordering within same scope";

/// Classify a change. First matching row of spec.md §4.6's table wins.
#[must_use]
pub fn classify(
    change_type: ChangeType,
    symbol_kind: SymbolKind,
    visibility: Visibility,
    ctx: ClassifyContext,
) -> (crate::types::ImpactLevel, Vec<String>) {
    use crate::types::ImpactLevel::*;

    match change_type {
        ChangeType::Renamed => {
            if symbol_kind == SymbolKind::Parameter {
                return (NonBreaking, vec![PARAMETER_RENAME_CAVEAT.to_string()]);
            }
            if matches!(
                symbol_kind,
                SymbolKind::Field | SymbolKind::Property | SymbolKind::Method
            ) && visibility == Visibility::Private
            {
                return (NonBreaking, vec![PRIVATE_RENAME_CAVEAT.to_string()]);
            }
            if visibility.is_public_api() {
                return (BreakingPublicApi, vec![]);
            }
            if visibility.is_internal_api() {
                return (BreakingInternalApi, vec![]);
            }
            (NonBreaking, vec![])
        }

        ChangeType::Moved => {
            if ctx.is_same_scope_move {
                return (NonBreaking, vec![SAME_SCOPE_MOVE_CAVEAT.to_string()]);
            }
            if visibility.is_public_api() {
                return (BreakingPublicApi, vec![]);
            }
            if visibility.is_internal_api() {
                return (BreakingInternalApi, vec![]);
            }
            (NonBreaking, vec![])
        }

        ChangeType::Modified if !ctx.is_signature_change => (NonBreaking, vec![]),

        ChangeType::Added | ChangeType::Removed | ChangeType::Modified => {
            if visibility.is_public_api() {
                (BreakingPublicApi, vec![])
            } else if visibility.is_internal_api() {
                (BreakingInternalApi, vec![])
            } else {
                (NonBreaking, vec![])
            }
        }

        ChangeType::Unchanged => (NonBreaking, vec![]),
    }
}
