//! `VisibilityExtractor` (C2): maps modifier tokens + context to a
//! `Visibility`, per the ordered rule list in spec.md §4.2.

use crate::node::{ExtractionContext, SyntaxNode};
use crate::types::{Modifier, SymbolKind, Visibility};

/// Interpret a set of declared modifier tokens as a single `Visibility`.
///
/// - `Ok(Some(v))` — a recognized combination (rule 1).
/// - `Ok(None)` — no modifiers were declared; caller falls through to
///   rules 2–5.
/// - `Err(())` — modifiers were declared but don't form a recognized
///   combination (rule 6).
fn classify_modifiers(modifiers: &[Modifier]) -> Result<Option<Visibility>, ()> {
    let mut has = [false; 4]; // public, protected, internal, private
    for m in modifiers {
        let idx = match m {
            Modifier::Public => 0,
            Modifier::Protected => 1,
            Modifier::Internal => 2,
            Modifier::Private => 3,
        };
        has[idx] = true;
    }

    match has {
        [false, false, false, false] => Ok(None),
        [true, false, false, false] => Ok(Some(Visibility::Public)),
        [false, true, false, false] => Ok(Some(Visibility::Protected)),
        [false, false, true, false] => Ok(Some(Visibility::Internal)),
        [false, false, false, true] => Ok(Some(Visibility::Private)),
        [false, true, true, false] => Ok(Some(Visibility::ProtectedInternal)),
        [false, true, false, true] => Ok(Some(Visibility::PrivateProtected)),
        _ => Err(()),
    }
}

/// Apply the ordered rule list from spec.md §4.2 to a single node.
pub fn extract_visibility<N: SyntaxNode>(
    node: &N,
    kind: SymbolKind,
    ctx: &ExtractionContext,
) -> Visibility {
    // Rule 1: explicit modifier set, mapped directly.
    // Rule 6: unrecognized combination -> conservative Internal.
    match classify_modifiers(node.declared_modifiers()) {
        Ok(Some(v)) => return v,
        Err(()) => return Visibility::Internal,
        Ok(None) => {}
    }

    // Rule 2: parameter / block-local declaration -> Local.
    if matches!(kind, SymbolKind::Parameter | SymbolKind::Local) {
        return Visibility::Local;
    }

    // Rule 3: enclosing scope is an interface -> Public.
    if ctx.enclosing_is_interface {
        return Visibility::Public;
    }

    // Rule 4: top-level type -> Internal.
    if kind == SymbolKind::Type && ctx.is_top_level {
        return Visibility::Internal;
    }

    // Rule 5: nested type / member without a modifier -> Private.
    Visibility::Private
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureNode;

    fn ctx(enclosing_is_interface: bool, is_top_level: bool) -> ExtractionContext {
        ExtractionContext {
            enclosing_kind: None,
            enclosing_is_interface,
            is_top_level,
        }
    }

    #[test]
    fn explicit_modifier_wins_over_context() {
        let node = FixtureNode::method("M", vec![]).with_modifiers(vec![Modifier::Public]);
        let v = extract_visibility(&node, SymbolKind::Method, &ctx(false, true));
        assert_eq!(v, Visibility::Public);
    }

    #[test]
    fn protected_internal_combination() {
        let node = FixtureNode::method("M", vec![])
            .with_modifiers(vec![Modifier::Protected, Modifier::Internal]);
        let v = extract_visibility(&node, SymbolKind::Method, &ctx(false, false));
        assert_eq!(v, Visibility::ProtectedInternal);
    }

    #[test]
    fn private_protected_combination() {
        let node = FixtureNode::method("M", vec![])
            .with_modifiers(vec![Modifier::Private, Modifier::Protected]);
        let v = extract_visibility(&node, SymbolKind::Method, &ctx(false, false));
        assert_eq!(v, Visibility::PrivateProtected);
    }

    #[test]
    fn unrecognized_combination_is_conservative_internal() {
        let node = FixtureNode::method("M", vec![])
            .with_modifiers(vec![Modifier::Public, Modifier::Private]);
        let v = extract_visibility(&node, SymbolKind::Method, &ctx(false, false));
        assert_eq!(v, Visibility::Internal);
    }

    #[test]
    fn parameter_is_always_local() {
        let node = FixtureNode::parameter("amount");
        let v = extract_visibility(&node, SymbolKind::Parameter, &ctx(false, false));
        assert_eq!(v, Visibility::Local);
    }

    #[test]
    fn member_of_interface_is_public() {
        let node = FixtureNode::method("M", vec![]);
        let v = extract_visibility(&node, SymbolKind::Method, &ctx(true, false));
        assert_eq!(v, Visibility::Public);
    }

    #[test]
    fn top_level_type_without_modifier_is_internal() {
        let node = FixtureNode::type_decl("C", vec![]);
        let v = extract_visibility(&node, SymbolKind::Type, &ctx(false, true));
        assert_eq!(v, Visibility::Internal);
    }

    #[test]
    fn nested_member_without_modifier_is_private() {
        let node = FixtureNode::field("x");
        let v = extract_visibility(&node, SymbolKind::Field, &ctx(false, false));
        assert_eq!(v, Visibility::Private);
    }
}
