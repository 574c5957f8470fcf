//! The seam between this crate and an external parser (spec.md §6).
//!
//! The core never parses source text itself. It asks a tree for the
//! handful of facts it needs through the `SyntaxNode` trait, the same way
//! the teacher crate's `matcher`/`amalgamator` modules only ever touch
//! `CstNode` through its narrow `kind()`/`children()`/`structurally_equal`
//! surface rather than reaching into a concrete parser type.

use crate::types::{Location, Modifier, SymbolKind};

/// Everything `NodeDescriptor::from` and `RecursiveTreeComparer` need from
/// a parsed tree node.
///
/// A real implementation wraps a specific parser's node type (Roslyn
/// syntax nodes, tree-sitter nodes, ...). `crate::fixture::FixtureNode` is
/// a hand-built implementation used by this crate's own tests.
pub trait SyntaxNode: Sized {
    /// `Some(kind)` if this node is itself a named declaration (one of the
    /// `SymbolKind` variants); `None` for expressions, statements, and
    /// other non-declaration syntax, which `extract_children` skips.
    fn declaration_kind(&self) -> Option<SymbolKind>;

    /// The declared name, or `None` for anonymous declarations.
    fn identifier(&self) -> Option<&str>;

    /// Explicit accessibility modifier tokens written on this
    /// declaration, in source order. Empty if none were written.
    fn declared_modifiers(&self) -> &[Modifier];

    /// Canonical signature tokens (e.g. parameter types, sans parameter
    /// names), or `None` for kinds that have no signature (fields,
    /// properties without indexers, enum members, ...).
    fn signature_tokens(&self) -> Option<&[String]>;

    /// `true` if this declaration is an interface — a subset of
    /// `SymbolKind::Type`, which doesn't distinguish interface from
    /// class/struct/record/enum on its own. Irrelevant (and `false` by
    /// default) for every other kind.
    fn is_interface(&self) -> bool {
        false
    }

    /// Source span of this node.
    fn span(&self) -> Location;

    /// Immediate children, in source order. Includes non-declaration
    /// syntax (statements, expressions) — `extract_children` filters.
    fn children(&self) -> &[Self];

    /// Whitespace-canonicalized rendering of this node's full text.
    fn normalized_text(&self) -> String;

    /// Structural equality: same kind and, recursively, the same
    /// children, ignoring source spans and trivia.
    fn structural_equal(&self, other: &Self) -> bool;
}

/// Context a parent passes down when extracting its children, since
/// `VisibilityExtractor` needs to know about the *enclosing* scope and
/// that can't be recovered from a child node in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionContext {
    /// Kind of the enclosing declaration, if any (`None` at the file
    /// root).
    pub enclosing_kind: Option<SymbolKind>,
    /// Whether the enclosing declaration is an interface (a subset of
    /// `SymbolKind::Type`, which doesn't distinguish class/interface on
    /// its own).
    pub enclosing_is_interface: bool,
    /// Whether this child sits directly at the file/namespace root
    /// (no enclosing type).
    pub is_top_level: bool,
}

impl ExtractionContext {
    #[must_use]
    pub fn root() -> Self {
        Self {
            enclosing_kind: None,
            enclosing_is_interface: false,
            is_top_level: true,
        }
    }

    /// The context a node's own children see, given this node's kind and
    /// whether it's an interface.
    ///
    /// A child is top-level (rule 4, spec.md §4.2) when its immediate
    /// parent is a namespace/file container rather than a type — that's
    /// true all the way down through nested namespaces, and false the
    /// moment a `Type` (or anything else) sits in between.
    #[must_use]
    pub fn for_children_of(&self, kind: SymbolKind, is_interface: bool) -> Self {
        Self {
            enclosing_kind: Some(kind),
            enclosing_is_interface: is_interface,
            is_top_level: kind == SymbolKind::Namespace,
        }
    }
}

/// Transient, per-node extraction of the facts a `Change` needs. Never
/// stored in the output tree — only its fields propagate into a `Change`
/// (spec.md §3 lifecycle note).
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    pub kind: SymbolKind,
    pub name: Option<String>,
    pub signature: Option<String>,
    pub visibility: crate::types::Visibility,
    pub span: Location,
    pub text_normalized: String,
}

impl NodeDescriptor {
    pub fn from<N: SyntaxNode>(node: &N, ctx: &ExtractionContext) -> Option<Self> {
        let kind = node.declaration_kind()?;
        let visibility = crate::visibility::extract_visibility(node, kind, ctx);
        Some(Self {
            kind,
            name: node.identifier().map(str::to_owned),
            signature: node.signature_tokens().map(|tokens| tokens.join(",")),
            visibility,
            span: node.span(),
            text_normalized: node.normalized_text(),
        })
    }

    /// The `(name, kind, signature)` key `SiblingMatcher` hashes on.
    #[must_use]
    pub fn match_key(&self) -> (Option<&str>, SymbolKind, Option<&str>) {
        (self.name.as_deref(), self.kind, self.signature.as_deref())
    }
}

/// Extract immediate structural (declaration) children of `parent`,
/// paired with their own extraction context. O(children) (spec.md §4.1).
pub fn extract_children<'a, N: SyntaxNode>(
    parent: &'a N,
    parent_kind: SymbolKind,
    parent_is_interface: bool,
    ctx: &ExtractionContext,
) -> Vec<(&'a N, NodeDescriptor)> {
    let child_ctx = ctx.for_children_of(parent_kind, parent_is_interface);
    parent
        .children()
        .iter()
        .filter_map(|child| NodeDescriptor::from(child, &child_ctx).map(|d| (child, d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureNode;

    #[test]
    fn extract_children_skips_non_declaration_nodes() {
        let root = FixtureNode::type_decl("C", vec![
            FixtureNode::method("Add", vec!["int".into(), "int".into()]),
            FixtureNode::statement("return a + b;"),
        ]);
        let ctx = ExtractionContext::root();
        let children = extract_children(&root, SymbolKind::Namespace, false, &ctx);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].1.name.as_deref(), Some("Add"));
    }

    #[test]
    fn extract_children_preserves_source_order() {
        let root = FixtureNode::type_decl("C", vec![
            FixtureNode::method("Sub", vec![]),
            FixtureNode::method("Add", vec![]),
        ]);
        let ctx = ExtractionContext::root();
        let children = extract_children(&root, SymbolKind::Namespace, false, &ctx);
        let names: Vec<_> = children.iter().filter_map(|(_, d)| d.name.as_deref()).collect();
        assert_eq!(names, vec!["Sub", "Add"]);
    }
}
