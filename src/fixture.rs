//! `FixtureNode`: an in-memory `SyntaxNode` used by this crate's own
//! tests and doctests. It is not a parser — there is no grammar behind
//! it, just a builder for hand-assembled trees — but it lets the engine
//! be exercised end-to-end without depending on a real language frontend,
//! which spec.md §6 deliberately keeps external.
//!
//! Line numbers are assigned from a monotonically increasing counter, the
//! same trick the teacher crate's `parser::fresh_id` uses for node ids,
//! so trees built by nested constructor calls come out in a stable,
//! debuggable source order without the caller bookkeeping line numbers.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::node::SyntaxNode;
use crate::types::{Location, Modifier, SymbolKind};

static NEXT_LINE: AtomicU32 = AtomicU32::new(1);

fn fresh_line() -> u32 {
    NEXT_LINE.fetch_add(1, Ordering::Relaxed)
}

/// Reset the line counter (for deterministic test output).
pub fn reset_lines() {
    NEXT_LINE.store(1, Ordering::Relaxed);
}

#[derive(Debug, Clone)]
pub struct FixtureNode {
    kind: Option<SymbolKind>,
    name: Option<String>,
    modifiers: Vec<Modifier>,
    signature: Option<Vec<String>>,
    is_interface: bool,
    line: u32,
    text: String,
    children: Vec<FixtureNode>,
}

impl FixtureNode {
    /// A non-declaration node (statement/expression). Never yielded by
    /// `extract_children`; its text still contributes to an enclosing
    /// declaration's `normalized_text`.
    #[must_use]
    pub fn statement(text: impl Into<String>) -> Self {
        Self {
            kind: None,
            name: None,
            modifiers: vec![],
            signature: None,
            is_interface: false,
            line: fresh_line(),
            text: text.into(),
            children: vec![],
        }
    }

    #[must_use]
    pub fn namespace(name: impl Into<String>, children: Vec<FixtureNode>) -> Self {
        Self::declaration(SymbolKind::Namespace, name, vec![], None, false, children)
    }

    #[must_use]
    pub fn type_decl(name: impl Into<String>, children: Vec<FixtureNode>) -> Self {
        Self::declaration(SymbolKind::Type, name, vec![], None, false, children)
    }

    #[must_use]
    pub fn interface_decl(name: impl Into<String>, children: Vec<FixtureNode>) -> Self {
        Self::declaration(SymbolKind::Type, name, vec![], None, true, children)
    }

    #[must_use]
    pub fn method(name: impl Into<String>, param_types: Vec<String>) -> Self {
        Self::declaration(
            SymbolKind::Method,
            name,
            vec![],
            Some(param_types),
            false,
            vec![],
        )
    }

    #[must_use]
    pub fn method_with_body(
        name: impl Into<String>,
        param_types: Vec<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut n = Self::method(name, param_types);
        n.children.push(FixtureNode::statement(body));
        n.text = render_text(n.name.as_deref().unwrap_or(""), &n.signature, &n.children);
        n
    }

    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::declaration(SymbolKind::Field, name, vec![], None, false, vec![])
    }

    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::declaration(SymbolKind::Parameter, name, vec![], None, false, vec![])
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Append declaration children (e.g. parameters) after construction,
    /// recomputing `text` so `normalized_text()` reflects them.
    #[must_use]
    pub fn with_children(mut self, children: Vec<FixtureNode>) -> Self {
        self.children.extend(children);
        self.text = render_text(self.name.as_deref().unwrap_or(""), &self.signature, &self.children);
        self
    }

    fn declaration(
        kind: SymbolKind,
        name: impl Into<String>,
        modifiers: Vec<Modifier>,
        signature: Option<Vec<String>>,
        is_interface: bool,
        children: Vec<FixtureNode>,
    ) -> Self {
        let name = name.into();
        let line = fresh_line();
        let text = render_text(&name, &signature, &children);
        Self {
            kind: Some(kind),
            name: Some(name),
            modifiers,
            signature,
            is_interface,
            line,
            text,
            children,
        }
    }
}

fn render_text(name: &str, signature: &Option<Vec<String>>, children: &[FixtureNode]) -> String {
    let mut s = name.to_string();
    if let Some(sig) = signature {
        s.push('(');
        s.push_str(&sig.join(","));
        s.push(')');
    }
    for child in children {
        s.push(' ');
        s.push_str(&child.text);
    }
    s
}

impl SyntaxNode for FixtureNode {
    fn declaration_kind(&self) -> Option<SymbolKind> {
        self.kind
    }

    fn identifier(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn declared_modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    fn is_interface(&self) -> bool {
        self.is_interface
    }

    fn signature_tokens(&self) -> Option<&[String]> {
        self.signature.as_deref()
    }

    fn span(&self) -> Location {
        Location::new("fixture.cs", self.line, self.line, 1)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn normalized_text(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn structural_equal(&self, other: &Self) -> bool {
        if self.kind.is_none() && other.kind.is_none() {
            // Non-declaration nodes (statements/expressions) carry no
            // name or signature to compare, so fall back to raw text.
            return self.text == other.text;
        }
        self.kind == other.kind
            && self.name == other.name
            && self.signature == other.signature
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|(a, b)| a.structural_equal(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equal_ignores_line_numbers() {
        reset_lines();
        let a = FixtureNode::method("Add", vec!["int".into()]);
        let b = FixtureNode::method("Add", vec!["int".into()]).with_line(999);
        assert!(a.structural_equal(&b));
    }

    #[test]
    fn structural_equal_detects_signature_change() {
        let a = FixtureNode::method("Add", vec!["int".into()]);
        let b = FixtureNode::method("Add", vec!["int".into(), "int".into()]);
        assert!(!a.structural_equal(&b));
    }
}
