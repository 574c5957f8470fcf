//! # semdiff
//!
//! A semantic structural diff engine for brace-delimited, statically-typed
//! source languages. Where a line-based diff reports every line a
//! reformat touches, `semdiff` compares declaration trees and reports
//! *what changed* — a method gained a parameter, a field's visibility
//! narrowed, a class was renamed — each tagged with an [`ImpactLevel`]
//! describing how likely it is to break callers.
//!
//! ## Approach
//!
//! The engine never parses source text itself — that's the caller's job,
//! via an implementation of [`SyntaxNode`]. Given two parsed trees, it:
//!
//! 1. **Extracts** the declaration children of each node ([`node`]),
//!    classifying each one's accessibility ([`visibility`]).
//! 2. **Matches** old and new siblings by `(name, kind, signature)`
//!    ([`matcher`]) in a single hashed pass.
//! 3. **Prunes** matched pairs that are structurally identical before
//!    recursing into them ([`equivalence`]), and separately flags pairs
//!    that differ only in whitespace ([`formatting`]).
//! 4. **Recurses** depth-first over what's left, merging unmatched
//!    leftovers into rename and same-scope move detections, and fanning
//!    matched-pair comparisons out over `rayon` once a sibling list is
//!    large enough to be worth it ([`comparer`]).
//! 5. **Classifies** every emitted change by a pure decision table keyed
//!    on change shape, symbol kind, and visibility ([`impact`]).
//!
//! The result is a forest of [`Change`] values, which [`flatten`] offers
//! read-only traversal and lookup helpers over.
//!
//! ## Example
//!
//! ```rust
//! use semdiff::fixture::FixtureNode;
//! use semdiff::{compare, CancellationToken, DiffOptions};
//!
//! let old = FixtureNode::type_decl(
//!     "Calculator",
//!     vec![FixtureNode::method("Add", vec!["int".into(), "int".into()])],
//! );
//! let new = FixtureNode::type_decl(
//!     "Calculator",
//!     vec![FixtureNode::method(
//!         "Add",
//!         vec!["int".into(), "int".into(), "int".into()],
//!     )],
//! );
//!
//! let changes = compare(
//!     Some(&old),
//!     Some(&new),
//!     &DiffOptions::default(),
//!     &CancellationToken::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(changes.len(), 1);
//! ```
//!
//! ## Non-goals
//!
//! This crate does not parse source text, does not render or print diffs,
//! and does not resolve merge conflicts between more than two trees — see
//! the module docs for the pieces it *does* own.

pub mod cancellation;
pub mod comparer;
pub mod equivalence;
pub mod error;
pub mod fixture;
pub mod flatten;
pub mod formatting;
pub mod impact;
pub mod matcher;
pub mod node;
pub mod types;
pub mod visibility;

pub use cancellation::CancellationToken;
pub use comparer::compare;
pub use equivalence::are_equivalent;
pub use error::CompareError;
pub use flatten::{count_all, find_by_name, flatten, of_impact_at_least, of_kind};
pub use impact::{classify, ClassifyContext};
pub use node::{ExtractionContext, NodeDescriptor, SyntaxNode};
pub use types::{
    Change, ChangeType, DiffOptions, ImpactLevel, Location, Modifier, SymbolKind, Visibility,
    WhitespaceMode,
};
