//! Core data model for the diff engine.
//!
//! Mirrors the three-kind split the teacher crate used for its own CST
//! (`Leaf` / `Constructed` / `List`), but at a higher level: this crate
//! never materializes a generic tree type of its own — it works against
//! whatever tree a `SyntaxNode` implementation presents (see `node.rs`)
//! and only ever constructs the output types below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared accessibility of a symbol.
///
/// Closed set — adding a variant here is a breaking change to every
/// exhaustive `match` in the crate, which is the point (see the design
/// note in spec.md §9 about closed sum types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    ProtectedInternal,
    Protected,
    Internal,
    PrivateProtected,
    Private,
    /// Parameters and block-local declarations — not really an
    /// accessibility level, but `SiblingMatcher`/`ImpactClassifier` need
    /// somewhere to put them.
    Local,
}

impl Visibility {
    /// `Public ∪ Protected ∪ ProtectedInternal` — visible to external
    /// consumers of the assembly/package.
    #[must_use]
    pub fn is_public_api(self) -> bool {
        matches!(
            self,
            Visibility::Public | Visibility::Protected | Visibility::ProtectedInternal
        )
    }

    /// `Internal ∪ PrivateProtected` — visible within the same
    /// assembly/package but not outside it.
    #[must_use]
    pub fn is_internal_api(self) -> bool {
        matches!(self, Visibility::Internal | Visibility::PrivateProtected)
    }

    /// 2 for public-API-exposed, 1 for internal-API-exposed, 0 otherwise.
    fn exposure_rank(self) -> u8 {
        if self.is_public_api() {
            2
        } else if self.is_internal_api() {
            1
        } else {
            0
        }
    }

    /// The more exposed of `self` and `other`. Used when a declaration's
    /// visibility itself changed — a narrowing from `Public` to `Private`
    /// should still be judged against the audience that loses access, not
    /// the narrower one left behind.
    #[must_use]
    pub fn most_exposed(self, other: Visibility) -> Visibility {
        if self.exposure_rank() >= other.exposure_rank() {
            self
        } else {
            other
        }
    }
}

/// A single declared accessibility modifier token, as reported by the
/// parser. `VisibilityExtractor` (see `visibility.rs`) interprets *sets*
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
}

/// Kind of declaration a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    Namespace,
    /// class / struct / record / interface / enum.
    Type,
    Method,
    Constructor,
    Property,
    Indexer,
    Field,
    Event,
    Delegate,
    Operator,
    EnumMember,
    Parameter,
    Local,
}

/// What kind of change a `Change` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Renamed,
    Moved,
    Unchanged,
}

/// Severity of a change for downstream consumers.
///
/// Variants are declared in ascending severity order so that the derived
/// `Ord` implementation gives exactly the ordering spec.md §3 requires
/// (`FormattingOnly < NonBreaking < BreakingInternalApi <
/// BreakingPublicApi`) — the same trick the teacher's `Confidence` enum
/// uses for its own three-level ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLevel {
    FormattingOnly,
    NonBreaking,
    #[serde(rename = "breaking-internal")]
    BreakingInternalApi,
    #[serde(rename = "breaking-public")]
    BreakingPublicApi,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImpactLevel::FormattingOnly => "formatting-only",
            ImpactLevel::NonBreaking => "non-breaking",
            ImpactLevel::BreakingInternalApi => "breaking-internal",
            ImpactLevel::BreakingPublicApi => "breaking-public",
        };
        write!(f, "{s}")
    }
}

/// How textual content is compared inside `are_equivalent` (C4) and the
/// formatting discriminator (C7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitespaceMode {
    Exact,
    IgnoreLeadingTrailing,
    IgnoreAll,
    LanguageAware,
}

/// A location in a source file. Lines and columns are 1-based; `end_line`
/// is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub start_col: u32,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>, start_line: u32, end_line: u32, start_col: u32) -> Self {
        debug_assert!(start_line >= 1, "lines are 1-based");
        debug_assert!(end_line >= start_line, "end_line must be >= start_line");
        Self {
            path: path.into(),
            start_line,
            end_line,
            start_col,
        }
    }
}

/// One node in the hierarchical change forest.
///
/// `children` is non-empty only for a `Modified` change whose modification
/// originates from nested declaration changes — see the invariant list in
/// spec.md §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub kind: SymbolKind,
    pub name: Option<String>,
    pub old_location: Option<Location>,
    pub new_location: Option<Location>,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
    pub impact: ImpactLevel,
    pub caveats: Vec<String>,
    pub children: Vec<Change>,
}

impl Change {
    /// The line used to sort this change among its siblings:
    /// `new_location.start_line`, falling back to `old_location` (used by
    /// `Removed` changes, which have no new location).
    #[must_use]
    pub fn sort_line(&self) -> u32 {
        self.new_location
            .as_ref()
            .or(self.old_location.as_ref())
            .map(|l| l.start_line)
            .unwrap_or(0)
    }

    /// `true` if `children` is non-empty.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Recognized diff options — a closed set (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    pub whitespace_mode: WhitespaceMode,
    pub include_formatting: bool,
    pub minimum_impact: ImpactLevel,
    pub ignore_comments: bool,
    pub parallel_threshold: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            whitespace_mode: WhitespaceMode::Exact,
            include_formatting: true,
            minimum_impact: ImpactLevel::FormattingOnly,
            ignore_comments: false,
            parallel_threshold: 4,
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_whitespace_mode(mut self, mode: WhitespaceMode) -> Self {
        self.whitespace_mode = mode;
        self
    }

    #[must_use]
    pub fn with_include_formatting(mut self, include: bool) -> Self {
        self.include_formatting = include;
        self
    }

    #[must_use]
    pub fn with_minimum_impact(mut self, level: ImpactLevel) -> Self {
        self.minimum_impact = level;
        self
    }

    #[must_use]
    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
