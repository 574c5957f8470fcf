//! Failure modes for `compare` (spec.md §4.5.5, §7).
//!
//! Deliberately small: an incompatible tree shape is not an error (spec.md
//! §4.5.5 treats it as a valid `Modified` comparison — everything on one
//! side, nothing matching on the other), so it never appears here. Only the
//! two cases that genuinely cannot produce a `Vec<Change>` do.

use thiserror::Error;

/// Why a comparison could not complete.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompareError {
    /// A required root node was absent. The `&'static str` names which
    /// side (`"old"` or `"new"`).
    #[error("{0} tree root is required but was not provided")]
    NullInput(&'static str),

    /// The supplied `CancellationToken` was observed cancelled mid-compare.
    #[error("comparison was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_input_message_names_the_side() {
        let err = CompareError::NullInput("old");
        assert_eq!(err.to_string(), "old tree root is required but was not provided");
    }

    #[test]
    fn cancelled_has_a_stable_message() {
        assert_eq!(CompareError::Cancelled.to_string(), "comparison was cancelled");
    }
}
