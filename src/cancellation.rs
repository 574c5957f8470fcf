//! Cooperative cancellation (spec.md §5).
//!
//! A token is handed down through the recursion like any other argument —
//! never read from ambient/thread-local state — so the same comparison can
//! be driven from a single-threaded caller or fanned out over `rayon`
//! without either side needing to know which.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply cloneable flag checked at the start of every recursive step.
///
/// Cloning shares the same underlying flag (`Arc`), so cancelling one clone
/// cancels every clone — including ones already handed to `rayon` worker
/// threads.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
