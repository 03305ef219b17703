use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Supersession counter for scheduled work tied to an input field.
///
/// Each scheduled task takes a token from [`Generation::next`]; any later
/// `next` call supersedes it. When the task wakes up it checks
/// [`Generation::is_current`] and commits nothing if it lost the race.
/// The same mechanism guards in-flight search requests: a response whose
/// token is stale is discarded instead of overwriting newer results.
///
/// Clones share the counter, so a handle can be moved into a spawned
/// future while the component keeps issuing new tokens.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every outstanding token.
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `token` is still the latest generation.
    pub fn is_current(&self, token: u64) -> bool {
        self.counter.load(Ordering::SeqCst) == token
    }
}
