use std::fmt::Debug;
use std::time::Instant;

/// Source of monotonic timestamps.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Returns the current point in time. Never goes backwards.
    fn now(&self) -> Instant;
}
