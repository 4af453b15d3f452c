use std::thread::ThreadId;

use thiserror::Error;

/// Errors that can occur when stopping a profiled region.
///
/// Only [`Profiler::try_stop()`][crate::Profiler::try_stop] hands these to the caller. All
/// other operations log the problem and carry on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A region was stopped on a thread that had no unmatched start for it.
    #[error("mismatched profiler timing for '{name}' on thread {thread:?}: stop without start")]
    MismatchedStop {
        /// Name of the region that was stopped.
        name: String,

        /// The thread that called stop.
        thread: ThreadId,
    },

    /// The profiler is disabled, either at build time or when it was created.
    #[error("the profiler is disabled")]
    Disabled,
}

/// A specialized `Result` type for profiler operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
