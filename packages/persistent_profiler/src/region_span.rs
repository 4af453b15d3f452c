use std::marker::PhantomData;

use crate::Profiler;

/// Times a region from creation until drop.
///
/// Equivalent to calling [`Profiler::start()`] on creation and [`Profiler::stop()`] on drop,
/// on whatever thread the span is created on. Spans are not `Send`, so the stop always
/// happens on the same thread as the start.
///
/// # Examples
///
/// ```
/// use persistent_profiler::Profiler;
///
/// let profiler = Profiler::builder().build();
///
/// {
///     let _span = profiler.region("load_assets");
///     // Work happens here.
/// } // Elapsed time is recorded here.
///
/// # #[cfg(feature = "enabled")]
/// assert_eq!(profiler.report().len(), 1);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct RegionSpan<'p> {
    profiler: &'p Profiler,

    // None if the profiler was disabled when the span was created.
    name: Option<String>,

    // The pending start lives on the creating thread, so the stop must happen there, too.
    _single_threaded: PhantomData<*const ()>,
}

impl<'p> RegionSpan<'p> {
    pub(crate) fn new(profiler: &'p Profiler, name: String) -> Self {
        profiler.start(&name);

        Self {
            profiler,
            name: Some(name),
            _single_threaded: PhantomData,
        }
    }

    /// A span that records nothing, for a disabled profiler.
    pub(crate) fn inert(profiler: &'p Profiler) -> Self {
        Self {
            profiler,
            name: None,
            _single_threaded: PhantomData,
        }
    }

    /// The name of the region being timed, or an empty string if the profiler is disabled.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Drop for RegionSpan<'_> {
    fn drop(&mut self) {
        // A span always has its own start, so this cannot be mismatched unless someone
        // stopped the same name manually inside the span.
        if let Some(name) = &self.name {
            _ = self.profiler.stop(name);
        }
    }
}
