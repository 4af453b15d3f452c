use crate::Profiler;
use crate::pal::PlatformFacade;

/// Creates instances of [`Profiler`].
///
/// Required parameters: none.
///
/// Use [`Profiler::builder()`] to obtain a builder.
///
/// # Examples
///
/// ```
/// use persistent_profiler::Profiler;
///
/// let profiler = Profiler::builder().enabled(false).build();
///
/// // A disabled profiler records nothing.
/// profiler.start("ignored");
/// assert!(profiler.stop("ignored").is_none());
/// ```
#[derive(Debug)]
#[must_use]
pub struct ProfilerBuilder {
    enabled: bool,
    platform: PlatformFacade,
}

impl ProfilerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            enabled: true,
            platform: PlatformFacade::real(),
        }
    }

    /// Whether the profiler records anything. Defaults to `true`.
    ///
    /// This can only switch a profiler off. If the package is built without the `enabled`
    /// feature, every profiler is disabled regardless of this setting.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: impl Into<PlatformFacade>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Builds the profiler with the configured options.
    #[must_use]
    pub fn build(self) -> Profiler {
        Profiler::new(cfg!(feature = "enabled") && self.enabled, self.platform)
    }
}
