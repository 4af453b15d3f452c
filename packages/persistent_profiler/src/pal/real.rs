use std::time::Instant;

use crate::pal::Platform;

/// Reads the operating system's monotonic clock.
#[derive(Debug, Default)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Cannot observe the difference from a fixed instant reliably.
    fn now(&self) -> Instant {
        Instant::now()
    }
}
