//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::Platform;

/// Fake clock whose time only moves when a test advances it.
///
/// Clones share the same underlying time, so a test can keep one clone and hand
/// another to the profiler under test.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the fake time forward by the given number of milliseconds.
    pub(crate) fn advance_millis(&self, millis: u64) {
        let mut offset = self
            .offset
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *offset = offset
            .checked_add(Duration::from_millis(millis))
            .expect("fake time does not get anywhere near Duration::MAX in tests");
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        let offset = *self
            .offset
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        self.origin
            .checked_add(offset)
            .expect("fake time does not get anywhere near Instant overflow in tests")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn time_stands_still_until_advanced() {
        let platform = FakePlatform::new();

        assert_eq!(platform.now(), platform.now());
    }

    #[test]
    fn advance_moves_time_forward() {
        let platform = FakePlatform::new();
        let before = platform.now();

        platform.advance_millis(150);

        assert_eq!(
            platform.now().duration_since(before),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn clones_share_time() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();
        let before = platform2.now();

        platform1.advance_millis(40);

        assert_eq!(
            platform2.now().duration_since(before),
            Duration::from_millis(40)
        );
    }
}
