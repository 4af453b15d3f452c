use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::ERR_POISONED_LOCK;
use crate::pal::{Platform, PlatformFacade};

/// Millisecond stopwatch shared by every thread of a profiler.
///
/// Starts lazily on the first reading and can be restarted from zero. After it has started,
/// readers only take a shared lock.
#[derive(Debug)]
pub(crate) struct Stopwatch {
    platform: PlatformFacade,

    // None until the first reading.
    started_at: RwLock<Option<Instant>>,
}

impl Stopwatch {
    pub(crate) fn new(platform: PlatformFacade) -> Self {
        Self {
            platform,
            started_at: RwLock::new(None),
        }
    }

    /// Milliseconds since the stopwatch was (re)started, starting it if necessary.
    pub(crate) fn elapsed_millis(&self) -> u64 {
        let now = self.platform.now();
        let started_at = self.started_at_or_start(now);

        whole_millis(now.saturating_duration_since(started_at))
    }

    /// Discards the current epoch and starts counting from zero again.
    pub(crate) fn restart(&self) {
        let now = self.platform.now();

        *self.started_at.write().expect(ERR_POISONED_LOCK) = Some(now);
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.started_at.read().expect(ERR_POISONED_LOCK).is_some()
    }

    fn started_at_or_start(&self, now: Instant) -> Instant {
        // Almost always already started, so we try the cheap path first.
        if let Some(started_at) = *self.started_at.read().expect(ERR_POISONED_LOCK) {
            return started_at;
        }

        // Another thread may have won the race in between, in which case its epoch stays.
        *self
            .started_at
            .write()
            .expect(ERR_POISONED_LOCK)
            .get_or_insert(now)
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
