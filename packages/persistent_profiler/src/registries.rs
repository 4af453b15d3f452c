use std::sync::{Mutex, RwLock};
use std::thread::ThreadId;

use foldhash::{HashMap, HashMapExt};

use crate::{ERR_POISONED_LOCK, RegionTotal};

/// Everything the profiler knows about one thread.
///
/// Only the owning thread modifies this, except for `reset` which discards it wholesale.
/// Reports read the totals from other threads.
#[derive(Debug, Default)]
pub(crate) struct ThreadTables {
    // Start timestamps (milliseconds since the stopwatch epoch) of unmatched starts, per
    // region name. The last element is the most recent start.
    pending: HashMap<String, Vec<u64>>,

    totals: HashMap<String, RegionTotal>,
}

impl ThreadTables {
    pub(crate) fn push_start(&mut self, name: &str, started_at_millis: u64) {
        if let Some(stack) = self.pending.get_mut(name) {
            stack.push(started_at_millis);
        } else {
            self.pending.insert(name.to_owned(), vec![started_at_millis]);
        }
    }

    /// Removes and returns the most recent unmatched start for `name`, if any.
    pub(crate) fn pop_start(&mut self, name: &str) -> Option<u64> {
        self.pending.get_mut(name)?.pop()
    }

    /// Adds one completed call to the totals of `name` and returns the updated totals.
    pub(crate) fn add_elapsed(&mut self, name: &str, elapsed_millis: u64) -> RegionTotal {
        let total = if let Some(total) = self.totals.get_mut(name) {
            total
        } else {
            self.totals.entry(name.to_owned()).or_default()
        };

        total.record(elapsed_millis);
        *total
    }

    pub(crate) fn totals(&self) -> impl Iterator<Item = (&str, &RegionTotal)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), total))
    }

    /// Number of starts that are still waiting for their stop, over all region names.
    pub(crate) fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }
}

/// The tables of every thread that has touched a profiler.
///
/// The outer lock guards the structure (which threads exist). Threads modify their own
/// tables while holding the outer lock in shared mode, so they never contend with each
/// other. Adding a thread and resetting take the outer lock exclusively. Reports hold it
/// in shared mode for the whole merge, so they see a consistent set of threads.
///
/// The inner lock is only ever contended between a thread and a concurrent report. We hold
/// it for the whole counter update instead of making the counters atomic because that keeps
/// each start/stop a single consistent step, and reports are rare.
#[derive(Debug)]
pub(crate) struct ThreadTableRegistry {
    threads: RwLock<HashMap<ThreadId, Mutex<ThreadTables>>>,
}

impl ThreadTableRegistry {
    pub(crate) fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
        }
    }

    /// Runs `f` on the tables of `thread_id`, creating them on first use.
    pub(crate) fn with_thread<R>(
        &self,
        thread_id: ThreadId,
        f: impl FnOnce(&mut ThreadTables) -> R,
    ) -> R {
        // Most likely the thread is already registered, so we try being optimistic.
        {
            let threads = self.threads.read().expect(ERR_POISONED_LOCK);

            if let Some(tables) = threads.get(&thread_id) {
                return f(&mut tables.lock().expect(ERR_POISONED_LOCK));
            }
        }

        // The thread was not registered. Let's register it now.
        let mut threads = self.threads.write().expect(ERR_POISONED_LOCK);

        let tables = threads
            .entry(thread_id)
            .or_insert_with(|| Mutex::new(ThreadTables::default()));

        f(tables.get_mut().expect(ERR_POISONED_LOCK))
    }

    /// Like `with_thread` but does not register the thread if it is not already known.
    pub(crate) fn with_existing_thread<R>(
        &self,
        thread_id: ThreadId,
        f: impl FnOnce(&ThreadTables) -> R,
    ) -> Option<R> {
        let threads = self.threads.read().expect(ERR_POISONED_LOCK);

        threads
            .get(&thread_id)
            .map(|tables| f(&tables.lock().expect(ERR_POISONED_LOCK)))
    }

    /// Inspects the tables of all threads via a callback.
    ///
    /// This holds the structure lock in shared mode, so the callback must not call back into
    /// the registry for a thread that might not yet be registered, under threat of deadlock.
    pub(crate) fn inspect(&self, mut f: impl FnMut(&ThreadId, &ThreadTables)) {
        let threads = self.threads.read().expect(ERR_POISONED_LOCK);

        for (thread_id, tables) in threads.iter() {
            let tables = tables.lock().expect(ERR_POISONED_LOCK);
            f(thread_id, &tables);
        }
    }

    /// Discards the tables of all threads, then calls `f` before any thread can touch the
    /// registry again.
    pub(crate) fn clear_then(&self, f: impl FnOnce()) {
        let mut threads = self.threads.write().expect(ERR_POISONED_LOCK);

        threads.clear();
        f();
    }
}
