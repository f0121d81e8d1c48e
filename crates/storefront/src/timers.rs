//! Delayed callbacks on a logical clock.
//!
//! Panel transitions need a short delay between two class changes. Instead
//! of sleeping, tasks are queued with a due time and released explicitly:
//! tests step the clock with [`Timers::advance`], the HTTP layer hands every
//! pending task to the browser with its remaining delay via [`Timers::drain`].

use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Queue of tasks due at points on a logical clock.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Timers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.pending.push(Scheduled {
            due: self.now + delay,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Drop pending tasks matching `predicate`.
    pub fn cancel(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.pending.retain(|s| !predicate(&s.task));
    }

    /// Move the clock forward and return the tasks that fell due, earliest
    /// first. Tasks due at the same time keep their scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Remove every pending task, returning each with its remaining delay,
    /// earliest first. The clock does not move.
    pub fn drain(&mut self) -> Vec<(Duration, T)> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|s| (s.due, s.seq));

        let now = self.now;
        pending
            .into_iter()
            .map(|s| (s.due.saturating_sub(now), s.task))
            .collect()
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
