//! Virtual millisecond clock holding cancellable scheduled tasks.
//!
//! Every timed transition of a session lives here, so closing the timeline is
//! enough to guarantee nothing mutates the session after teardown.

use std::collections::{BTreeMap, HashMap};

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), T>,
    index: HashMap<TaskId, (u64, u64)>,
    closed: bool,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            index: HashMap::new(),
            closed: false,
        }
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of tasks still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Schedule `task` to fire `delay_ms` from now.
    ///
    /// A closed timeline hands back an id that will never fire.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let id = TaskId(seq);
        if self.closed {
            return id;
        }
        let key = (self.now_ms.saturating_add(delay_ms), seq);
        self.queue.insert(key, task);
        self.index.insert(id, key);
        id
    }

    /// Cancel a task; returns whether it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.index
            .remove(&id)
            .and_then(|key| self.queue.remove(&key))
            .is_some()
    }

    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to its due time.
    ///
    /// When nothing else is due the clock settles at `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let until_ms = until_ms.max(self.now_ms);
        let due = self
            .queue
            .first_key_value()
            .map(|(key, _)| *key)
            .filter(|(due, _)| *due <= until_ms);
        let Some(key) = due else {
            self.now_ms = until_ms;
            return None;
        };
        let task = self.queue.remove(&key)?;
        self.index.remove(&TaskId(key.1));
        self.now_ms = key.0;
        Some(task)
    }

    /// Cancel every pending task and ignore future scheduling.
    pub fn close(&mut self) {
        self.closed = true;
        self.queue.clear();
        self.index.clear();
    }
}
