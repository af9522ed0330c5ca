//! Single-threaded virtual clock with cancelable one-shot and repeating tasks.
//!
//! Nothing here sleeps. The owner advances the clock with [`Scheduler::advance`]
//! and then drains due tasks one at a time with [`Scheduler::pop_due`], so a
//! handler may cancel or schedule other tasks between two firings.

use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

struct Slot<T> {
    task: T,
    interval: Option<u64>,
    key: (u64, u64),
}

pub struct Scheduler<T> {
    now: u64,
    target: u64,
    next_id: u64,
    next_seq: u64,
    // (due_ms, seq) -> handle
    queue: BTreeMap<(u64, u64), TaskHandle>,
    slots: HashMap<TaskHandle, Slot<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            target: 0,
            next_id: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            slots: HashMap::new(),
        }
    }

    /// Current clock reading in milliseconds. While a task is being handled
    /// this is that task's due time.
    pub fn now_ms(&self) -> u64 {
        self.now
    }

    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        self.insert(delay_ms, None, task)
    }

    /// Fires `task` every `interval_ms` until canceled. The first firing is one
    /// interval from now.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TaskHandle {
        let interval = interval_ms.max(1);
        self.insert(interval, Some(interval), task)
    }

    /// Returns false if the handle already fired (one-shot) or was canceled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.slots.remove(&handle) {
            Some(slot) => {
                self.queue.remove(&slot.key);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.slots.contains_key(&handle)
    }

    pub fn pending(&self) -> usize {
        self.slots.len()
    }

    /// Moves the deadline forward. Tasks due up to the new deadline are
    /// handed out by [`Scheduler::pop_due`].
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.target = self.target.max(self.now).saturating_add(elapsed_ms);
    }

    /// Next task due at or before the deadline, in (due time, scheduling
    /// order). Repeating tasks are re-armed before being returned. Once
    /// nothing is due the clock settles on the deadline.
    pub fn pop_due(&mut self) -> Option<(TaskHandle, T)> {
        loop {
            let (&(due, seq), &handle) = match self.queue.first_key_value() {
                Some(entry) if entry.0 .0 <= self.target => entry,
                _ => {
                    self.now = self.now.max(self.target);
                    return None;
                }
            };
            self.queue.remove(&(due, seq));
            self.now = due;

            let Some(slot) = self.slots.get(&handle) else { continue };
            let task = slot.task.clone();
            let interval = slot.interval;
            match interval {
                Some(interval) => {
                    let key = (due + interval, self.bump_seq());
                    self.queue.insert(key, handle);
                    if let Some(slot) = self.slots.get_mut(&handle) {
                        slot.key = key;
                    }
                }
                None => {
                    self.slots.remove(&handle);
                }
            }
            return Some((handle, task));
        }
    }

    fn insert(&mut self, delay_ms: u64, interval: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let key = (self.now.saturating_add(delay_ms), self.bump_seq());
        self.queue.insert(key, handle);
        self.slots.insert(
            handle,
            Slot {
                task,
                interval,
                key,
            },
        );
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
