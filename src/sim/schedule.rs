//! Tick-counted timer queue
//!
//! Replaces wall-clock intervals and timeouts. The clock only advances while
//! the run is active, and due tasks are drained once per tick before the
//! update phase, so timers can never interleave with a tick.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Work a timer performs when it comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Periodic: place one or two obstacles
    SpawnObstacles,
    /// Periodic: try to place a collectible
    SpawnCollectible,
    /// Periodic: raise the scroll speed
    RampSpeed,
    /// One-shot: end one slow-rune debuff
    RestoreSpeed,
    /// One-shot: the ultimate's delayed board clear
    RequiemClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled {
    due: u64,
    /// Insertion order, so equal due ticks fire FIFO
    seq: u64,
    task: TimerTask,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler tick
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to fire `delay` ticks from now (at least one tick out)
    pub fn schedule_in(&mut self, delay: u64, task: TimerTask) {
        let due = self.now + delay.max(1);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled { due, seq, task }));
    }

    /// Advance the clock by one tick
    pub fn advance(&mut self) {
        self.now += 1;
    }

    /// Pop the next task due at or before the current tick
    pub fn pop_due(&mut self) -> Option<TimerTask> {
        match self.queue.peek() {
            Some(Reverse(next)) if next.due <= self.now => {
                self.queue.pop().map(|Reverse(s)| s.task)
            }
            _ => None,
        }
    }

    /// Number of pending tasks of a given kind
    pub fn pending(&self, task: TimerTask) -> usize {
        self.queue.iter().filter(|Reverse(s)| s.task == task).count()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending task and rewind the clock
    pub fn clear(&mut self) {
        self.queue.clear();
        self.now = 0;
        self.next_seq = 0;
    }
}
