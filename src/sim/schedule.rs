//! Delayed events on the simulation clock
//!
//! Handlers never trust the world they were scheduled in: each event carries
//! a stamp and is dropped if the state no longer holds the same stamp.

use serde::{Deserialize, Serialize};

/// Something that fires after a delay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedEvent {
    /// Reveal a mystery egg's contents to the racer that opened it
    RevealEgg {
        egg_id: String,
        racer_id: String,
        stamp: u64,
    },
    /// Voice boost runs out
    EndVoiceBoost { stamp: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    fire_at: f64,
    /// Insertion order, breaks ties between events due at the same time
    seq: u64,
    event: DelayedEvent,
}

/// Simulation clock plus pending events. Outlives race resets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: f64,
    next_stamp: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in ms
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn advance(&mut self, delta: f32) {
        self.now += delta.max(0.0) as f64;
    }

    /// A stamp no earlier call has returned
    pub fn next_stamp(&mut self) -> u64 {
        self.next_stamp += 1;
        self.next_stamp
    }

    pub fn schedule(&mut self, delay: f32, event: DelayedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            fire_at: self.now + delay.max(0.0) as f64,
            seq,
            event,
        });
    }

    /// Remove and return all events due by now, earliest first
    pub fn drain_due(&mut self) -> Vec<DelayedEvent> {
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.fire_at <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.event).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
