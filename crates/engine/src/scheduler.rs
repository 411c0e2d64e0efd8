//! Cancellable repeating tick schedule.
//!
//! The timer does not sleep on its own. The owner asks for
//! [`TickTimer::next_deadline`], waits however it likes, then calls
//! [`TickTimer::fire_if_due`]. Being generic over the instant type lets the
//! same schedule run against `std::time::Instant`, `tokio::time::Instant` or
//! a plain test clock.

use std::ops::Add;
use std::time::Duration;

/// A single firing of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<I> {
    /// Deadline that was due.
    pub due: I,
    /// Schedule generation this firing belongs to.
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct TickTimer<I> {
    interval: Duration,
    next: Option<I>,
    /// Bumped on every arm and cancel; a superseded schedule never fires.
    generation: u64,
}

impl<I> Default for TickTimer<I> {
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            next: None,
            generation: 0,
        }
    }
}

impl<I> TickTimer<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// A disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh schedule firing every `interval`, first at `now + interval`.
    ///
    /// Any pending schedule is cancelled first.
    pub fn arm(&mut self, now: I, interval: Duration) {
        self.cancel();
        self.interval = interval;
        self.next = Some(now + interval);
    }

    pub fn cancel(&mut self) {
        self.next = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Period of the current (or last) schedule.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Option<I> {
        self.next
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fire once if the deadline has passed.
    ///
    /// The next deadline is one interval after the one that was due, unless
    /// that has already passed too. Missed ticks are dropped, never replayed:
    /// a late call fires once and the schedule restarts from `now`.
    pub fn fire_if_due(&mut self, now: I) -> Option<Fired<I>> {
        let due = self.next?;
        if now < due {
            return None;
        }
        let on_cadence = due + self.interval;
        self.next = Some(if on_cadence > now {
            on_cadence
        } else {
            now + self.interval
        });
        Some(Fired {
            due,
            generation: self.generation,
        })
    }
}
