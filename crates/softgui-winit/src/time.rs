use std::time::{Duration, Instant};

use softgui_core::profiling::profile_function;

/// Timing information handed to [`App::tick`](crate::app::App::tick).
#[derive(Debug, Clone)]
pub struct FrameTime {
    /// Wall clock time of this tick
    pub now: Instant,
    /// Time elapsed since the last tick
    pub delta: Duration,
    /// Total time elapsed since app start
    pub elapsed: Duration,
    /// Total number of ticks delivered
    pub frame_count: u64,
}

impl FrameTime {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks time for the app loop
pub(crate) struct TimeTracker {
    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u64,
}

impl TimeTracker {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            frame_count: 0,
        }
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        profile_function!();
        let delta = now.saturating_duration_since(self.last_frame_time);
        let elapsed = now.saturating_duration_since(self.start_time);

        self.last_frame_time = now;
        self.frame_count += 1;

        FrameTime {
            now,
            delta,
            elapsed,
            frame_count: self.frame_count,
        }
    }
}

/// Fixed-period deadline tracking for the animation tick.
///
/// Deadlines advance by whole periods; if the loop fell behind by more than
/// one period the schedule restarts from `now` instead of bursting.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    period: Duration,
    next: Instant,
}

impl TickSchedule {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The instant the event loop should wake up at.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns true (and schedules the next deadline) when a tick is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
