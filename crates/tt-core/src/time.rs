//! Simulation time model.
//!
//! One tick is one simulated minute.  Time is a monotonically increasing
//! `Minute` counter from the start of day 0; schedules are expressed in
//! minute-of-day (`0..MINUTES_PER_DAY`).  Integer minutes keep every schedule
//! comparison exact.

use std::fmt;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: u32 = 1_440;

/// Buckets in an hourly histogram.
pub const HOURS_PER_DAY: usize = 24;

// ── Minute ────────────────────────────────────────────────────────────────────

/// An absolute simulation minute, counted from day 0 at 00:00.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minute(pub u32);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// Minute within the current day, in `0..MINUTES_PER_DAY`.
    #[inline]
    pub fn of_day(self) -> u32 {
        self.0 % MINUTES_PER_DAY
    }

    /// Hour within the current day, in `0..HOURS_PER_DAY`.
    #[inline]
    pub fn hour_of_day(self) -> usize {
        (self.of_day() / 60) as usize
    }

    /// Whole days elapsed.
    #[inline]
    pub fn day(self) -> u32 {
        self.0 / MINUTES_PER_DAY
    }
}

impl std::ops::Add<u32> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: u32) -> Minute {
        Minute(self.0 + rhs)
    }
}

impl std::ops::Sub for Minute {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Minute) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.of_day();
        write!(f, "day {} {:02}:{:02}", self.day(), m / 60, m % 60)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The driver's clock.  Advanced by exactly one minute per tick.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Minute the run started at (restored by `reset`).
    pub start: Minute,
    /// The current minute.
    pub current: Minute,
}

impl SimClock {
    pub fn new(start: Minute) -> Self {
        Self { start, current: start }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current + 1;
    }

    /// Minutes elapsed since `start`.
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.current - self.start
    }

    pub fn reset(&mut self) {
        self.current = self.start;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} min)", self.current, self.elapsed())
    }
}
