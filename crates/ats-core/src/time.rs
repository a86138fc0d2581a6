//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter where one
//! tick is one simulated minute.  A canonical day is `MINUTES_PER_DAY` ticks,
//! so for absolute tick `t`:
//!
//! ```text
//! day_index     = t / 1440
//! minute_of_day = t % 1440
//! weekday       = start_weekday advanced by day_index
//! ```
//!
//! Using an integer minute as the canonical unit keeps all agenda arithmetic
//! exact and comparisons O(1).  Schedule positions within a day are expressed
//! as half-open [`Interval`]s of minutes, `[start, end)`.

use std::fmt;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Length of one canonical day in ticks (minutes).
pub const MINUTES_PER_DAY: u32 = 1_440;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (simulated minutes since sim start).
///
/// Stored as `u64`: at one tick per minute a u64 lasts far longer than any
/// conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Minute offset within the current canonical day.
    #[inline]
    pub fn minute_of_day(self) -> u32 {
        (self.0 % MINUTES_PER_DAY as u64) as u32
    }

    /// Index of the current canonical day, counted from sim start.
    #[inline]
    pub fn day_index(self) -> u64 {
        self.0 / MINUTES_PER_DAY as u64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Weekday ──────────────────────────────────────────────────────────────────

/// Day of the simulated week.  Activity availability calendars are keyed by
/// weekday, so the clock must expose it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order, `Monday` first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Position in [`Weekday::ALL`].
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// The weekday `days` calendar days after `self`.
    #[inline]
    pub fn advanced_by(self, days: u64) -> Weekday {
        Weekday::ALL[(self.idx() as u64 + days) as usize % 7]
    }

    /// `true` for Monday through Friday.
    #[inline]
    pub fn is_workday(self) -> bool {
        !matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Lower-case three-letter label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday    => "mon",
            Weekday::Tuesday   => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday  => "thu",
            Weekday::Friday    => "fri",
            Weekday::Saturday  => "sat",
            Weekday::Sunday    => "sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Interval ─────────────────────────────────────────────────────────────────

/// A half-open minute range `[start, end)` within one canonical day.
///
/// Agendas are keyed by these; all schedule arithmetic (gap search, overlap
/// tests, travel splitting) happens on `Interval` values.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// First minute covered.
    pub start: u32,
    /// First minute *not* covered.  `end <= MINUTES_PER_DAY`.
    pub end: u32,
}

impl Interval {
    /// Construct an interval.
    ///
    /// # Panics
    /// Panics in debug mode if `start > end` or `end > MINUTES_PER_DAY`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "interval start must not exceed end");
        debug_assert!(end <= MINUTES_PER_DAY, "interval must fit one day");
        Self { start, end }
    }

    /// Interval of `duration` minutes from `start`, clipped to day's end.
    #[inline]
    pub fn clipped(start: u32, duration: u32) -> Self {
        Self::new(start, (start + duration).min(MINUTES_PER_DAY))
    }

    /// The whole canonical day, `[0, 1440)`.
    #[inline]
    pub fn full_day() -> Self {
        Self::new(0, MINUTES_PER_DAY)
    }

    #[inline]
    pub fn duration(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// `true` if `minute` falls inside `[start, end)`.
    #[inline]
    pub fn contains(self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }

    /// `true` if the two half-open ranges share at least one minute.
    #[inline]
    pub fn overlaps(self, other: Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}, {:02}:{:02})",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps the absolute tick counter onto calendar terms (day, weekday, minute).
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Weekday of day 0.
    pub start_weekday: Weekday,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_weekday: Weekday) -> Self {
        Self { start_weekday, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick (one simulated minute).
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn day_index(&self) -> u64 {
        self.current_tick.day_index()
    }

    #[inline]
    pub fn minute_of_day(&self) -> u32 {
        self.current_tick.minute_of_day()
    }

    /// Weekday of the current simulated day.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.start_weekday.advanced_by(self.day_index())
    }

    /// `true` at the first tick of a canonical day.
    #[inline]
    pub fn is_day_start(&self) -> bool {
        self.minute_of_day() == 0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.minute_of_day();
        write!(
            f,
            "day {} ({}) {:02}:{:02}",
            self.day_index(),
            self.weekday(),
            m / 60,
            m % 60
        )
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration, filled by the application crate and
/// passed to the engine builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of canonical days to simulate.
    pub days: u64,

    /// Weekday of the first simulated day.
    pub start_weekday: Weekday,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.days * MINUTES_PER_DAY as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_weekday)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: 1,
            start_weekday: Weekday::Monday,
            seed: 0,
        }
    }
}
