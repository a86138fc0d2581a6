//! Weekly availability calendars.
//!
//! A [`WeekCalendar`] holds, per weekday, the start-time windows during which
//! an activity may *begin*.  Windows constrain starts, not whole durations —
//! an activity started inside a window may run past its end (the original
//! availability model; end-of-day clipping is the only duration bound).

use ats_core::{Interval, Weekday};

/// Per-weekday start-time windows.
///
/// Windows are kept sorted by start minute so lookups are a linear scan over
/// a short sorted list (activities rarely carry more than two or three
/// windows per day).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekCalendar {
    windows: [Vec<Interval>; 7],
}

impl WeekCalendar {
    /// A calendar with no windows — never available.
    pub fn new() -> Self {
        Self::default()
    }

    /// A calendar available at any start time on every weekday.
    pub fn always() -> Self {
        Self::new().with_daily(Interval::full_day())
    }

    /// Add `window` on one weekday.
    pub fn with_window(mut self, day: Weekday, window: Interval) -> Self {
        let list = &mut self.windows[day.idx()];
        list.push(window);
        list.sort_unstable_by_key(|w| w.start);
        self
    }

    /// Add `window` on every day of the week.
    pub fn with_daily(mut self, window: Interval) -> Self {
        for day in Weekday::ALL {
            self = self.with_window(day, window);
        }
        self
    }

    /// Add `window` on Monday through Friday.
    pub fn with_workdays(mut self, window: Interval) -> Self {
        for day in Weekday::ALL.into_iter().filter(|d| d.is_workday()) {
            self = self.with_window(day, window);
        }
        self
    }

    /// `true` if the activity may start at `minute` on `day`.
    pub fn allows(&self, day: Weekday, minute: u32) -> bool {
        self.windows[day.idx()].iter().any(|w| w.contains(minute))
    }

    /// `true` if no window exists on any weekday.
    pub fn is_empty(&self) -> bool {
        self.windows.iter().all(Vec::is_empty)
    }

    /// `true` if every minute of every weekday is an allowed start.
    pub fn is_always_available(&self) -> bool {
        Weekday::ALL.iter().all(|d| {
            // Sorted windows must cover [0, 1440) without a hole.
            let mut covered = 0;
            for w in &self.windows[d.idx()] {
                if w.start > covered {
                    return false;
                }
                covered = covered.max(w.end);
            }
            covered >= ats_core::MINUTES_PER_DAY
        })
    }

    /// Read-only windows for one weekday, sorted by start.
    pub fn windows_on(&self, day: Weekday) -> &[Interval] {
        &self.windows[day.idx()]
    }
}
