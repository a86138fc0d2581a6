//! The [`Agenda`] — one day's non-overlapping schedule plus need ledger.
//!
//! # Invariants
//!
//! - Entries never overlap: [`Agenda::insert`] rejects any interval that
//!   shares a minute with an existing entry.
//! - Every entry carries both its activity and its target node in one value,
//!   so the activity keys and location keys of a day can never diverge.
//! - A *fully planned* day tiles `[0, 1440)` exactly; `first_gap` returns
//!   `None` precisely then.
//!
//! An agent holds three agendas: the committed one being executed, the joint
//! one holding network commitments (rebuilt before each day), and transient
//! candidates produced by the plan generator and discarded after selection.

use std::collections::BTreeMap;

use ats_core::{ActivityId, Interval, NeedLedger, NodeId, MINUTES_PER_DAY};

use crate::error::{AgendaError, AgendaResult};

// ── AgendaEntry ───────────────────────────────────────────────────────────────

/// One scheduled episode: an interval, the activity performed during it, and
/// the node it is performed at.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgendaEntry {
    pub interval: Interval,
    pub activity: ActivityId,
    /// Target node, resolved once when the entry is written.
    pub node: NodeId,
}

// ── Agenda ────────────────────────────────────────────────────────────────────

/// Ordered, non-overlapping mapping of minute intervals to scheduled
/// episodes, with an embedded [`NeedLedger`].
#[derive(Clone, Debug, Default)]
pub struct Agenda {
    /// Entries keyed by interval start minute.
    entries: BTreeMap<u32, AgendaEntry>,
    ledger: NeedLedger,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert an entry, rejecting overlap with any existing entry.
    pub fn insert(&mut self, entry: AgendaEntry) -> AgendaResult<()> {
        let iv = entry.interval;
        if iv.is_empty() {
            return Err(AgendaError::EmptyInterval(iv.start));
        }
        if self.overlaps(iv) {
            return Err(AgendaError::Overlap { interval: iv });
        }
        self.entries.insert(iv.start, entry);
        Ok(())
    }

    /// Remove all entries and zero the ledger.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ledger.reset();
    }

    /// Clone this agenda as the starting point for further planning.
    pub fn working_copy(&self) -> Agenda {
        self.clone()
    }

    /// Zero the ledger, keeping the entries (used when a candidate's planned
    /// ledger is replaced by execution-time accounting).
    pub fn reset_ledger(&mut self) {
        self.ledger.reset();
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `interval` shares at least one minute with an entry.
    pub fn overlaps(&self, interval: Interval) -> bool {
        // Only the nearest entry starting at-or-before the interval end can
        // overlap from the left; anything starting inside overlaps directly.
        self.entries
            .range(..interval.end)
            .next_back()
            .is_some_and(|(_, e)| e.interval.overlaps(interval))
    }

    /// The entry covering `minute`, if any.
    pub fn entry_at(&self, minute: u32) -> Option<&AgendaEntry> {
        self.entries
            .range(..=minute)
            .next_back()
            .map(|(_, e)| e)
            .filter(|e| e.interval.contains(minute))
    }

    /// The entry ending exactly at `minute` (the episode immediately
    /// preceding a gap starting there).
    pub fn entry_before(&self, minute: u32) -> Option<&AgendaEntry> {
        self.entries
            .range(..minute)
            .next_back()
            .map(|(_, e)| e)
            .filter(|e| e.interval.end == minute)
    }

    /// First scheduled entry of the day.
    pub fn first(&self) -> Option<&AgendaEntry> {
        self.entries.values().next()
    }

    /// Last scheduled entry of the day.
    pub fn last(&self) -> Option<&AgendaEntry> {
        self.entries.values().next_back()
    }

    /// The first uncovered interval of the day, or `None` if the agenda
    /// tiles `[0, 1440)` completely.
    pub fn first_gap(&self) -> Option<Interval> {
        let mut cursor = 0;
        for entry in self.entries.values() {
            if entry.interval.start > cursor {
                return Some(Interval::new(cursor, entry.interval.start));
            }
            cursor = entry.interval.end;
        }
        (cursor < MINUTES_PER_DAY).then(|| Interval::new(cursor, MINUTES_PER_DAY))
    }

    /// `true` once the whole day is covered.
    pub fn is_fully_planned(&self) -> bool {
        self.first_gap().is_none()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &AgendaEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Ledger access ─────────────────────────────────────────────────────

    pub fn ledger(&self) -> &NeedLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut NeedLedger {
        &mut self.ledger
    }
}
