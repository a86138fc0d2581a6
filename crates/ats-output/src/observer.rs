//! `DiaryObserver` — bridges `EngineObserver` to a `DiaryWriter`.

use std::io::Write;

use ats_agent::PopulationStore;
use ats_core::{ActivityId, Tick, Weekday, MINUTES_PER_DAY};
use ats_schedule::ActivityCatalog;
use ats_sim::{AgentStatus, EngineObserver};

use crate::diary::DiaryWriter;
use crate::row::EpisodeRow;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that coalesces tick statuses into activity
/// episodes and writes them through a [`DiaryWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check for them with
/// [`take_error`][Self::take_error].
pub struct DiaryObserver<W: Write> {
    writer: DiaryWriter<W>,
    /// Activity names snapshotted from the catalog, indexed by id.
    names: Vec<String>,
    /// Open episode per agent: (start minute, status at that minute).
    open: Vec<Option<(u32, AgentStatus)>>,
    day: u64,
    last_error: Option<OutputError>,
}

impl<W: Write> DiaryObserver<W> {
    /// Create an observer backed by `writer`; activity names are copied out
    /// of `catalog` so the observer holds no borrow during the run.
    pub fn new(writer: DiaryWriter<W>, catalog: &ActivityCatalog) -> Self {
        Self {
            writer,
            names: catalog.iter().map(|a| a.name.clone()).collect(),
            open: Vec::new(),
            day: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> DiaryWriter<W> {
        self.writer
    }

    fn activity_name(&self, id: ActivityId) -> String {
        self.names
            .get(id.index())
            .cloned()
            .unwrap_or_else(|| "?".into())
    }

    fn emit(&mut self, agent: usize, start: u32, end: u32, status: &AgentStatus) {
        let row = EpisodeRow {
            day: self.day,
            agent_id: agent as u32,
            start_minute: start,
            end_minute: end,
            activity: self.activity_name(status.activity),
            occupancy: status.occupancy.as_str(),
            node: status.node.0,
        };
        let result = self.writer.write_episodes(std::slice::from_ref(&row));
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> EngineObserver for DiaryObserver<W> {
    fn on_day_start(&mut self, day: u64, _weekday: Weekday) {
        self.day = day;
    }

    fn on_tick(&mut self, tick: Tick, statuses: &[AgentStatus]) {
        let minute = tick.minute_of_day();
        if self.open.len() < statuses.len() {
            self.open.resize(statuses.len(), None);
        }
        for (agent, status) in statuses.iter().enumerate() {
            match self.open[agent] {
                Some((_, open_status)) if open_status == *status => {}
                Some((start, open_status)) => {
                    self.emit(agent, start, minute, &open_status);
                    self.open[agent] = Some((minute, *status));
                }
                None => {
                    self.open[agent] = Some((minute, *status));
                }
            }
        }
    }

    fn on_day_end(&mut self, _day: u64, _pop: &PopulationStore) {
        // Close every still-open episode at the day boundary.
        let open = std::mem::take(&mut self.open);
        for (agent, slot) in open.iter().enumerate() {
            if let Some((start, status)) = slot {
                self.emit(agent, *start, MINUTES_PER_DAY, status);
            }
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
