//! CSV diary backend.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::row::EpisodeRow;
use crate::OutputResult;

/// Writes activity-diary episodes to a single CSV file.
pub struct DiaryWriter<W: Write> {
    episodes: Writer<W>,
    finished: bool,
}

impl DiaryWriter<File> {
    /// Open (or create) `episodes.csv` in `dir` and write the header row.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(dir.join("episodes.csv"))?)
    }
}

impl<W: Write> DiaryWriter<W> {
    /// Wrap any writer (used directly by tests with an in-memory buffer).
    pub fn from_writer(writer: W) -> OutputResult<Self> {
        let mut episodes = Writer::from_writer(writer);
        episodes.write_record([
            "day",
            "agent_id",
            "start_minute",
            "end_minute",
            "activity",
            "occupancy",
            "node",
        ])?;
        Ok(Self { episodes, finished: false })
    }

    /// Write a batch of episode rows.
    pub fn write_episodes(&mut self, rows: &[EpisodeRow]) -> OutputResult<()> {
        for row in rows {
            self.episodes.write_record(&[
                row.day.to_string(),
                row.agent_id.to_string(),
                row.start_minute.to_string(),
                row.end_minute.to_string(),
                row.activity.clone(),
                row.occupancy.to_string(),
                row.node.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush the underlying file.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.episodes.flush()?;
        Ok(())
    }

    /// Unwrap the inner writer (e.g. to inspect an in-memory buffer).
    pub fn into_inner(self) -> OutputResult<W> {
        Ok(self.episodes.into_inner()?)
    }
}
