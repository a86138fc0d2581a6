//! Plain data rows written by the diary backend.

/// One activity episode of one agent: a contiguous run of identical
/// (activity, occupancy, node) ticks within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRow {
    pub day: u64,
    pub agent_id: u32,
    /// First minute of the episode (minute of day).
    pub start_minute: u32,
    /// First minute *after* the episode.
    pub end_minute: u32,
    /// Activity name from the catalog ("?" if the id was invalid).
    pub activity: String,
    /// Occupancy label (`individual`, `joint`, `fallback`, `traveling`, …).
    pub occupancy: &'static str,
    /// Node id, or `u32::MAX` while in transit.
    pub node: u32,
}
