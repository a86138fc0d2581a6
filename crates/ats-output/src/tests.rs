//! Unit tests for ats-output.

use ats_core::{ActivityId, NodeId, Tick, Weekday, MINUTES_PER_DAY};
use ats_agent::{AgentSpec, PlaceSet, PopulationBuilder, PopulationStore};
use ats_core::NeedTimeSplit;
use ats_schedule::{ActivityCatalog, CatalogBuilder};
use ats_sim::{AgentStatus, EngineObserver, Occupancy};

use crate::{DiaryObserver, DiaryWriter, EpisodeRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn catalog() -> ActivityCatalog {
    let mut b = CatalogBuilder::new();
    b.add_travel();
    b.add_idles();
    b.build().unwrap()
}

fn population() -> PopulationStore {
    let mut b = PopulationBuilder::new(0);
    b.add_agent(AgentSpec {
        target: NeedTimeSplit::unmodeled(),
        places: PlaceSet::new(NodeId(0), NodeId(0), NodeId(0)),
        daily_caps: [1, 1, 1],
    });
    b.build().unwrap().0
}

fn status(activity: u16, occupancy: Occupancy, node: u32) -> AgentStatus {
    AgentStatus { activity: ActivityId(activity), occupancy, node: NodeId(node) }
}

fn run_statuses(per_tick: &[AgentStatus]) -> String {
    let writer = DiaryWriter::from_writer(Vec::new()).unwrap();
    let catalog = catalog();
    let pop = population();
    let mut observer = DiaryObserver::new(writer, &catalog);

    observer.on_day_start(0, Weekday::Monday);
    for (minute, status) in per_tick.iter().enumerate() {
        observer.on_tick(Tick(minute as u64), std::slice::from_ref(status));
    }
    observer.on_day_end(0, &pop);
    observer.on_sim_end(Tick(per_tick.len() as u64));
    assert!(observer.take_error().is_none());

    let buffer = observer.into_writer().into_inner().unwrap();
    String::from_utf8(buffer).unwrap()
}

// ── DiaryWriter ───────────────────────────────────────────────────────────────

#[test]
fn writes_header_and_rows() {
    let mut writer = DiaryWriter::from_writer(Vec::new()).unwrap();
    writer
        .write_episodes(&[EpisodeRow {
            day: 0,
            agent_id: 3,
            start_minute: 480,
            end_minute: 1_020,
            activity: "work".into(),
            occupancy: "individual",
            node: 7,
        }])
        .unwrap();
    writer.finish().unwrap();

    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "day,agent_id,start_minute,end_minute,activity,occupancy,node"
    );
    assert_eq!(lines.next().unwrap(), "0,3,480,1020,work,individual,7");
}

#[test]
fn finish_is_idempotent() {
    let mut writer = DiaryWriter::from_writer(Vec::new()).unwrap();
    writer.finish().unwrap();
    writer.finish().unwrap();
}

#[test]
fn create_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = DiaryWriter::create(dir.path()).unwrap();
    writer.finish().unwrap();
    assert!(dir.path().join("episodes.csv").exists());
}

// ── DiaryObserver ─────────────────────────────────────────────────────────────

#[test]
fn coalesces_identical_ticks_into_one_episode() {
    // Three ticks of the same status → exactly one row covering [0, 1440).
    let idle = status(1, Occupancy::Individual, 0);
    let text = run_statuses(&[idle, idle, idle]);
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("0,0,0,1440,"));
}

#[test]
fn splits_on_occupancy_change() {
    let mut per_tick = Vec::new();
    per_tick.extend(std::iter::repeat_n(status(1, Occupancy::Individual, 0), 10));
    per_tick.extend(std::iter::repeat_n(status(0, Occupancy::Traveling, u32::MAX), 3));
    per_tick.extend(std::iter::repeat_n(status(1, Occupancy::Individual, 5), 7));

    let text = run_statuses(&per_tick);
    let rows: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains(",0,10,"));
    assert!(rows[1].contains(",10,13,"));
    assert!(rows[1].contains("traveling"));
    // The final episode closes at the day boundary.
    assert!(rows[2].contains(&format!(",13,{MINUTES_PER_DAY},")));
}

#[test]
fn activity_names_come_from_the_catalog() {
    let text = run_statuses(&[status(0, Occupancy::Traveling, u32::MAX)]);
    // ActivityId(0) is the travel activity in the helper catalog.
    assert!(text.lines().nth(1).unwrap().contains("travel"));
}
