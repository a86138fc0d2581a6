//! `ats-schedule` — activity catalog and agent agendas.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`activity`] | `ActivityCategory`, `LocationKind`, `Sociality`, `Activity`|
//! | [`calendar`] | `WeekCalendar` — per-weekday start-time windows            |
//! | [`catalog`]  | `ActivityCatalog`, `CatalogBuilder`                        |
//! | [`agenda`]   | `Agenda`, `AgendaEntry` — a day's schedule + need ledger   |
//! | [`loader`]   | `load_catalog_csv`, `load_catalog_reader`                  |
//! | [`error`]    | `CatalogError`, `AgendaError`, result aliases              |
//!
//! # Agenda model (summary)
//!
//! An `Agenda` maps non-overlapping minute [`Interval`][ats_core::Interval]s
//! to exactly one activity and one target node each.  A fully planned day
//! tiles `[0, 1440)` with no gaps; `Agenda::first_gap` drives the plan
//! generator's fill loop, and the embedded `NeedLedger` accumulates the
//! planned (or executed) minutes per need.

pub mod activity;
pub mod agenda;
pub mod calendar;
pub mod catalog;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ActivityCategory, LocationKind, Sociality};
pub use agenda::{Agenda, AgendaEntry};
pub use calendar::WeekCalendar;
pub use catalog::{ActivityCatalog, ActivitySpec, CatalogBuilder};
pub use error::{AgendaError, AgendaResult, CatalogError, CatalogResult};
pub use loader::{load_catalog_csv, load_catalog_reader};
