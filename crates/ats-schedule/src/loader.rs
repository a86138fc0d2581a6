//! CSV activity-catalog loading.
//!
//! # Format
//!
//! One row per activity:
//!
//! ```csv
//! name,category,location,network,fallback,needs,windows
//! sleep,home,household,,,,always
//! work,work,work,,,subsistence:1.0,workdays 08:00-18:00
//! family dinner,home,household,household,dinner alone,affection:0.5;subsistence:0.5,daily 17:00-20:00
//! ```
//!
//! - `network`/`fallback` are empty for individual activities; a joint row
//!   names its network kind and the *name* of a previously defined
//!   individual fallback activity.
//! - `needs` is `need:fraction` pairs separated by `;` (empty = all
//!   unmodeled time).
//! - `windows` is `;`-separated `day-spec HH:MM-HH:MM` entries where
//!   `day-spec` is a weekday (`mon`…`sun`), `daily`, or `workdays`; the bare
//!   keyword `always` makes every minute an allowed start.
//!
//! Individual rows must precede any joint row that names them as fallback;
//! the loader otherwise keeps catalog ids in row order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ats_core::{Interval, Need, NeedTimeSplit, NetworkKind, Weekday};
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::{ActivityCatalog, ActivityCategory, ActivitySpec, CatalogBuilder, LocationKind, Sociality, WeekCalendar};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    name: String,
    category: String,
    location: String,
    #[serde(default)]
    network: String,
    #[serde(default)]
    fallback: String,
    #[serde(default)]
    needs: String,
    windows: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an activity catalog from a CSV file.
pub fn load_catalog_csv(path: &Path) -> CatalogResult<ActivityCatalog> {
    load_catalog_reader(File::open(path)?)
}

/// Load an activity catalog from any reader (used directly by tests).
pub fn load_catalog_reader<R: Read>(reader: R) -> CatalogResult<ActivityCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = CatalogBuilder::new();
    let mut ids = std::collections::HashMap::new();

    for result in csv_reader.deserialize::<CatalogRecord>() {
        let record = result?;
        let name = record.name.trim().to_string();

        let sociality = if record.network.trim().is_empty() {
            Sociality::Individual
        } else {
            let network = parse_network(record.network.trim())?;
            let fallback_name = record.fallback.trim();
            let fallback = *ids.get(fallback_name).ok_or_else(|| {
                CatalogError::Parse(format!(
                    "joint activity '{name}' references unknown fallback '{fallback_name}'"
                ))
            })?;
            Sociality::Joint { network, fallback }
        };

        let spec = ActivitySpec {
            category: parse_category(record.category.trim())?,
            location: parse_location(record.location.trim())?,
            split: parse_needs(record.needs.trim())?,
            calendar: parse_windows(record.windows.trim())?,
            sociality,
            name: name.clone(),
        };
        let id = builder.add(spec);
        ids.insert(name, id);
    }

    builder.build()
}

// ── Field parsers ─────────────────────────────────────────────────────────────

fn parse_category(s: &str) -> CatalogResult<ActivityCategory> {
    ActivityCategory::ALL
        .into_iter()
        .find(|c| c.as_str() == s)
        .ok_or_else(|| CatalogError::Parse(format!("unknown category '{s}'")))
}

fn parse_location(s: &str) -> CatalogResult<LocationKind> {
    LocationKind::ALL
        .into_iter()
        .find(|l| l.as_str() == s)
        .ok_or_else(|| CatalogError::Parse(format!("unknown location kind '{s}'")))
}

fn parse_network(s: &str) -> CatalogResult<NetworkKind> {
    NetworkKind::ALL
        .into_iter()
        .find(|n| n.as_str() == s)
        .ok_or_else(|| CatalogError::Parse(format!("unknown network kind '{s}'")))
}

fn parse_need(s: &str) -> CatalogResult<Need> {
    Need::ALL
        .into_iter()
        .find(|n| n.as_str() == s)
        .ok_or_else(|| CatalogError::Parse(format!("unknown need '{s}'")))
}

fn parse_needs(s: &str) -> CatalogResult<NeedTimeSplit> {
    if s.is_empty() {
        return Ok(NeedTimeSplit::unmodeled());
    }
    let mut builder = NeedTimeSplit::builder();
    for pair in s.split(';').filter(|p| !p.trim().is_empty()) {
        let (need, fraction) = pair
            .split_once(':')
            .ok_or_else(|| CatalogError::Parse(format!("malformed need pair '{pair}'")))?;
        let fraction: f64 = fraction
            .trim()
            .parse()
            .map_err(|_| CatalogError::Parse(format!("malformed fraction in '{pair}'")))?;
        builder = builder.with(parse_need(need.trim())?, fraction);
    }
    builder
        .build()
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

fn parse_minute(s: &str) -> CatalogResult<u32> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| CatalogError::Parse(format!("malformed time '{s}'")))?;
    let hours: u32 = h.parse().map_err(|_| CatalogError::Parse(format!("malformed time '{s}'")))?;
    let minutes: u32 = m.parse().map_err(|_| CatalogError::Parse(format!("malformed time '{s}'")))?;
    let total = hours * 60 + minutes;
    if total > ats_core::MINUTES_PER_DAY || minutes >= 60 {
        return Err(CatalogError::Parse(format!("time '{s}' outside one day")));
    }
    Ok(total)
}

fn parse_windows(s: &str) -> CatalogResult<WeekCalendar> {
    if s == "always" {
        return Ok(WeekCalendar::always());
    }
    let mut calendar = WeekCalendar::new();
    for part in s.split(';').filter(|p| !p.trim().is_empty()) {
        let part = part.trim();
        let (day_spec, range) = part
            .split_once(' ')
            .ok_or_else(|| CatalogError::Parse(format!("malformed window '{part}'")))?;
        let (from, to) = range
            .split_once('-')
            .ok_or_else(|| CatalogError::Parse(format!("malformed window '{part}'")))?;
        let window = Interval::new(parse_minute(from.trim())?, parse_minute(to.trim())?);

        calendar = match day_spec {
            "daily" => calendar.with_daily(window),
            "workdays" => calendar.with_workdays(window),
            day => {
                let weekday = Weekday::ALL
                    .into_iter()
                    .find(|d| d.as_str() == day)
                    .ok_or_else(|| CatalogError::Parse(format!("unknown day spec '{day}'")))?;
                calendar.with_window(weekday, window)
            }
        };
    }
    Ok(calendar)
}
