// src/scrape.rs
//
// The two ingestion phases. Both are best-effort: a bad line, member, bundle
// or request is counted and logged, never fatal.
use std::{collections::BTreeMap, thread};

use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    archive::Bundle,
    config::SyncOptions,
    core::Fetch,
    games::{GAMES, GameDef},
    merge::{Admission, Merger},
    progress::Progress,
    record::DrawRecord,
    specs::{api, history},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub bundles_read: usize,
    pub bundles_missing: usize,
    pub bundles_unreadable: usize,
    pub members_decoded: usize,
    pub members_undecodable: usize,
    pub lines: usize,
    pub admitted: usize,
    pub duplicates: usize,
    /// Rejected lines by reason (`LineRejection::kind`).
    pub rejected: BTreeMap<&'static str, usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveStats {
    pub requests: usize,
    pub units_failed: usize,
    pub schema_mismatches: usize,
    pub elements_rejected: usize,
    pub admitted: usize,
    pub duplicates: usize,
}

/// Decode every configured yearly bundle and seed the merger with its draws.
pub fn collect_history(
    opts: &SyncOptions,
    merger: &mut Merger,
    progress: &mut dyn Progress,
) -> HistoryStats {
    let mut stats = HistoryStats::default();

    progress.log("Loading history archives...");
    progress.begin(opts.years.len());

    for &year in &opts.years {
        let path = opts.bundle_path(year);
        let label = path.display().to_string();

        if !path.exists() {
            logw!("{label} not found, skipping");
            stats.bundles_missing += 1;
            progress.item_failed(&label);
            continue;
        }

        let mut bundle = match Bundle::open(&path) {
            Ok(b) => b,
            Err(e) => {
                logw!("{label}: {e}");
                stats.bundles_unreadable += 1;
                progress.item_failed(&label);
                continue;
            }
        };
        stats.bundles_read += 1;

        for member in bundle.members() {
            let member = match member {
                Ok(m) => m,
                Err(e) => {
                    logw!("{label}: {e}");
                    stats.members_undecodable += 1;
                    continue;
                }
            };
            stats.members_decoded += 1;

            for line in member.lines() {
                stats.lines += 1;
                match history::normalize_line(line) {
                    Ok(record) => match merger.seed_history(record) {
                        Admission::Admitted => stats.admitted += 1,
                        Admission::Duplicate => stats.duplicates += 1,
                    },
                    Err(why) => {
                        logd!("{}: line rejected: {why}", member.name);
                        *stats.rejected.entry(why.kind()).or_default() += 1;
                    }
                }
            }
        }

        logf!("{label}: {} draws so far", stats.admitted);
        progress.item_done(&label);
    }

    progress.finish();
    stats
}

/// Fetch every game for every target month and offer the draws to the merger.
/// Must run after `collect_history`.
pub fn collect_live(
    opts: &SyncOptions,
    fetch: &dyn Fetch,
    merger: &mut Merger,
    today: NaiveDate,
    progress: &mut dyn Progress,
) -> LiveStats {
    let mut stats = LiveStats::default();
    let months = opts.target_months(today);
    if months.is_empty() {
        return stats;
    }

    progress.log("Fetching live results...");
    progress.begin(GAMES.len() * months.len());

    for game in GAMES {
        for month in &months {
            if stats.requests > 0 && !opts.request_pause.is_zero() {
                thread::sleep(opts.request_pause); // be polite
            }
            stats.requests += 1;

            let label = format!("{} ({month})", game.name);
            progress.log(&format!("Requesting {label}..."));

            let url = opts.endpoint_url(game.code, month);
            let records = match fetch_unit(fetch, game, &url, &mut stats) {
                Some(r) => r,
                None => {
                    progress.item_failed(&label);
                    continue;
                }
            };

            for record in records {
                match merger.admit_live(record) {
                    Admission::Admitted => stats.admitted += 1,
                    Admission::Duplicate => stats.duplicates += 1,
                }
            }
            progress.item_done(&label);
        }
    }

    progress.finish();
    stats
}

/// One game/month unit. `None` means the unit was skipped (already counted).
fn fetch_unit(
    fetch: &dyn Fetch,
    game: &GameDef,
    url: &str,
    stats: &mut LiveStats,
) -> Option<Vec<DrawRecord>> {
    let body = match fetch.get(url) {
        Ok(b) => b,
        Err(e) => {
            logw!("{}: request failed: {e}", game.name);
            stats.units_failed += 1;
            return None;
        }
    };

    let doc: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            logw!("{}: bad JSON from {url}: {e}", game.name);
            stats.units_failed += 1;
            return None;
        }
    };

    let items = match api::harmonize(game, &doc) {
        Ok(items) => items,
        Err(why) => {
            logw!("{}: {why} ({url})", game.name);
            stats.schema_mismatches += 1;
            return None;
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Ok(record) => out.push(record),
            Err(why) => {
                logd!("{}: element rejected: {why}", game.name);
                stats.elements_rejected += 1;
            }
        }
    }
    Some(out)
}
