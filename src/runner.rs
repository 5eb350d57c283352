// src/runner.rs
//
// One sync run: history -> live -> sort -> write, strictly in that order.
// Whatever happens, a valid document ends up at `out_path`.
use std::any::Any;
use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use chrono::Local;

use crate::{
    config::SyncOptions,
    core::Fetch,
    error::SyncResult,
    file,
    merge::Merger,
    progress::Progress,
    scrape::{self, HistoryStats, LiveStats},
    store::{CanonicalStore, Jackpots},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Normalize,
    SeedKeys,
    Harmonize,
    Merge,
    Sort,
    Write,
    Done,
    Recovered,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a run did. Skips and rejections are reported here instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: Stage,
    pub history: HistoryStats,
    pub live: LiveStats,
    /// Records written per game, table order. Empty after recovery.
    pub written: Vec<(&'static str, usize)>,
    /// The error that forced recovery, if any.
    pub failure: Option<String>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            outcome: Stage::Decode,
            history: HistoryStats::default(),
            live: LiveStats::default(),
            written: Vec::new(),
            failure: None,
        }
    }

    pub fn total_written(&self) -> usize {
        self.written.iter().map(|(_, n)| n).sum()
    }
}

/// Run the whole pipeline. Never fails: on a fatal error or a panic in any
/// stage the minimal document is written and the report's outcome is `Recovered`.
pub fn run(
    opts: &SyncOptions,
    fetch: &dyn Fetch,
    progress: &mut dyn Progress,
) -> RunReport {
    let mut report = RunReport::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run_stages(opts, fetch, progress, &mut report)
    }));

    let failure = match result {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(payload) => Some(format!("panic: {}", panic_message(payload.as_ref()))),
    };

    match failure {
        None => {
            report.outcome = Stage::Done;
            log_summary(&report);
        }
        Some(why) => {
            loge!("sync failed during {}: {why}", report.outcome);
            report.failure = Some(why);
            report.written.clear();
            report.outcome = Stage::Recovered;
            write_minimal(&opts.out_path);
        }
    }
    report
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string payload"
    }
}

fn run_stages(
    opts: &SyncOptions,
    fetch: &dyn Fetch,
    progress: &mut dyn Progress,
    report: &mut RunReport,
) -> SyncResult<()> {
    let mut merger = Merger::new();

    // Decode, Normalize and SeedKeys stream together, one line at a time.
    for stage in [Stage::Decode, Stage::Normalize, Stage::SeedKeys] {
        enter(report, stage);
    }
    report.history = scrape::collect_history(opts, &mut merger, progress);

    // Likewise Harmonize and Merge, one response at a time.
    for stage in [Stage::Harmonize, Stage::Merge] {
        enter(report, stage);
    }
    let today = Local::now().date_naive();
    report.live = scrape::collect_live(opts, fetch, &mut merger, today, progress);

    enter(report, Stage::Sort);
    let jackpots = load_jackpots(opts.jackpots_path.as_deref());
    let store = CanonicalStore::assemble(merger, jackpots, Local::now());
    report.written = store.games.iter().map(|(g, r)| (g, r.len())).collect();

    enter(report, Stage::Write);
    file::write_json_atomic(&opts.out_path, &store)?;
    logf!("wrote {} draws to {}", store.games.total(), opts.out_path.display());
    Ok(())
}

fn enter(report: &mut RunReport, stage: Stage) {
    logd!("stage {} -> {stage}", report.outcome);
    report.outcome = stage;
}

/// Pre-fetched snapshot `{game: text}`. Missing or malformed means no jackpots.
pub fn load_jackpots(path: Option<&Path>) -> Jackpots {
    let Some(path) = path else { return Jackpots::new() };
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Jackpots>(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(j) => j,
        Err(e) => {
            logw!("jackpots {}: {e}; continuing without", path.display());
            Jackpots::new()
        }
    }
}

/// Recovery path: the atomic write first, a direct overwrite if that fails too.
fn write_minimal(path: &Path) {
    let minimal = CanonicalStore::minimal(Local::now());
    if let Err(e) = file::write_json_atomic(path, &minimal) {
        logw!("atomic write of minimal document failed: {e}");
        if let Err(e) = file::write_json_direct(path, &minimal) {
            loge!("could not write minimal document to {}: {e}", path.display());
        }
    }
}

fn log_summary(r: &RunReport) {
    let h = &r.history;
    let l = &r.live;
    logf!(
        "history: {} bundles read, {} missing, {} unreadable; {} members decoded, {} undecodable; {} lines, {} draws, {} duplicate",
        h.bundles_read, h.bundles_missing, h.bundles_unreadable,
        h.members_decoded, h.members_undecodable, h.lines, h.admitted, h.duplicates
    );
    for (kind, n) in &h.rejected {
        logf!("history: {n} lines rejected ({kind})");
    }
    logf!(
        "live: {} requests, {} failed, {} schema mismatches, {} elements rejected; {} new draws, {} already known",
        l.requests, l.units_failed, l.schema_mismatches, l.elements_rejected, l.admitted, l.duplicates
    );
}
