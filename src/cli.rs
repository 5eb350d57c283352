// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::SyncOptions;
use crate::config::consts::{MAX_YEAR, MIN_YEAR};
use crate::core::{Fetch, HttpFetcher, Offline};
use crate::progress::Progress;
use crate::runner::{self, RunReport, Stage};

/// Merge yearly lottery archives and the live results API into one JSON file.
#[derive(Debug, Parser)]
#[command(name = "lotto_sync", version)]
pub struct Args {
    /// Directory holding the `<year>.zip` archives
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output document (default: <data-dir>/lottery-data.json)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Archive years, e.g. `2021-2024,2026` (default: the last five)
    #[arg(long, value_name = "LIST", value_parser = parse_years)]
    pub years: Option<Years>,

    /// Live months to fetch, counting back from this one; 0 skips the live API
    #[arg(long, value_name = "N")]
    pub months: Option<u32>,

    /// Pause between live requests
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,

    /// Per-request timeout
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Pre-fetched jackpot snapshot, a JSON object `{game: text}`
    #[arg(long, value_name = "FILE")]
    pub jackpots: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Layer the flags over the defaults.
    pub fn into_options(self) -> SyncOptions {
        let mut opts = SyncOptions::default();
        if let Some(dir) = self.data_dir {
            opts.out_path = dir.join(crate::config::consts::DEFAULT_OUT_FILE);
            opts.data_dir = dir;
        }
        if let Some(out) = self.out { opts.out_path = out; }
        if let Some(Years(years)) = self.years { opts.years = years; }
        if let Some(m) = self.months { opts.months_back = m; }
        if let Some(ms) = self.pause_ms { opts.request_pause = Duration::from_millis(ms); }
        if let Some(s) = self.timeout_secs { opts.request_timeout = Duration::from_secs(s); }
        opts.jackpots_path = self.jackpots;
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Years(pub Vec<i32>);

fn parse_years(s: &str) -> Result<Years, String> {
    parse_years_list(s).map(Years)
}

/// Prints progress lines to stdout. Write errors (closed pipe) are ignored.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) { let _ = writeln!(io::stdout(), "{msg}"); }
    fn item_failed(&mut self, label: &str) { let _ = writeln!(io::stdout(), "  skipped: {label}"); }
}

/// Parse flags and run one sync. Once the flags are parsed a document is
/// always written; logging or HTTP client setup failures only degrade the run.
pub fn run() -> color_eyre::Result<RunReport> {
    let args = Args::parse();
    if let Err(e) = crate::log::init(args.log_file.as_deref()) {
        let _ = writeln!(io::stderr(), "logging disabled: {e}");
    }
    let opts = args.into_options();

    let fetcher: Box<dyn Fetch> = match HttpFetcher::new(opts.request_timeout) {
        Ok(f) => Box::new(f),
        Err(e) => {
            loge!("http client unavailable, live results skipped: {e}");
            Box::new(Offline::new(e.to_string()))
        }
    };
    let report = runner::run(&opts, fetcher.as_ref(), &mut ConsoleProgress);

    let mut out = io::stdout();
    let _ = match report.outcome {
        Stage::Done => writeln!(out, "Saved {} draws to {}", report.total_written(), opts.out_path.display()),
        _ => writeln!(
            out,
            "Sync failed ({}); wrote an empty document to {}",
            report.failure.as_deref().unwrap_or("unknown error"),
            opts.out_path.display()
        ),
    };
    Ok(report)
}

/// `2021-2023,2025` -> [2021, 2022, 2023, 2025], sorted, deduped.
/// Years outside `MIN_YEAR..=MAX_YEAR` are rejected.
pub fn parse_years_list(s: &str) -> Result<Vec<i32>, String> {
    let year = |t: &str, part: &str| -> Result<i32, String> {
        let y: i32 = t.trim().parse().map_err(|e| format!("{part}: {e}"))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&y) {
            return Err(format!("{part}: year {y} outside {MIN_YEAR}-{MAX_YEAR}"));
        }
        Ok(y)
    };

    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let (a, b) = (year(a, part)?, year(b, part)?);
            if a > b { return Err(format!("Invalid range: {part}")); }
            out.extend(a..=b);
        } else {
            out.push(year(part, part)?);
        }
    }
    if out.is_empty() { return Err("no years given".into()); }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_list_ranges_and_singles() {
        assert_eq!(parse_years_list("2023,2021-2022, 2023").unwrap(), vec![2021, 2022, 2023]);
        assert!(parse_years_list("2024-2021").is_err());
        assert!(parse_years_list("twenty").is_err());
        assert!(parse_years_list(" , ").is_err());
    }

    #[test]
    fn years_list_is_bounded() {
        assert!(parse_years_list("1-2000000000").is_err());
        assert!(parse_years_list("1910").is_err());
        assert!(parse_years_list("2024-10000").is_err());
        assert_eq!(parse_years_list("1911,9999").unwrap(), vec![1911, 9999]);
    }

    #[test]
    fn flags_layer_over_defaults() {
        let args = Args::try_parse_from([
            "lotto_sync", "--data-dir", "archives", "--years", "2022-2023", "--months", "0",
            "--pause-ms", "0",
        ])
        .unwrap();
        let opts = args.into_options();
        assert_eq!(opts.data_dir, PathBuf::from("archives"));
        assert_eq!(opts.out_path, PathBuf::from("archives").join("lottery-data.json"));
        assert_eq!(opts.years, vec![2022, 2023]);
        assert_eq!(opts.months_back, 0);
        assert!(opts.request_pause.is_zero());
    }

    #[test]
    fn explicit_out_wins() {
        let args = Args::try_parse_from(["lotto_sync", "--data-dir", "a", "-o", "b/out.json"]).unwrap();
        assert_eq!(args.into_options().out_path, PathBuf::from("b/out.json"));
    }
}
