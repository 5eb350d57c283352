// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Months, NaiveDate};

use super::consts::*;

/// Everything a sync run needs to know. The CLI fills this in; tests build it by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub data_dir: PathBuf,
    pub out_path: PathBuf,
    pub years: Vec<i32>,
    pub months_back: u32,
    pub api_base: String,
    pub request_pause: Duration,
    pub request_timeout: Duration,
    pub jackpots_path: Option<PathBuf>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        let this_year = chrono::Local::now().year();
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out_path: PathBuf::from(DEFAULT_DATA_DIR).join(DEFAULT_OUT_FILE),
            years: (this_year - HISTORY_YEARS_BACK + 1..=this_year).collect(),
            months_back: MONTHS_BACK,
            api_base: API_BASE.to_string(),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            jackpots_path: None,
        }
    }
}

impl SyncOptions {
    /// Path of the archive bundle for one year.
    pub fn bundle_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(format!("{year}.zip"))
    }

    /// Target months (`YYYY-MM`), oldest first: the month of `today` and the
    /// `months_back - 1` before it.
    pub fn target_months(&self, today: NaiveDate) -> Vec<String> {
        let first = today.with_day(1).unwrap_or(today);
        let mut months: Vec<String> = (0..self.months_back)
            .filter_map(|i| first.checked_sub_months(Months::new(i)))
            .map(|d| d.format("%Y-%m").to_string())
            .collect();
        months.sort();
        months.dedup();
        months
    }

    pub fn endpoint_url(&self, code: &str, month: &str) -> String {
        format!(
            "{}/{code}Result?period&month={month}&pageNum=1&pageSize={PAGE_SIZE}",
            self.api_base.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_years_end_with_current_year() {
        let opts = SyncOptions::default();
        let this_year = chrono::Local::now().year();
        assert_eq!(opts.years.len(), HISTORY_YEARS_BACK as usize);
        assert_eq!(*opts.years.last().unwrap(), this_year);
    }

    #[test]
    fn months_cross_year_boundary_oldest_first() {
        let opts = SyncOptions::default();
        assert_eq!(
            opts.target_months(ymd(2024, 2, 29)),
            vec!["2023-12", "2024-01", "2024-02"]
        );
    }

    #[test]
    fn zero_months_disables_live_phase() {
        let opts = SyncOptions { months_back: 0, ..SyncOptions::default() };
        assert!(opts.target_months(ymd(2024, 5, 1)).is_empty());
    }

    #[test]
    fn endpoint_url_shape() {
        let opts = SyncOptions { api_base: "http://x/Lottery/".into(), ..SyncOptions::default() };
        assert_eq!(
            opts.endpoint_url("Lotto649", "2024-03"),
            "http://x/Lottery/Lotto649Result?period&month=2024-03&pageNum=1&pageSize=50"
        );
    }
}
