// src/specs/history.rs
//! Archive line spec.
//!
//! Column layout of the yearly exports (after quote stripping):
//! `game, period, date, <weekday>, <redeem date>, n1, n2, ...`
//!
//! The number block starts at a fixed column; anything before it is ignored
//! even when it happens to be numeric.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::core::sanitize::{clean_field, is_all_digits, strip_bom};
use crate::games::{self, GameDef};
use crate::record::{DrawRecord, Source};

pub const MIN_COLUMNS: usize = 5;
pub const GAME_COL: usize = 0;
pub const PERIOD_COL: usize = 1;
pub const DATE_COL: usize = 2;
pub const NUMBERS_FROM: usize = 5;
pub const MAX_NUMBER: u32 = 99;

/// Years below this are Minguo years.
pub const MINGUO_OFFSET: i32 = 1911;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{3,4})[/.\-](\d{1,2})[/.\-](\d{1,2})$").expect("date pattern")
});

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LineRejection {
    #[error("empty line")]
    Empty,
    #[error("only {0} columns")]
    TooFewColumns(usize),
    #[error("no known game in {0:?}")]
    UnknownGame(String),
    #[error("unparseable date {0:?}")]
    BadDate(String),
    #[error("missing period")]
    MissingPeriod,
    #[error("{game}: {found} numbers, need {need}")]
    TooFewNumbers { game: &'static str, found: usize, need: usize },
}

impl LineRejection {
    /// Stable short label, used as a counter key.
    pub fn kind(&self) -> &'static str {
        match self {
            LineRejection::Empty => "empty",
            LineRejection::TooFewColumns(_) => "too_few_columns",
            LineRejection::UnknownGame(_) => "unknown_game",
            LineRejection::BadDate(_) => "bad_date",
            LineRejection::MissingPeriod => "missing_period",
            LineRejection::TooFewNumbers { .. } => "too_few_numbers",
        }
    }
}

/// Parse one raw archive line into a draw, or say why not.
pub fn normalize_line(line: &str) -> Result<DrawRecord, LineRejection> {
    let line = strip_bom(line);
    if line.is_empty() {
        return Err(LineRejection::Empty);
    }

    let cols: Vec<String> = line.split(',').map(clean_field).collect();
    if cols.len() < MIN_COLUMNS {
        return Err(LineRejection::TooFewColumns(cols.len()));
    }

    let game: &'static GameDef = games::match_game(&cols[GAME_COL])
        .ok_or_else(|| LineRejection::UnknownGame(cols[GAME_COL].clone()))?;

    let date = parse_draw_date(&cols[DATE_COL])
        .ok_or_else(|| LineRejection::BadDate(cols[DATE_COL].clone()))?;

    let period = cols[PERIOD_COL].clone();
    if period.is_empty() {
        return Err(LineRejection::MissingPeriod);
    }

    let numbers = collect_numbers(&cols[NUMBERS_FROM.min(cols.len())..]);
    if numbers.len() < game.min_numbers {
        return Err(LineRejection::TooFewNumbers {
            game: game.name,
            found: numbers.len(),
            need: game.min_numbers,
        });
    }

    Ok(DrawRecord { game: game.name, date, period, numbers, source: Source::History })
}

/// `112/01/05`, `2023-1-5`, `112.01.05` ... Minguo years are shifted to Gregorian.
/// Impossible calendar dates are rejected.
pub fn parse_draw_date(token: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(token)?;
    let mut year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    if year < MINGUO_OFFSET {
        year += MINGUO_OFFSET;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Purely numeric cells in `[0, MAX_NUMBER]`, in column order. Others are skipped, not fatal.
fn collect_numbers(cells: &[String]) -> Vec<u32> {
    cells
        .iter()
        .filter(|c| is_all_digits(c))
        .filter_map(|c| c.parse::<u32>().ok())
        .filter(|n| *n <= MAX_NUMBER)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_line_with_leading_noise_columns() {
        let r = normalize_line("大樂透,113000001,112/01/05,一,2024-01-05,1,2,3,4,5,6,7").unwrap();
        assert_eq!(r.game, "大樂透");
        assert_eq!(r.date, ymd(2023, 1, 5));
        assert_eq!(r.period, "113000001");
        assert_eq!(r.numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(r.source, Source::History);
    }

    #[test]
    fn minguo_and_gregorian_dates() {
        assert_eq!(parse_draw_date("112/01/05"), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_draw_date("2023-1-5"), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_draw_date("99.12.31"), None); // two-digit year
        assert_eq!(parse_draw_date("099.12.31"), Some(ymd(2010, 12, 31)));
        assert_eq!(parse_draw_date("112/02/30"), None);
        assert_eq!(parse_draw_date("112/01/05 "), None);
    }

    #[test]
    fn bom_quotes_and_crlf() {
        let r = normalize_line("\u{feff}\"今彩539\",\"113000010\",\"113/01/12\",\"六\",\"\",\"05\",\"12\",\"23\",\"31\",\"39\"\r")
            .unwrap();
        assert_eq!(r.game, "今彩539");
        assert_eq!(r.date, ymd(2024, 1, 12));
        assert_eq!(r.numbers, vec![5, 12, 23, 31, 39]);
    }

    #[test]
    fn out_of_range_and_text_cells_are_skipped() {
        let r = normalize_line("威力彩,113000002,113/01/04,四,x,100,08,abc,17,-3,02").unwrap();
        assert_eq!(r.numbers, vec![8, 17, 2]);
    }

    #[test]
    fn pick_games_keep_zero_digits() {
        let r = normalize_line("3星彩,113000003,113/01/03,三,,0,0,7").unwrap();
        assert_eq!(r.numbers, vec![0, 0, 7]);
    }

    #[test]
    fn rejection_reasons() {
        assert_eq!(normalize_line("   "), Err(LineRejection::Empty));
        assert_eq!(normalize_line("大樂透,1,112/01/05,一"), Err(LineRejection::TooFewColumns(4)));
        assert_eq!(
            normalize_line("遊戲名稱,期別,開獎日期,星期,兌獎期限,獎號1").unwrap_err().kind(),
            "unknown_game"
        );
        assert_eq!(
            normalize_line("大樂透,113000001,開獎日期,一,,1,2,3"),
            Err(LineRejection::BadDate("開獎日期".into()))
        );
        assert_eq!(
            normalize_line("大樂透,,112/01/05,一,,1,2,3"),
            Err(LineRejection::MissingPeriod)
        );
        assert_eq!(
            normalize_line("3星彩,113000003,113/01/03,三,,1,2"),
            Err(LineRejection::TooFewNumbers { game: "3星彩", found: 2, need: 3 })
        );
    }

    #[test]
    fn exactly_five_columns_has_no_numbers() {
        assert_eq!(
            normalize_line("大樂透,1,112/01/05,一,2").unwrap_err().kind(),
            "too_few_numbers"
        );
    }
}
