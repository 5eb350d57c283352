// src/record.rs
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::consts::KEY_SEP;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    History,
    Api,
}

/// One draw. Serialized without `game`, which is the key it is filed under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    #[serde(skip)]
    pub game: &'static str,
    /// Serializes as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub period: String,
    pub numbers: Vec<u32>,
    pub source: Source,
}

impl DrawRecord {
    /// Composite key: `date` + sep + `period`.
    pub fn key(&self) -> String {
        composite_key(self.date, &self.period)
    }
}

pub fn composite_key(date: NaiveDate, period: &str) -> String {
    format!("{}{KEY_SEP}{period}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_game() {
        let r = DrawRecord {
            game: "大樂透",
            date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            period: "112000002".into(),
            numbers: vec![1, 2, 3],
            source: Source::History,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2023-01-05","period":"112000002","numbers":[1,2,3],"source":"history"}"#
        );
        assert_eq!(r.key(), "2023-01-05_112000002");
    }
}
