// src/specs/api.rs
//! Live endpoint spec.
//!
//! Response shape:
//! ```text
//! { "content": { "<code>ResulDtoList": [ { "lotteryDate": "...T00:00:00",
//!                                         "period": "...", "no1": 3, ..., "sNo": 12 } ] } }
//! ```
//! The list's key changes case and prefix per game, so it is found by marker.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use super::fields::{FieldRole, classify};
use crate::games::GameDef;
use crate::record::{DrawRecord, Source};

pub const CONTAINER_KEY: &str = "content";
/// Lowercased; the endpoint spells it this way.
pub const LIST_MARKER: &str = "resuldtolist";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("no `{CONTAINER_KEY}` object")]
    MissingContainer,
    #[error("no result list in `{CONTAINER_KEY}`")]
    MissingList,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ElementRejection {
    #[error("element is not an object")]
    NotAnObject,
    #[error("no draw date")]
    MissingDate,
    #[error("unparseable draw date {0:?}")]
    BadDate(String),
    #[error("no period")]
    MissingPeriod,
    #[error("no numbers")]
    NoNumbers,
}

/// One parsed response: every element, kept or rejected, in list order.
pub type Harmonized = Vec<Result<DrawRecord, ElementRejection>>;

/// Locate the result list and harmonize each element.
pub fn harmonize(game: &GameDef, doc: &Value) -> Result<Harmonized, SchemaMismatch> {
    let list = result_list(doc)?;
    Ok(list.iter().map(|el| harmonize_element(game, el)).collect())
}

/// First array-valued child of the container whose name carries the marker.
pub fn result_list(doc: &Value) -> Result<&Vec<Value>, SchemaMismatch> {
    let container = doc
        .get(CONTAINER_KEY)
        .and_then(Value::as_object)
        .ok_or(SchemaMismatch::MissingContainer)?;

    container
        .iter()
        .filter(|(k, _)| k.to_ascii_lowercase().contains(LIST_MARKER))
        .find_map(|(_, v)| v.as_array())
        .ok_or(SchemaMismatch::MissingList)
}

pub fn harmonize_element(game: &GameDef, el: &Value) -> Result<DrawRecord, ElementRejection> {
    let fields: &Map<String, Value> = el.as_object().ok_or(ElementRejection::NotAnObject)?;

    let mut date_raw: Option<&str> = None;
    let mut period: Option<String> = None;
    let mut special: Option<u32> = None;
    let mut numbers: Vec<u32> = Vec::new();

    for (name, value) in fields {
        match classify(name) {
            FieldRole::Date => {
                if date_raw.is_none() {
                    date_raw = value.as_str();
                }
            }
            FieldRole::Period => {
                if period.is_none() {
                    period = period_text(value);
                }
            }
            FieldRole::Special => {
                if special.is_none() {
                    special = ball(value);
                }
            }
            FieldRole::Number => numbers.extend(ball(value)),
            FieldRole::Ignore => {}
        }
    }

    let date_raw = date_raw.ok_or(ElementRejection::MissingDate)?;
    let date = date_prefix(date_raw).ok_or_else(|| ElementRejection::BadDate(date_raw.to_string()))?;
    let period = period.ok_or(ElementRejection::MissingPeriod)?;

    numbers.extend(special);
    if numbers.is_empty() {
        return Err(ElementRejection::NoNumbers);
    }

    Ok(DrawRecord { game: game.name, date, period, numbers, source: Source::Api })
}

/// `2024-03-05T00:00:00` -> 2024-03-05. Accepts a space separator too.
/// The year must have four digits; `%Y` alone would take `24` as year 24.
fn date_prefix(ts: &str) -> Option<NaiveDate> {
    let day = ts.split(['T', ' ']).next()?.trim();
    let year = day.split('-').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn period_text(v: &Value) -> Option<String> {
    let s = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Non-negative integers only; null, strings, floats and negatives are not balls.
fn ball(v: &Value) -> Option<u32> {
    v.as_u64().and_then(|n| u32::try_from(n).ok())
}
