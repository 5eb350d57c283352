// src/specs/fields.rs
//! Field-name classifier for live-endpoint elements.
//!
//! The endpoint names its fields differently per game (`no1`, `No1`,
//! `winNo1`, `sNo`, ...), so fields are recognised by name shape rather than
//! position. Rules are evaluated top to bottom on the lowercased name; the
//! first predicate that holds decides the role.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRole {
    /// Timestamp-like draw date; only the date prefix is kept.
    Date,
    Period,
    /// Special/bonus ball, appended after the regular numbers.
    Special,
    Number,
    Ignore,
}

struct Rule {
    when: fn(&str) -> bool,
    role: FieldRole,
}

/// Keys that look like numbers by name but carry serials, counters or period ids.
pub const NON_NUMBER_KEYS: &[&str] = &[
    "serialno", "seqno", "sortno", "issueno", "drawno", "pageno", "pagenum", "totalno",
];

const RULES: &[Rule] = &[
    Rule { when: |n| n == "period", role: FieldRole::Period },
    Rule { when: |n| n == "lotterydate" || n == "drawdate", role: FieldRole::Date },
    Rule { when: |n| n.contains("period") || n.contains("serial"), role: FieldRole::Ignore },
    Rule { when: |n| NON_NUMBER_KEYS.contains(&n), role: FieldRole::Ignore },
    Rule { when: |n| n == "sno" || n.contains("special"), role: FieldRole::Special },
    Rule { when: |n| n.contains("no") || n.contains("win"), role: FieldRole::Number },
];

pub fn classify(name: &str) -> FieldRole {
    let lc = name.to_ascii_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.when)(&lc))
        .map(|rule| rule.role)
        .unwrap_or(FieldRole::Ignore)
}
