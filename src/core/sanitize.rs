// src/core/sanitize.rs

/// Drop a leading BOM (one or more, some exports double it) and outer whitespace.
pub fn strip_bom(s: &str) -> &str {
    s.trim_start_matches('\u{feff}').trim()
}

/// Archive fields: quotes anywhere are noise, as is surrounding whitespace.
pub fn clean_field(s: &str) -> String {
    s.replace('"', "").trim().to_string()
}

/// Non-empty and ASCII digits only.
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
