// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://api.taiwanlottery.com/TLCAPIWeB/Lottery";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REFERER: &str = "https://www.taiwanlottery.com/";
pub const ORIGIN: &str = "https://www.taiwanlottery.com";
pub const PAGE_SIZE: u32 = 50;

// Local layout
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUT_FILE: &str = "lottery-data.json";

// History
pub const HISTORY_YEARS_BACK: i32 = 5;
/// Accepted archive years (first Minguo year up to four digits).
pub const MIN_YEAR: i32 = 1911;
pub const MAX_YEAR: i32 = 9999;

// Live
pub const MONTHS_BACK: u32 = 3;
pub const REQUEST_PAUSE_MS: u64 = 300; // be polite
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Composite key
pub const KEY_SEP: char = '_';
