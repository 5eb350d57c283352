// src/specs/mod.rs
//! # Source "specs"
//!
//! Each spec knows how to read one upstream shape and turn it into
//! [`DrawRecord`](crate::record::DrawRecord)s.
//!
//! ## What lives here
//! - **Pure parsing**: one archive line (`history`), one endpoint response
//!   (`api`), and the field-name rule table the endpoint parser leans on
//!   (`fields`).
//! - **Typed rejections**: every parser returns `Result<DrawRecord, Reason>`
//!   so a caller (or a test) can see why input was discarded.
//!
//! ## What does **not** live here
//! - Reading archives or doing HTTP (`archive`, `core::net`).
//! - Deduplication and precedence (`merge`).
//! - Counting/logging rejections (`scrape`, `runner`).
//!
//! In short: **`specs` knows how to read the sources.** Other layers decide
//! what to keep.
pub mod api;
pub mod fields;
pub mod history;
