// src/lib.rs

#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod archive;
pub mod file;
pub mod games;
pub mod merge;
pub mod progress;
pub mod record;
pub mod runner;
pub mod scrape;
pub mod store;
