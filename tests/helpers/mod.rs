// tests/helpers/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use lotto_sync::config::SyncOptions;
use lotto_sync::core::Fetch;
use lotto_sync::error::{SyncError, SyncResult};
use zip::write::SimpleFileOptions;

/// Write `<dir>/<year>.zip` with the given members.
pub fn write_bundle(dir: &Path, year: i32, members: &[(&str, Vec<u8>)]) {
    let file = File::create(dir.join(format!("{year}.zip"))).unwrap();
    let mut w = zip::ZipWriter::new(file);
    for (name, bytes) in members {
        w.start_file(*name, SimpleFileOptions::default()).unwrap();
        w.write_all(bytes).unwrap();
    }
    w.finish().unwrap();
}

pub fn big5(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::BIG5.encode(text);
    assert!(!had_errors, "not representable in Big5: {text}");
    bytes.into_owned()
}

/// Options pointed at a temp dir, no pause, fixed years.
pub fn options(dir: &Path, years: &[i32], months_back: u32) -> SyncOptions {
    SyncOptions {
        data_dir: dir.to_path_buf(),
        out_path: dir.join("out").join("lottery-data.json"),
        years: years.to_vec(),
        months_back,
        api_base: "http://fake/Lottery".into(),
        request_pause: Duration::ZERO,
        request_timeout: Duration::from_secs(1),
        jackpots_path: None,
    }
}

/// Answers by game code; unknown codes get a 404. Records every URL asked for
/// and when.
#[derive(Default)]
pub struct FakeFetcher {
    pub bodies: HashMap<&'static str, String>,
    pub seen: RefCell<Vec<String>>,
    pub at: RefCell<Vec<Instant>>,
}

impl FakeFetcher {
    pub fn with(mut self, code: &'static str, body: impl Into<String>) -> Self {
        self.bodies.insert(code, body.into());
        self
    }
}

impl Fetch for FakeFetcher {
    fn get(&self, url: &str) -> SyncResult<String> {
        self.at.borrow_mut().push(Instant::now());
        self.seen.borrow_mut().push(url.to_string());
        let code = url
            .rsplit('/')
            .next()
            .and_then(|tail| tail.split("Result?").next())
            .unwrap_or_default();
        self.bodies
            .get(code)
            .cloned()
            .ok_or(SyncError::Status { url: url.to_string(), status: 404 })
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
