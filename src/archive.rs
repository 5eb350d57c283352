// src/archive.rs
//
// Yearly result bundles: a ZIP of per-game CSV exports in whatever encoding
// the exporter felt like that year.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use encoding_rs::Encoding;
use thiserror::Error;
use zip::ZipArchive;

use crate::core::encoding;
use crate::error::SyncResult;

/// A member that looked like data but could not be turned into text.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("{name}: unreadable ({reason})")]
    Unreadable { name: String, reason: String },
    #[error("{name}: no candidate encoding fits")]
    NoEncoding { name: String },
}

/// One decoded CSV member.
#[derive(Debug)]
pub struct DecodedMember {
    pub name: String,
    pub encoding: &'static Encoding,
    pub text: String,
}

impl DecodedMember {
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

pub struct Bundle<R> {
    archive: ZipArchive<R>,
    candidates: Vec<&'static Encoding>,
}

impl Bundle<BufReader<File>> {
    pub fn open(path: &Path) -> SyncResult<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

impl<R: Read + Seek> Bundle<R> {
    pub fn from_reader(reader: R) -> SyncResult<Self> {
        Ok(Self { archive: ZipArchive::new(reader)?, candidates: encoding::candidates() })
    }

    /// Replace the encoding list (tried in order).
    pub fn with_candidates(mut self, candidates: Vec<&'static Encoding>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Lazily decode the data members, one per `next()`.
    pub fn members(&mut self) -> Members<'_, R> {
        Members { bundle: self, next: 0 }
    }
}

pub struct Members<'a, R> {
    bundle: &'a mut Bundle<R>,
    next: usize,
}

impl<R: Read + Seek> Iterator for Members<'_, R> {
    type Item = Result<DecodedMember, DecodeFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.bundle.archive.len() {
            let idx = self.next;
            self.next += 1;

            let mut file = match self.bundle.archive.by_index(idx) {
                Ok(f) => f,
                Err(e) => {
                    return Some(Err(DecodeFailure::Unreadable {
                        name: format!("#{idx}"),
                        reason: e.to_string(),
                    }));
                }
            };
            let name = file.name().to_string();
            if file.is_dir() || !is_data_member(&name) {
                logd!("skip member {name}");
                continue;
            }

            let mut bytes = Vec::new();
            if let Err(e) = file.read_to_end(&mut bytes) {
                return Some(Err(DecodeFailure::Unreadable { name, reason: e.to_string() }));
            }

            return Some(match encoding::decode_first(&bytes, &self.bundle.candidates) {
                Some((text, enc)) => {
                    logd!("{name}: decoded as {}", enc.name());
                    Ok(DecodedMember { name, encoding: enc, text })
                }
                None => Err(DecodeFailure::NoEncoding { name }),
            });
        }
        None
    }
}

/// CSV members only; skips directories and metadata such as `__MACOSX/` or dotfiles.
pub fn is_data_member(name: &str) -> bool {
    let hidden = name
        .split(['/', '\\'])
        .any(|part| part.starts_with("__") || part.starts_with('.'));
    !hidden && name.to_ascii_lowercase().ends_with(".csv")
}
