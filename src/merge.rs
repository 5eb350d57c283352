// src/merge.rs
//
// Per-game first-seen-wins admission. History is seeded before any live
// record is offered, which is what gives the archives precedence.

use std::collections::{HashMap, HashSet};

use crate::games::GAMES;
use crate::record::{DrawRecord, Source};

#[derive(Debug, Default)]
struct Ledger {
    records: Vec<DrawRecord>,
    keys: HashSet<String>,
}

impl Ledger {
    fn admit(&mut self, record: DrawRecord) -> bool {
        if !self.keys.insert(record.key()) {
            return false;
        }
        self.records.push(record);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Duplicate,
}

#[derive(Debug)]
pub struct Merger {
    ledgers: HashMap<&'static str, Ledger>,
    live_started: bool,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl Merger {
    /// One empty ledger per known game.
    pub fn new() -> Self {
        let ledgers = GAMES.iter().map(|g| (g.name, Ledger::default())).collect();
        Self { ledgers, live_started: false }
    }

    /// Seed phase: archive records. Must all arrive before the first `admit_live`.
    pub fn seed_history(&mut self, record: DrawRecord) -> Admission {
        debug_assert_eq!(record.source, Source::History);
        if self.live_started {
            logw!("history record {} offered after live phase began", record.key());
        }
        self.offer(record)
    }

    /// Live phase: a live record only lands if no record with its key exists yet.
    pub fn admit_live(&mut self, record: DrawRecord) -> Admission {
        debug_assert_eq!(record.source, Source::Api);
        self.live_started = true;
        self.offer(record)
    }

    fn offer(&mut self, record: DrawRecord) -> Admission {
        let ledger = self.ledgers.entry(record.game).or_default();
        if ledger.admit(record) { Admission::Admitted } else { Admission::Duplicate }
    }

    pub fn contains(&self, game: &str, key: &str) -> bool {
        self.ledgers.get(game).is_some_and(|l| l.keys.contains(key))
    }

    pub fn len(&self, game: &str) -> usize {
        self.ledgers.get(game).map_or(0, |l| l.records.len())
    }

    /// Hand over the records, grouped by game.
    pub fn into_records(self) -> HashMap<&'static str, Vec<DrawRecord>> {
        self.ledgers.into_iter().map(|(g, l)| (g, l.records)).collect()
    }
}
