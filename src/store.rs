// src/store.rs
//
// The output document. Built once per run from the merger, never read back.
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::games::GAMES;
use crate::merge::Merger;
use crate::record::DrawRecord;

/// Game -> formatted amount (or status text), attached verbatim.
pub type Jackpots = BTreeMap<String, String>;

/// Per-game record lists in game-table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameRecords(Vec<(&'static str, Vec<DrawRecord>)>);

impl GameRecords {
    /// Every known game, each with an empty list.
    pub fn empty() -> Self {
        Self(GAMES.iter().map(|g| (g.name, Vec::new())).collect())
    }

    /// Table order; games missing from `by_game` get an empty list.
    pub fn from_map(mut by_game: HashMap<&'static str, Vec<DrawRecord>>) -> Self {
        Self(
            GAMES
                .iter()
                .map(|g| (g.name, by_game.remove(g.name).unwrap_or_default()))
                .collect(),
        )
    }

    pub fn get(&self, game: &str) -> Option<&[DrawRecord]> {
        self.0.iter().find(|(g, _)| *g == game).map(|(_, r)| r.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[DrawRecord])> {
        self.0.iter().map(|(g, r)| (*g, r.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, r)| r.len()).sum()
    }

    /// Newest first. Stable, so same-day draws keep their admission order.
    pub fn sort_newest_first(&mut self) {
        for (_, records) in &mut self.0 {
            records.sort_by(|a, b| b.date.cmp(&a.date));
        }
    }
}

impl Serialize for GameRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (game, records) in &self.0 {
            map.serialize_entry(game, records)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CanonicalStore {
    pub last_updated: String,
    pub jackpots: Jackpots,
    pub games: GameRecords,
}

impl CanonicalStore {
    /// Sorted, complete store from a finished merge.
    pub fn assemble(merger: Merger, jackpots: Jackpots, now: DateTime<Local>) -> Self {
        let mut games = GameRecords::from_map(merger.into_records());
        games.sort_newest_first();
        Self { last_updated: timestamp(now), jackpots, games }
    }

    /// The document written when nothing better is available.
    pub fn minimal(now: DateTime<Local>) -> Self {
        Self { last_updated: timestamp(now), jackpots: Jackpots::new(), games: GameRecords::empty() }
    }
}

fn timestamp(now: DateTime<Local>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Source;
    use chrono::NaiveDate;
    use serde_json::Value;

    fn rec(game: &'static str, m: u32, d: u32, period: &str, source: Source) -> DrawRecord {
        DrawRecord {
            game,
            date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            period: period.into(),
            numbers: vec![1, 2],
            source,
        }
    }

    #[test]
    fn assemble_sorts_newest_first_and_lists_every_game() {
        let mut m = Merger::new();
        m.seed_history(rec("大樂透", 1, 9, "a", Source::History));
        m.seed_history(rec("大樂透", 3, 1, "c", Source::History));
        m.admit_live(rec("大樂透", 2, 20, "b", Source::Api));

        let store = CanonicalStore::assemble(m, Jackpots::new(), Local::now());
        let lotto = store.games.get("大樂透").unwrap();
        let periods: Vec<_> = lotto.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["c", "b", "a"]);
        assert_eq!(store.games.iter().count(), GAMES.len());
        assert_eq!(store.games.total(), 3);
    }

    #[test]
    fn document_shape() {
        let mut m = Merger::new();
        m.admit_live(rec("今彩539", 3, 5, "113000050", Source::Api));
        let mut jackpots = Jackpots::new();
        jackpots.insert("大樂透".into(), "1億2,000萬".into());

        let store = CanonicalStore::assemble(m, jackpots, Local::now());
        let v: Value = serde_json::to_value(&store).unwrap();

        assert!(v["last_updated"].is_string());
        assert_eq!(v["jackpots"]["大樂透"], "1億2,000萬");
        let games = v["games"].as_object().unwrap();
        let names: Vec<_> = games.keys().map(String::as_str).collect();
        let expected: Vec<_> = GAMES.iter().map(|g| g.name).collect();
        assert_eq!(names, expected);
        assert_eq!(
            v["games"]["今彩539"][0],
            serde_json::json!({"date":"2024-03-05","period":"113000050","numbers":[1,2],"source":"api"})
        );
    }

    #[test]
    fn minimal_has_every_game_empty() {
        let v = serde_json::to_value(CanonicalStore::minimal(Local::now())).unwrap();
        assert_eq!(v["jackpots"], serde_json::json!({}));
        for g in GAMES {
            assert_eq!(v["games"][g.name], serde_json::json!([]));
        }
    }
}
