use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::{GameMode, ScoreRecord, ScoreSink};

/// Local score store. Keeps every submission and ranks on read, so the
/// ranking policy can change without migrating stored data.
///
/// Serialized as a plain JSON array of records (the shape kept in browser storage).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best `limit` entries for one game mode and word list.
    ///
    /// Each player appears once, with their best score. Ties keep submission order.
    pub fn top(&self, mode: GameMode, list_id: &str, limit: usize) -> Vec<ScoreRecord> {
        let mut best: Vec<&ScoreRecord> = Vec::new();
        let mut slot_of: HashMap<&str, usize> = HashMap::new();

        for rec in self
            .records
            .iter()
            .filter(|r| r.mode == mode && r.list_id == list_id)
        {
            match slot_of.get(rec.name.as_str()) {
                Some(&i) => {
                    if mode.beats(rec.score, best[i].score) {
                        best[i] = rec;
                    }
                }
                None => {
                    slot_of.insert(rec.name.as_str(), best.len());
                    best.push(rec);
                }
            }
        }

        // Stable sort: equal scores stay in first-submitted order.
        best.sort_by(|a, b| match mode {
            GameMode::Spelling => b.score.cmp(&a.score),
            GameMode::Matching => a.score.cmp(&b.score),
        });
        best.into_iter().take(limit).cloned().collect()
    }
}

impl ScoreSink for Leaderboard {
    fn submit(&mut self, record: ScoreRecord) {
        log::info!(
            "leaderboard: {} scored {} on {} ({:?})",
            record.name,
            record.score,
            record.list_id,
            record.mode
        );
        self.records.push(record);
    }
}
