use serde::{Deserialize, Serialize};

/// Which game produced a score. Decides how scores rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Score is the number of correctly spelled words. Higher is better.
    Spelling,
    /// Score is the number of seconds taken to clear the board. Lower is better.
    Matching,
}

impl GameMode {
    /// Whether `a` ranks strictly above `b` for this mode.
    pub fn beats(self, a: u32, b: u32) -> bool {
        match self {
            GameMode::Spelling => a > b,
            GameMode::Matching => a < b,
        }
    }
}

/// The payload handed to the persistence collaborator when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub name: String,
    pub list_id: String,
    pub mode: GameMode,
    pub score: u32,
}

/// Receives finished-session scores (local leaderboard, outbox for a remote proxy, ...).
/// Submission is fire-and-forget: the caller never waits on or rolls back after it.
pub trait ScoreSink {
    fn submit(&mut self, record: ScoreRecord);
}

impl ScoreSink for Vec<ScoreRecord> {
    fn submit(&mut self, record: ScoreRecord) {
        self.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_ranks_high_scores_first() {
        assert!(GameMode::Spelling.beats(7, 3));
        assert!(!GameMode::Spelling.beats(3, 3));
    }

    #[test]
    fn matching_ranks_fast_times_first() {
        assert!(GameMode::Matching.beats(42, 90));
        assert!(!GameMode::Matching.beats(90, 42));
    }

    #[test]
    fn record_json_shape() {
        let rec = ScoreRecord {
            name: "Nok".into(),
            list_id: "week_3".into(),
            mode: GameMode::Spelling,
            score: 8,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Nok","listId":"week_3","mode":"spelling","score":8}"#
        );
    }
}
