use lexi_engine::TileId;
use serde::Serialize;

use crate::board::{PuzzleRound, Slot, Verdict};
use crate::session::{SessionPhase, SpellingSession, WordStatus};

/// Everything the view needs to draw a session. Expected letters are never
/// included; only placed tiles are visible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub player: String,
    pub list_id: String,
    pub phase: SessionPhase,
    pub current_index: usize,
    pub word_count: usize,
    pub score: u32,
    pub progress: Vec<WordStatus>,
    pub round: RoundSnapshot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub slots: Vec<SlotView>,
    pub pool: Vec<TileView>,
    pub selected: Option<usize>,
    pub locked: bool,
    pub feedback: Option<Verdict>,
    /// Placed letters with `_` for empty slots.
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub space: bool,
    pub letter: Option<char>,
    pub tile: Option<TileId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileView {
    pub id: TileId,
    pub letter: char,
}

impl RoundSnapshot {
    pub fn capture(round: &PuzzleRound) -> Self {
        let slots = round
            .slots()
            .iter()
            .map(|slot| match slot {
                Slot::Space => SlotView {
                    space: true,
                    letter: None,
                    tile: None,
                },
                Slot::Letter { tile, .. } => SlotView {
                    space: false,
                    letter: tile.map(|t| t.letter),
                    tile: tile.map(|t| t.id),
                },
            })
            .collect();

        Self {
            slots,
            pool: round
                .pool()
                .iter()
                .map(|t| TileView {
                    id: t.id,
                    letter: t.letter,
                })
                .collect(),
            selected: round.selected(),
            locked: round.is_locked(),
            feedback: round.feedback(),
            answer: round.answer_text(),
        }
    }
}

impl SessionSnapshot {
    pub fn capture(session: &SpellingSession) -> Self {
        Self {
            player: session.player().to_string(),
            list_id: session.list_id().to_string(),
            phase: session.phase(),
            current_index: session.current_index(),
            word_count: session.words().len(),
            score: session.score(),
            progress: session.progress().to_vec(),
            round: RoundSnapshot::capture(session.round()),
        }
    }
}

impl SpellingSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;

    fn session() -> SpellingSession {
        let words = vec!["Bill of lading".to_string(), "Berth".to_string()];
        SpellingSession::new(SessionConfig::default(), "Ann", "week_1", words, 7).unwrap()
    }

    #[test]
    fn fresh_round_hides_the_target() {
        let snap = session().snapshot();
        assert_eq!(snap.word_count, 2);
        assert_eq!(snap.round.slots.len(), 14);
        assert!(snap.round.slots[4].space);
        assert!(snap.round.slots.iter().all(|s| s.letter.is_none()));
        assert_eq!(snap.round.pool.len(), 12);
        assert_eq!(snap.round.answer, "____ __ ______");
    }

    #[test]
    fn json_shape() {
        let mut s = session();
        s.select_tile(0);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["phase"], "inProgress");
        assert_eq!(json["round"]["selected"], 0);
        assert_eq!(json["progress"][0]["status"], "unanswered");
        assert!(json["round"]["feedback"].is_null());
        assert!(json.get("words").is_none());
    }

    #[test]
    fn placed_tile_shows_in_slot() {
        let mut s = session();
        let letter = s.round().pool()[0].letter;
        let id = s.round().pool()[0].id;
        s.select_tile(0);
        s.place_selected(0);
        let snap = s.snapshot();
        assert_eq!(snap.round.slots[0].letter, Some(letter));
        assert_eq!(snap.round.slots[0].tile, Some(id));
        assert_eq!(snap.round.pool.len(), 11);
    }
}
