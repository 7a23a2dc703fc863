use lexi_engine::{GameMode, Rng, ScoreRecord, ScoreSink};
use serde::Serialize;

use crate::board::{PuzzleRound, Verdict};

/// Variant switches for the spelling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Check the board after every placement/removal. When false, only `submit` checks.
    pub auto_validate: bool,
    /// Freeze a word's round once it is spelled correctly.
    pub lock_on_correct: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_validate: true,
            lock_on_correct: true,
        }
    }
}

/// Per-word progress. `Correct` is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WordStatus {
    Unanswered,
    Correct { answer: String },
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    InProgress,
    /// The player reached the end (or asked to finish) and must confirm.
    AwaitingConfirmation,
    /// Score handed off. Terminal.
    Finalized,
}

/// What a round edit led to, for the caller's audio/UI cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected (locked round, bad index, wrong phase, ...).
    Ignored,
    /// State changed; no verdict.
    Changed,
    Correct,
    Wrong,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    /// Now showing the word at this index.
    Moved(usize),
    /// Past the last word: waiting for the player to confirm finishing.
    AwaitingConfirmation,
}

/// One player's run through one word list.
pub struct SpellingSession {
    config: SessionConfig,
    player: String,
    list_id: String,
    words: Vec<String>,
    progress: Vec<WordStatus>,
    index: usize,
    round: PuzzleRound,
    phase: SessionPhase,
    rng: Rng,
}

impl SpellingSession {
    /// Start on the first word. Returns `None` for an empty word list.
    pub fn new(
        config: SessionConfig,
        player: &str,
        list_id: &str,
        words: Vec<String>,
        seed: u64,
    ) -> Option<Self> {
        let first = words.first()?;
        let mut rng = Rng::new(seed);
        let round = PuzzleRound::begin(first, None, &mut rng);
        let progress = vec![WordStatus::Unanswered; words.len()];

        log::info!(
            "spelling session started: player={} list={} words={}",
            player,
            list_id,
            words.len()
        );

        Some(Self {
            config,
            player: player.to_string(),
            list_id: list_id.to_string(),
            words,
            progress,
            index: 0,
            round,
            phase: SessionPhase::InProgress,
            rng,
        })
    }

    fn in_progress(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    // -- Round edits --

    pub fn select_tile(&mut self, pool_index: usize) -> Outcome {
        if self.in_progress() && self.round.select_tile(pool_index) {
            Outcome::Changed
        } else {
            Outcome::Ignored
        }
    }

    pub fn place_selected(&mut self, slot_index: usize) -> Outcome {
        if !self.in_progress() || !self.round.place_selected(slot_index) {
            return Outcome::Ignored;
        }
        self.after_edit()
    }

    pub fn clear_slot(&mut self, slot_index: usize) -> Outcome {
        if !self.in_progress() || !self.round.clear_slot(slot_index) {
            return Outcome::Ignored;
        }
        self.after_edit()
    }

    /// Explicit "check answer". An unfinished board counts as wrong.
    pub fn submit(&mut self) -> Outcome {
        if !self.in_progress() || self.round.is_locked() {
            return Outcome::Ignored;
        }
        match self.round.verdict() {
            Some(verdict) => self.apply_verdict(verdict),
            None => self.apply_verdict(Verdict::Wrong),
        }
    }

    pub fn reset_round(&mut self) -> Outcome {
        if self.in_progress() && self.round.reset(&mut self.rng) {
            Outcome::Changed
        } else {
            Outcome::Ignored
        }
    }

    fn after_edit(&mut self) -> Outcome {
        if !self.config.auto_validate {
            return Outcome::Changed;
        }
        match self.round.verdict() {
            Some(verdict) => self.apply_verdict(verdict),
            None => Outcome::Changed,
        }
    }

    fn apply_verdict(&mut self, verdict: Verdict) -> Outcome {
        self.round.set_feedback(verdict);
        match verdict {
            Verdict::Correct => {
                if !matches!(self.progress[self.index], WordStatus::Correct { .. }) {
                    self.progress[self.index] = WordStatus::Correct {
                        answer: self.round.answer_text(),
                    };
                }
                if self.config.lock_on_correct {
                    self.round.lock();
                }
                log::debug!("word {} correct, score {}", self.index, self.score());
                Outcome::Correct
            }
            Verdict::Wrong => Outcome::Wrong,
        }
    }

    // -- Navigation --

    /// Mark the current word skipped and move on. Solved words cannot be skipped.
    pub fn skip(&mut self) -> Transition {
        if !self.in_progress() || self.is_correct(self.index) {
            return Transition::Ignored;
        }
        self.progress[self.index] = WordStatus::Skipped;
        self.advance()
    }

    /// Next word, or the finish checkpoint after the last one.
    pub fn advance(&mut self) -> Transition {
        if !self.in_progress() {
            return Transition::Ignored;
        }
        if self.index + 1 < self.words.len() {
            self.go_to_word(self.index + 1)
        } else {
            self.phase = SessionPhase::AwaitingConfirmation;
            Transition::AwaitingConfirmation
        }
    }

    pub fn previous(&mut self) -> Transition {
        match self.index.checked_sub(1) {
            Some(prev) => self.go_to_word(prev),
            None => Transition::Ignored,
        }
    }

    /// Show the word at `index`. Solved words come back locked with their answer;
    /// anything else gets a fresh shuffle, and a skipped word is open again.
    pub fn go_to_word(&mut self, index: usize) -> Transition {
        if !self.in_progress() || index >= self.words.len() || index == self.index {
            return Transition::Ignored;
        }
        // Without per-word lock a solved word is dealt fresh; its record stays.
        let previous = match &self.progress[index] {
            WordStatus::Correct { answer } if self.config.lock_on_correct => Some(answer.as_str()),
            _ => None,
        };
        self.round = PuzzleRound::begin(&self.words[index], previous, &mut self.rng);
        if self.progress[index] == WordStatus::Skipped {
            self.progress[index] = WordStatus::Unanswered;
        }
        self.index = index;
        Transition::Moved(index)
    }

    // -- Finishing --

    pub fn request_finalize(&mut self) -> bool {
        if !self.in_progress() {
            return false;
        }
        self.phase = SessionPhase::AwaitingConfirmation;
        true
    }

    pub fn cancel_finalize(&mut self) -> bool {
        if self.phase != SessionPhase::AwaitingConfirmation {
            return false;
        }
        self.phase = SessionPhase::InProgress;
        true
    }

    /// Hand the final score to `sink` and end the session. Only valid while
    /// awaiting confirmation, so it submits at most once.
    pub fn confirm_finalize(&mut self, sink: &mut dyn ScoreSink) -> Option<ScoreRecord> {
        if self.phase != SessionPhase::AwaitingConfirmation {
            return None;
        }
        let record = ScoreRecord {
            name: self.player.clone(),
            list_id: self.list_id.clone(),
            mode: GameMode::Spelling,
            score: self.score(),
        };
        sink.submit(record.clone());
        self.phase = SessionPhase::Finalized;
        log::info!(
            "spelling session finalized: player={} score={}/{}",
            self.player,
            record.score,
            self.words.len()
        );
        Some(record)
    }

    // -- Queries --

    /// Number of words spelled correctly.
    pub fn score(&self) -> u32 {
        self.progress
            .iter()
            .filter(|s| matches!(s, WordStatus::Correct { .. }))
            .count() as u32
    }

    fn is_correct(&self, index: usize) -> bool {
        matches!(self.progress.get(index), Some(WordStatus::Correct { .. }))
    }

    pub fn progress(&self) -> &[WordStatus] {
        &self.progress
    }

    pub fn round(&self) -> &PuzzleRound {
        &self.round
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_word(&self) -> &str {
        &self.words[self.index]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Slot;

    fn session(words: &[&str]) -> SpellingSession {
        session_with(SessionConfig::default(), words)
    }

    fn session_with(config: SessionConfig, words: &[&str]) -> SpellingSession {
        let words = words.iter().map(|w| w.to_string()).collect();
        SpellingSession::new(config, "Ann", "week_1", words, 42).unwrap()
    }

    /// Spell the current word through the session, returning the last outcome.
    fn spell(s: &mut SpellingSession) -> Outcome {
        let mut last = Outcome::Ignored;
        for i in 0..s.round().slots().len() {
            let expected = match s.round().slots()[i] {
                Slot::Letter { expected, tile: None } => expected,
                _ => continue,
            };
            let idx = s.round().pool().iter().position(|t| t.letter == expected).unwrap();
            assert_eq!(s.select_tile(idx), Outcome::Changed);
            last = s.place_selected(i);
        }
        last
    }

    #[test]
    fn empty_list_has_no_session() {
        assert!(SpellingSession::new(SessionConfig::default(), "Ann", "w", vec![], 1).is_none());
    }

    #[test]
    fn berth_locks_and_scores() {
        let mut s = session(&["BERTH", "Pallet"]);
        assert_eq!(spell(&mut s), Outcome::Correct);
        assert!(s.round().is_locked());
        assert_eq!(
            s.progress()[0],
            WordStatus::Correct { answer: "BERTH".to_string() }
        );
        assert_eq!(s.score(), 1);
        assert_eq!(s.round().feedback(), Some(Verdict::Correct));
    }

    #[test]
    fn wrong_full_board_stays_open() {
        let mut s = session(&["ETA"]);
        for (slot, letter) in ['A', 'T', 'E'].iter().enumerate() {
            let idx = s.round().pool().iter().position(|t| t.letter == *letter).unwrap();
            s.select_tile(idx);
            let outcome = s.place_selected(slot);
            if slot < 2 {
                assert_eq!(outcome, Outcome::Changed);
            } else {
                assert_eq!(outcome, Outcome::Wrong);
            }
        }
        assert!(!s.round().is_locked());
        assert_eq!(s.progress()[0], WordStatus::Unanswered);
        assert_eq!(s.score(), 0);

        // Fix it: clear and respell.
        for slot in 0..3 {
            assert_eq!(s.clear_slot(slot), Outcome::Changed);
        }
        assert_eq!(spell(&mut s), Outcome::Correct);
    }

    #[test]
    fn locked_word_rejects_edits() {
        let mut s = session(&["Berth"]);
        spell(&mut s);
        assert_eq!(s.reset_round(), Outcome::Ignored);
        for slot in 0..5 {
            assert_eq!(s.clear_slot(slot), Outcome::Ignored);
        }
        assert_eq!(s.round().answer_text(), "BERTH");
        assert_eq!(s.submit(), Outcome::Ignored);
    }

    #[test]
    fn revisiting_a_solved_word_shows_the_answer() {
        let mut s = session(&["Berth", "Pallet"]);
        spell(&mut s);
        assert_eq!(s.advance(), Transition::Moved(1));
        assert!(!s.round().is_locked());
        assert_eq!(s.previous(), Transition::Moved(0));
        assert!(s.round().is_locked());
        assert!(s.round().pool().is_empty());
        assert_eq!(s.round().answer_text(), "BERTH");
    }

    #[test]
    fn skipped_word_can_be_revisited_and_solved() {
        let mut s = session(&["Berth", "Pallet"]);
        assert_eq!(s.skip(), Transition::Moved(1));
        assert_eq!(s.progress()[0], WordStatus::Skipped);
        assert_eq!(s.go_to_word(0), Transition::Moved(0));
        assert_eq!(s.progress()[0], WordStatus::Unanswered);
        assert!(!s.round().is_locked());
        assert_eq!(s.round().pool().len(), 5);
        assert_eq!(spell(&mut s), Outcome::Correct);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn solved_word_cannot_be_skipped() {
        let mut s = session(&["Berth", "Pallet"]);
        spell(&mut s);
        assert_eq!(s.skip(), Transition::Ignored);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn navigation_bounds() {
        let mut s = session(&["Berth", "Pallet"]);
        assert_eq!(s.previous(), Transition::Ignored);
        assert_eq!(s.go_to_word(2), Transition::Ignored);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.go_to_word(1), Transition::Moved(1));
        assert_eq!(s.current_word(), "Pallet");
    }

    #[test]
    fn skip_on_last_word_asks_for_confirmation() {
        let mut s = session(&["Berth", "Pallet"]);
        s.go_to_word(1);
        assert_eq!(s.skip(), Transition::AwaitingConfirmation);
        assert_eq!(s.progress()[1], WordStatus::Skipped);
        assert_eq!(s.phase(), SessionPhase::AwaitingConfirmation);
        assert_eq!(s.current_index(), 1);

        // Edits are held while the checkpoint is open.
        assert_eq!(s.select_tile(0), Outcome::Ignored);
        assert_eq!(s.go_to_word(0), Transition::Ignored);

        assert!(s.cancel_finalize());
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.select_tile(0), Outcome::Changed);
    }

    #[test]
    fn finalize_submits_exactly_once() {
        let mut s = session(&["Berth", "Pallet"]);
        spell(&mut s);
        let mut sink: Vec<ScoreRecord> = Vec::new();

        // Not yet at the checkpoint.
        assert!(s.confirm_finalize(&mut sink).is_none());
        assert!(sink.is_empty());

        assert!(s.request_finalize());
        let record = s.confirm_finalize(&mut sink).unwrap();
        assert_eq!(record.score, 1);
        assert_eq!(record.name, "Ann");
        assert_eq!(record.list_id, "week_1");
        assert_eq!(record.mode, GameMode::Spelling);
        assert_eq!(s.phase(), SessionPhase::Finalized);

        assert!(s.confirm_finalize(&mut sink).is_none());
        assert!(!s.request_finalize());
        assert!(!s.cancel_finalize());
        assert_eq!(s.advance(), Transition::Ignored);
        assert_eq!(s.reset_round(), Outcome::Ignored);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn explicit_submit_mode() {
        let config = SessionConfig {
            auto_validate: false,
            ..SessionConfig::default()
        };
        let mut s = session_with(config, &["Berth"]);
        assert_eq!(s.submit(), Outcome::Wrong);
        assert_eq!(s.round().feedback(), Some(Verdict::Wrong));

        // Filling the board does not check it by itself.
        assert_eq!(spell(&mut s), Outcome::Changed);
        assert_eq!(s.score(), 0);
        assert_eq!(s.submit(), Outcome::Correct);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn without_lock_a_correct_record_survives_edits() {
        let config = SessionConfig {
            lock_on_correct: false,
            ..SessionConfig::default()
        };
        let mut s = session_with(config, &["Berth"]);
        assert_eq!(spell(&mut s), Outcome::Correct);
        assert!(!s.round().is_locked());
        assert_eq!(s.clear_slot(0), Outcome::Changed);
        assert_eq!(s.score(), 1);
        assert_eq!(
            s.progress()[0],
            WordStatus::Correct { answer: "BERTH".to_string() }
        );
    }

    #[test]
    fn score_is_derived_from_progress() {
        let mut s = session(&["Berth", "ETA", "Pallet"]);
        spell(&mut s);
        s.advance();
        s.skip();
        spell(&mut s);
        assert_eq!(s.score(), 2);
        // Revisit and come back: no double counting.
        s.go_to_word(0);
        s.go_to_word(2);
        assert_eq!(s.score(), 2);
    }

    #[test]
    fn going_to_the_current_word_keeps_the_board() {
        let mut s = session(&["Berth", "ETA"]);
        assert_eq!(s.select_tile(0), Outcome::Changed);
        s.place_selected(0);
        let partial = s.round().answer_text();
        assert_eq!(s.go_to_word(s.current_index()), Transition::Ignored);
        assert_eq!(s.round().answer_text(), partial);
        assert_eq!(s.round().pool().len(), 4);
    }
}
