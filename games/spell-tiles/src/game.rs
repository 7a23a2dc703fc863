use lexi_engine::*;
use serde::Serialize;

use crate::board::Slot;
use crate::session::{Outcome, SessionConfig, SpellingSession, Transition};
use crate::snapshot::SessionSnapshot;

/// Default vocabulary, replaceable at runtime with `TEXT_WORD_BANK`.
const DEFAULT_WORD_BANK: &str = include_str!("../words.json");

// Game event kinds (Rust → React)
pub const EVENT_ROUND_CHANGED: f32 = 1.0;
pub const EVENT_SCORE: f32 = 2.0;
pub const EVENT_CONFIRM_REQUESTED: f32 = 3.0;
pub const EVENT_FINALIZED: f32 = 4.0;
pub const EVENT_FORM_ERROR: f32 = 5.0;

// Form error codes (payload `a` of EVENT_FORM_ERROR)
pub const FORM_MISSING_NAME: f32 = 1.0;
pub const FORM_UNKNOWN_LIST: f32 = 2.0;
pub const FORM_EMPTY_LIST: f32 = 3.0;

// Custom event kinds (React → Rust)
pub const CUSTOM_START: u32 = 1;
pub const CUSTOM_SUBMIT: u32 = 2;
pub const CUSTOM_RESET: u32 = 3;
pub const CUSTOM_SKIP: u32 = 4;
pub const CUSTOM_NEXT: u32 = 5;
pub const CUSTOM_PREVIOUS: u32 = 6;
pub const CUSTOM_SPEAK: u32 = 7;
pub const CUSTOM_FINISH_REQUEST: u32 = 8;
pub const CUSTOM_FINISH_CONFIRM: u32 = 9;
pub const CUSTOM_FINISH_CANCEL: u32 = 10;
pub const CUSTOM_RESTART: u32 = 11;
pub const CUSTOM_PREVIOUS_LIST: u32 = 12;
pub const CUSTOM_NEXT_LIST: u32 = 13;
/// `a` = word index.
pub const CUSTOM_GO_TO_WORD: u32 = 14;

// Text input kinds
pub const TEXT_PLAYER_NAME: u32 = 1;
pub const TEXT_LIST_ID: u32 = 2;
pub const TEXT_WORD_BANK: u32 = 3;
/// Previously stored score records, as a JSON array.
pub const TEXT_LEADERBOARD: u32 = 4;

const KEY_BACKSPACE: u32 = 8;
const KEY_ENTER: u32 = 13;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry<'a> {
    id: &'a str,
    title: &'a str,
    word_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpellTilesView<'a> {
    player: &'a str,
    list_id: &'a str,
    lists: Vec<ListEntry<'a>>,
    session: Option<SessionSnapshot>,
    leaderboard: Vec<ScoreRecord>,
}

pub struct SpellTiles {
    bank: WordBank,
    session_config: SessionConfig,
    leaderboard: Leaderboard,
    speech: SpeechTable,
    player: String,
    list_id: String,
    session: Option<SpellingSession>,
    leaderboard_size: usize,
    rng: Rng,
}

impl SpellTiles {
    pub fn new(seed: u64) -> Self {
        let bank = WordBank::from_json(DEFAULT_WORD_BANK).unwrap_or_else(|e| {
            log::warn!("embedded word bank is invalid: {}", e);
            WordBank::default()
        });
        Self::with_bank(bank, SessionConfig::default(), seed)
    }

    pub fn with_bank(bank: WordBank, session_config: SessionConfig, seed: u64) -> Self {
        let list_id = bank.ids().next().unwrap_or_default().to_string();
        Self {
            bank,
            session_config,
            leaderboard: Leaderboard::new(),
            speech: SpeechTable::default(),
            player: String::new(),
            list_id,
            session: None,
            leaderboard_size: GameConfig::default().leaderboard_size,
            rng: Rng::new(seed),
        }
    }

    pub fn session(&self) -> Option<&SpellingSession> {
        self.session.as_ref()
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Validate the start form and begin a fresh session on the selected list.
    fn start(&mut self, ctx: &mut EngineContext) {
        let player = self.player.trim().to_string();
        if player.is_empty() {
            ctx.emit_event(GameEvent::new(EVENT_FORM_ERROR, FORM_MISSING_NAME, 0.0, 0.0));
            return;
        }
        let Some(list) = self.bank.get(&self.list_id) else {
            ctx.emit_event(GameEvent::new(EVENT_FORM_ERROR, FORM_UNKNOWN_LIST, 0.0, 0.0));
            return;
        };

        let seed = self.rng.next_u64();
        match SpellingSession::new(self.session_config, &player, &list.id, list.words.clone(), seed) {
            Some(session) => {
                self.session = Some(session);
                self.emit_round_changed(ctx);
            }
            None => {
                log::warn!("list {} has no words", self.list_id);
                ctx.emit_event(GameEvent::new(EVENT_FORM_ERROR, FORM_EMPTY_LIST, 0.0, 0.0));
            }
        }
        ctx.mark_dirty();
    }

    fn cycle_list(&mut self, ctx: &mut EngineContext, forward: bool) {
        let next = if forward {
            self.bank.next_id(&self.list_id)
        } else {
            self.bank.previous_id(&self.list_id)
        };
        if let Some(id) = next {
            self.list_id = id.to_string();
            self.start(ctx);
        }
    }

    fn emit_round_changed(&self, ctx: &mut EngineContext) {
        if let Some(session) = &self.session {
            ctx.emit_event(GameEvent::new(
                EVENT_ROUND_CHANGED,
                session.current_index() as f32,
                session.words().len() as f32,
                session.score() as f32,
            ));
        }
    }

    fn on_outcome(&self, ctx: &mut EngineContext, outcome: Outcome) {
        match outcome {
            Outcome::Ignored => {
                log::debug!("input ignored");
                return;
            }
            Outcome::Changed => {}
            Outcome::Correct => {
                ctx.emit_sound(SoundEvent::CORRECT);
                if let Some(session) = &self.session {
                    ctx.emit_event(GameEvent::new(
                        EVENT_SCORE,
                        session.score() as f32,
                        session.words().len() as f32,
                        0.0,
                    ));
                }
            }
            Outcome::Wrong => ctx.emit_sound(SoundEvent::WRONG),
        }
        ctx.mark_dirty();
    }

    fn on_transition(&self, ctx: &mut EngineContext, transition: Transition) {
        match transition {
            Transition::Ignored => return,
            Transition::Moved(_) => self.emit_round_changed(ctx),
            Transition::AwaitingConfirmation => {
                ctx.emit_event(GameEvent::bare(EVENT_CONFIRM_REQUESTED));
            }
        }
        ctx.mark_dirty();
    }

    fn confirm_finish(&mut self, ctx: &mut EngineContext) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(record) = session.confirm_finalize(&mut *ctx) else {
            return;
        };
        self.leaderboard.submit(record.clone());
        ctx.emit_sound(SoundEvent::SESSION_COMPLETE);
        ctx.emit_event(GameEvent::new(
            EVENT_FINALIZED,
            record.score as f32,
            session.words().len() as f32,
            0.0,
        ));
        ctx.mark_dirty();
    }

    fn speak_current(&self, ctx: &mut EngineContext) {
        if let Some(session) = &self.session {
            ctx.request_speech(self.speech.spoken(session.current_word()));
        }
    }

    /// Slot tap: a filled slot gives its tile back, an empty one takes the selection.
    fn tap_slot(&mut self, ctx: &mut EngineContext, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let filled = session
            .round()
            .slots()
            .get(index)
            .and_then(Slot::tile)
            .is_some();
        let outcome = if filled {
            session.clear_slot(index)
        } else {
            session.place_selected(index)
        };
        self.on_outcome(ctx, outcome);
    }

    /// Typing a letter places the first matching pool tile into the first open slot.
    fn type_letter(&mut self, ctx: &mut EngineContext, letter: char) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let round = session.round();
        let slot = round
            .slots()
            .iter()
            .position(|s| matches!(s, Slot::Letter { tile: None, .. }));
        let tile = round.pool().iter().position(|t| t.letter == letter);
        let (Some(slot), Some(tile)) = (slot, tile) else {
            return;
        };
        session.select_tile(tile);
        let outcome = session.place_selected(slot);
        self.on_outcome(ctx, outcome);
    }

    fn backspace(&mut self, ctx: &mut EngineContext) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let last = session.round().slots().iter().rposition(|s| s.tile().is_some());
        if let Some(index) = last {
            let outcome = session.clear_slot(index);
            self.on_outcome(ctx, outcome);
        }
    }

    fn handle_command(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            CUSTOM_START | CUSTOM_RESTART => self.start(ctx),
            CUSTOM_PREVIOUS_LIST => self.cycle_list(ctx, false),
            CUSTOM_NEXT_LIST => self.cycle_list(ctx, true),
            CUSTOM_SPEAK => self.speak_current(ctx),
            CUSTOM_FINISH_CONFIRM => self.confirm_finish(ctx),
            _ => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                match kind {
                    CUSTOM_SUBMIT => {
                        let outcome = session.submit();
                        self.on_outcome(ctx, outcome);
                    }
                    CUSTOM_RESET => {
                        let outcome = session.reset_round();
                        self.on_outcome(ctx, outcome);
                    }
                    CUSTOM_SKIP => {
                        let transition = session.skip();
                        self.on_transition(ctx, transition);
                    }
                    CUSTOM_NEXT => {
                        let transition = session.advance();
                        self.on_transition(ctx, transition);
                    }
                    CUSTOM_PREVIOUS => {
                        let transition = session.previous();
                        self.on_transition(ctx, transition);
                    }
                    CUSTOM_GO_TO_WORD if a >= 0.0 => {
                        let transition = session.go_to_word(a as usize);
                        self.on_transition(ctx, transition);
                    }
                    CUSTOM_FINISH_REQUEST => {
                        if session.request_finalize() {
                            self.on_transition(ctx, Transition::AwaitingConfirmation);
                        }
                    }
                    CUSTOM_FINISH_CANCEL => {
                        if session.cancel_finalize() {
                            ctx.mark_dirty();
                        }
                    }
                    _ => log::debug!("unknown command kind {}", kind),
                }
            }
        }
    }

    fn handle_text(&mut self, ctx: &mut EngineContext, kind: u32, text: &str) {
        match kind {
            TEXT_PLAYER_NAME => self.player = text.to_string(),
            TEXT_LIST_ID => self.list_id = text.trim().to_string(),
            TEXT_WORD_BANK => match WordBank::from_json(text) {
                Ok(bank) => {
                    log::info!("word bank loaded: {} lists", bank.len());
                    if self.bank.get(&self.list_id).is_none() || bank.get(&self.list_id).is_none() {
                        self.list_id = bank.ids().next().unwrap_or_default().to_string();
                    }
                    self.bank = bank;
                }
                Err(e) => log::warn!("word bank rejected: {}", e),
            },
            TEXT_LEADERBOARD => match Leaderboard::from_json(text) {
                Ok(board) => self.leaderboard = board,
                Err(e) => log::warn!("leaderboard rejected: {}", e),
            },
            _ => {
                log::debug!("unknown text kind {}", kind);
                return;
            }
        }
        ctx.mark_dirty();
    }
}

impl Game for SpellTiles {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_sounds: 8,
            max_events: 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.leaderboard_size = self.config().leaderboard_size;
        log::info!("word bank: {} lists", self.bank.len());
        ctx.mark_dirty();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match event {
                InputEvent::TileTap { index } => {
                    if let Some(session) = self.session.as_mut() {
                        let outcome = session.select_tile(*index);
                        self.on_outcome(ctx, outcome);
                    }
                }
                InputEvent::SlotTap { index } => self.tap_slot(ctx, *index),
                InputEvent::KeyDown { key_code } => match *key_code {
                    KEY_ENTER => self.handle_command(ctx, CUSTOM_SUBMIT, 0.0),
                    KEY_BACKSPACE => self.backspace(ctx),
                    code @ 65..=90 => {
                        if let Some(letter) = char::from_u32(code) {
                            self.type_letter(ctx, letter);
                        }
                    }
                    _ => {}
                },
                InputEvent::Custom { kind, a, .. } => self.handle_command(ctx, *kind, *a),
                InputEvent::Text { kind, text } => self.handle_text(ctx, *kind, text),
            }
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        // A running session ranks against its own list, whatever the form says now.
        let ranked_list = self
            .session
            .as_ref()
            .map_or(self.list_id.as_str(), SpellingSession::list_id);
        let view = SpellTilesView {
            player: &self.player,
            list_id: &self.list_id,
            lists: self
                .bank
                .lists
                .iter()
                .map(|l| ListEntry {
                    id: &l.id,
                    title: l.title(),
                    word_count: l.words.len(),
                })
                .collect(),
            session: self.session.as_ref().map(SpellingSession::snapshot),
            leaderboard: self
                .leaderboard
                .top(GameMode::Spelling, ranked_list, self.leaderboard_size),
        };
        serde_json::to_value(&view).unwrap_or_else(|e| {
            log::warn!("snapshot failed: {}", e);
            serde_json::Value::Null
        })
    }
}
