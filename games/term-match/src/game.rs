use lexi_engine::*;
use serde::Serialize;

use crate::board::{BoardSnapshot, FlipOutcome, MatchBoard, Resolved};

const DEFAULT_TERMS: &str = include_str!("../terms.json");

// Game event kinds (Rust → React)
pub const EVENT_BOARD_READY: f32 = 1.0;
pub const EVENT_PAIR_MATCHED: f32 = 2.0;
pub const EVENT_FINISHED: f32 = 3.0;
pub const EVENT_FORM_ERROR: f32 = 4.0;

pub const FORM_MISSING_NAME: f32 = 1.0;
pub const FORM_UNKNOWN_LIST: f32 = 2.0;

// Custom event kinds (React → Rust)
pub const CUSTOM_START: u32 = 1;
pub const CUSTOM_PREVIOUS_LIST: u32 = 2;
pub const CUSTOM_NEXT_LIST: u32 = 3;

// Text input kinds
pub const TEXT_PLAYER_NAME: u32 = 1;
pub const TEXT_LIST_ID: u32 = 2;
pub const TEXT_WORD_BANK: u32 = 3;
pub const TEXT_LEADERBOARD: u32 = 4;

/// The matching leaderboard shows the five fastest players.
const LEADERBOARD_SIZE: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TermMatchView<'a> {
    player: &'a str,
    list_id: &'a str,
    lists: Vec<&'a str>,
    board: Option<BoardSnapshot>,
    leaderboard: Vec<ScoreRecord>,
}

pub struct TermMatch {
    bank: WordBank,
    leaderboard: Leaderboard,
    speech: SpeechTable,
    player: String,
    list_id: String,
    board: Option<MatchBoard>,
    /// Player and list the current board was dealt for; the form may change mid-game.
    board_player: String,
    board_list: String,
    /// Last whole second shown, so the timer redraws once per second.
    shown_seconds: u32,
    rng: Rng,
}

impl TermMatch {
    pub fn new(seed: u64) -> Self {
        let bank = WordBank::from_json(DEFAULT_TERMS).unwrap_or_else(|e| {
            log::warn!("embedded term list is invalid: {}", e);
            WordBank::default()
        });
        Self::with_bank(bank, seed)
    }

    pub fn with_bank(bank: WordBank, seed: u64) -> Self {
        let list_id = bank.ids().next().unwrap_or_default().to_string();
        Self {
            bank,
            leaderboard: Leaderboard::new(),
            speech: SpeechTable::default(),
            player: String::new(),
            list_id,
            board: None,
            board_player: String::new(),
            board_list: String::new(),
            shown_seconds: 0,
            rng: Rng::new(seed),
        }
    }

    pub fn board(&self) -> Option<&MatchBoard> {
        self.board.as_ref()
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    fn start(&mut self, ctx: &mut EngineContext) {
        if self.player.trim().is_empty() {
            ctx.emit_event(GameEvent::new(EVENT_FORM_ERROR, FORM_MISSING_NAME, 0.0, 0.0));
            return;
        }
        let Some(list) = self.bank.get(&self.list_id) else {
            ctx.emit_event(GameEvent::new(EVENT_FORM_ERROR, FORM_UNKNOWN_LIST, 0.0, 0.0));
            return;
        };
        let board = MatchBoard::new(&list.terms, &mut self.rng);
        log::info!(
            "matching started: player={} list={} cards={}",
            self.player.trim(),
            self.list_id,
            board.cards().len()
        );
        ctx.emit_event(GameEvent::new(EVENT_BOARD_READY, board.cards().len() as f32, 0.0, 0.0));
        self.board = Some(board);
        self.board_player = self.player.trim().to_string();
        self.board_list = self.list_id.clone();
        self.shown_seconds = 0;
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

    fn flip(&mut self, ctx: &mut EngineContext, index: usize) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        match board.flip(index) {
            FlipOutcome::Ignored => return,
            FlipOutcome::Revealed | FlipOutcome::Pair | FlipOutcome::Mismatch => {
                ctx.emit_sound(SoundEvent::FLIP);
                ctx.request_speech(self.speech.spoken(&board.cards()[index].text));
            }
        }
        ctx.mark_dirty();
    }

    /// Run the pending pair delay and the clock. The score goes out exactly once,
    /// on the tick that clears the last pair.
    fn advance_clock(&mut self, ctx: &mut EngineContext) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let resolved = board.tick(ctx.dt());
        match resolved {
            Resolved::Nothing => {}
            Resolved::TurnedDown => {
                ctx.emit_sound(SoundEvent::WRONG);
                ctx.mark_dirty();
            }
            Resolved::Matched | Resolved::Finished => {
                ctx.emit_sound(SoundEvent::CORRECT);
                ctx.emit_event(GameEvent::new(
                    EVENT_PAIR_MATCHED,
                    board.matched_pairs() as f32,
                    (board.cards().len() / 2) as f32,
                    0.0,
                ));
                ctx.mark_dirty();
            }
        }

        if board.elapsed_seconds() != self.shown_seconds {
            self.shown_seconds = board.elapsed_seconds();
            ctx.mark_dirty();
        }

        if resolved == Resolved::Finished {
            let record = ScoreRecord {
                name: self.board_player.clone(),
                list_id: self.board_list.clone(),
                mode: GameMode::Matching,
                score: board.elapsed_seconds(),
            };
            ctx.emit_sound(SoundEvent::SESSION_COMPLETE);
            ctx.emit_event(GameEvent::new(EVENT_FINISHED, record.score as f32, 0.0, 0.0));
            self.leaderboard.submit(record.clone());
            ctx.submit(record);
        }
    }

    fn handle_text(&mut self, ctx: &mut EngineContext, kind: u32, text: &str) {
        match kind {
            TEXT_PLAYER_NAME => self.player = text.to_string(),
            TEXT_LIST_ID => self.list_id = text.trim().to_string(),
            TEXT_WORD_BANK => match WordBank::from_json(text) {
                Ok(bank) => {
                    if bank.get(&self.list_id).is_none() {
                        self.list_id = bank.ids().next().unwrap_or_default().to_string();
                    }
                    self.bank = bank;
                }
                Err(e) => log::warn!("term list rejected: {}", e),
            },
            TEXT_LEADERBOARD => match Leaderboard::from_json(text) {
                Ok(board) => self.leaderboard = board,
                Err(e) => log::warn!("leaderboard rejected: {}", e),
            },
            _ => return,
        }
        ctx.mark_dirty();
    }
}

impl Game for TermMatch {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_sounds: 8,
            max_events: 8,
            leaderboard_size: LEADERBOARD_SIZE,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("term lists: {}", self.bank.len());
        ctx.mark_dirty();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match event {
                InputEvent::TileTap { index } => self.flip(ctx, *index),
                InputEvent::Custom { kind, .. } => match *kind {
                    CUSTOM_START => self.start(ctx),
                    CUSTOM_PREVIOUS_LIST => self.cycle_list(ctx, false),
                    CUSTOM_NEXT_LIST => self.cycle_list(ctx, true),
                    _ => log::debug!("unknown command kind {}", kind),
                },
                InputEvent::Text { kind, text } => self.handle_text(ctx, *kind, text),
                _ => {}
            }
        }
        self.advance_clock(ctx);
    }

    fn snapshot(&self) -> serde_json::Value {
        let ranked_list = if self.board.is_some() { &self.board_list } else { &self.list_id };
        let view = TermMatchView {
            player: &self.player,
            list_id: &self.list_id,
            lists: self.bank.ids().collect(),
            board: self.board.as_ref().map(MatchBoard::snapshot),
            leaderboard: self
                .leaderboard
                .top(GameMode::Matching, ranked_list, LEADERBOARD_SIZE),
        };
        serde_json::to_value(&view).unwrap_or_else(|e| {
            log::warn!("snapshot failed: {}", e);
            serde_json::Value::Null
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    const BANK: &str = r#"{
        "lists": [
            { "id": "week_1", "terms": [
                { "term": "ETA", "definition": "Estimated time of arrival" },
                { "term": "Berth", "definition": "Place where a ship is moored" }
            ] },
            { "id": "week_2", "terms": [
                { "term": "Pallet", "definition": "Flat platform for stacking goods" }
            ] }
        ]
    }"#;

    fn frame(game: &mut TermMatch, ctx: &mut EngineContext, dt: f32, events: Vec<InputEvent>) {
        let mut queue = InputQueue::new();
        for e in events {
            queue.push(e);
        }
        ctx.clear_frame_data();
        ctx.begin_frame(dt);
        game.update(ctx, &queue);
    }

    fn started() -> (TermMatch, EngineContext) {
        let bank = WordBank::from_json(BANK).unwrap();
        let mut game = TermMatch::with_bank(bank, 9);
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        frame(
            &mut game,
            &mut ctx,
            0.0,
            vec![
                InputEvent::Text { kind: TEXT_PLAYER_NAME, text: "Ann".into() },
                InputEvent::Custom { kind: CUSTOM_START, a: 0.0, b: 0.0, c: 0.0 },
            ],
        );
        (game, ctx)
    }

    fn card(game: &TermMatch, pair: usize, side: Side) -> usize {
        game.board()
            .unwrap()
            .cards()
            .iter()
            .position(|c| c.pair == pair && c.side == side)
            .unwrap()
    }

    fn tap(index: usize) -> Vec<InputEvent> {
        vec![InputEvent::TileTap { index }]
    }

    #[test]
    fn start_needs_a_name() {
        let bank = WordBank::from_json(BANK).unwrap();
        let mut game = TermMatch::with_bank(bank, 1);
        let mut ctx = EngineContext::new();
        let start = InputEvent::Custom { kind: CUSTOM_START, a: 0.0, b: 0.0, c: 0.0 };
        frame(&mut game, &mut ctx, 0.0, vec![start]);
        assert!(game.board().is_none());
        assert_eq!(ctx.events[0].a, FORM_MISSING_NAME);
    }

    #[test]
    fn flipping_speaks_the_card() {
        let (mut g, mut ctx) = started();
        assert_eq!(g.board().unwrap().cards().len(), 4);
        let eta = card(&g, 0, Side::Term);
        frame(&mut g, &mut ctx, 0.0, tap(eta));
        assert_eq!(ctx.sounds, vec![SoundEvent::FLIP]);
        assert_eq!(ctx.speech, vec!["E T A".to_string()]);
    }

    #[test]
    fn clearing_the_board_records_time_once() {
        let (mut g, mut ctx) = started();
        frame(&mut g, &mut ctx, 2.0, vec![]);

        for pair in 0..2 {
            let t = card(&g, pair, Side::Term);
            let d = card(&g, pair, Side::Definition);
            frame(&mut g, &mut ctx, 0.0, tap(t));
            frame(&mut g, &mut ctx, 0.0, tap(d));
            frame(&mut g, &mut ctx, 1.0, vec![]);
        }
        assert!(g.board().unwrap().is_finished());
        assert!(ctx.sounds.contains(&SoundEvent::SESSION_COMPLETE));
        assert!(ctx.events.iter().any(|e| e.kind == EVENT_FINISHED && e.a == 4.0));

        frame(&mut g, &mut ctx, 5.0, vec![]);
        let records = ctx.take_outbox();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mode, GameMode::Matching);
        assert_eq!(records[0].score, 4);
        assert_eq!(g.leaderboard().len(), 1);
        assert_eq!(g.snapshot()["leaderboard"][0]["score"], 4);
    }

    #[test]
    fn mismatch_plays_wrong_after_delay() {
        let (mut g, mut ctx) = started();
        let a = card(&g, 0, Side::Term);
        let b = card(&g, 1, Side::Definition);
        frame(&mut g, &mut ctx, 0.0, tap(a));
        frame(&mut g, &mut ctx, 0.0, tap(b));
        frame(&mut g, &mut ctx, 0.5, vec![]);
        assert!(ctx.sounds.is_empty());
        frame(&mut g, &mut ctx, 0.5, vec![]);
        assert_eq!(ctx.sounds, vec![SoundEvent::WRONG]);
    }

    #[test]
    fn next_list_deals_a_new_board() {
        let (mut g, mut ctx) = started();
        let next = InputEvent::Custom { kind: CUSTOM_NEXT_LIST, a: 0.0, b: 0.0, c: 0.0 };
        frame(&mut g, &mut ctx, 0.0, vec![next]);
        assert_eq!(g.list_id(), "week_2");
        assert_eq!(g.board().unwrap().cards().len(), 2);
    }

    #[test]
    fn snapshot_hides_face_down_text() {
        let (g, _) = started();
        let snap = g.snapshot();
        let cards = snap["board"]["cards"].as_array().unwrap();
        assert!(cards.iter().all(|c| c["text"].is_null()));
    }

    #[test]
    fn list_edit_mid_game_keeps_the_board_list() {
        let (mut g, mut ctx) = started();
        frame(
            &mut g,
            &mut ctx,
            0.0,
            vec![InputEvent::Text { kind: TEXT_LIST_ID, text: "week_2".into() }],
        );
        for pair in 0..2 {
            let t = card(&g, pair, Side::Term);
            let d = card(&g, pair, Side::Definition);
            frame(&mut g, &mut ctx, 0.0, tap(t));
            frame(&mut g, &mut ctx, 0.0, tap(d));
            frame(&mut g, &mut ctx, 1.0, vec![]);
        }
        let records = ctx.take_outbox();
        assert_eq!(records[0].list_id, "week_1");
        assert_eq!(g.snapshot()["leaderboard"][0]["listId"], "week_1");
    }

    #[test]
    fn stopwatch_keeps_counting_through_long_frames() {
        let bank = WordBank::from_json(BANK).unwrap();
        let mut runner = lexi_web::GameRunner::new(TermMatch::with_bank(bank, 9));
        runner.init();
        runner.push_input(InputEvent::Text { kind: TEXT_PLAYER_NAME, text: "Ann".into() });
        runner.push_input(InputEvent::Custom { kind: CUSTOM_START, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.0);
        assert!(runner.game().board().is_some());

        for _ in 0..30 {
            runner.tick(5.0);
        }
        assert_eq!(runner.game().board().unwrap().elapsed_seconds(), 150);
    }

    #[test]
    fn default_terms_load() {
        let g = TermMatch::new(1);
        assert_eq!(g.list_id(), "week_1");
    }
}
