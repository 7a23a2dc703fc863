use crate::api::types::{GameEvent, SoundEvent};
use crate::input::queue::InputQueue;
use crate::scores::record::{ScoreRecord, ScoreSink};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of sound events per frame (default: 16).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// How many leaderboard rows the game reports (default: 10).
    pub leaderboard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_sounds: 16,
            max_events: 32,
            leaderboard_size: 10,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Called once per frame with every input received since the last frame.
    /// `ctx.dt()` is the real time since the previous update, uncapped, so
    /// stopwatches keep counting through throttled or backgrounded frames.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only view of the game state for a stateless view layer.
    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Texts the JS layer should speak this frame, already substituted.
    pub speech: Vec<String>,
    /// Finished-session scores waiting for the JS persistence layer.
    outbox: Vec<ScoreRecord>,
    dt: f32,
    snapshot_dirty: bool,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            speech: Vec::new(),
            outbox: Vec::new(),
            dt: 0.0,
            snapshot_dirty: true,
        }
    }

    /// Emit a sound event to be forwarded to JavaScript.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to JavaScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Ask the JS layer to speak `text`.
    pub fn request_speech(&mut self, text: impl Into<String>) {
        self.speech.push(text.into());
    }

    /// Flag that the game state changed and the view should re-read the snapshot.
    pub fn mark_dirty(&mut self) {
        self.snapshot_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.snapshot_dirty
    }

    /// Hand all pending score records to the caller.
    pub fn take_outbox(&mut self) -> Vec<ScoreRecord> {
        std::mem::take(&mut self.outbox)
    }

    pub fn outbox(&self) -> &[ScoreRecord] {
        &self.outbox
    }

    /// Real time covered by the current frame.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Set the time covered by the frame about to run. Called by the runner.
    pub fn begin_frame(&mut self, dt: f32) {
        self.dt = dt;
    }

    /// Clear per-frame transient data (sounds, events, speech, dirty flag).
    /// The score outbox survives until taken.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.speech.clear();
        self.snapshot_dirty = false;
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSink for EngineContext {
    fn submit(&mut self, record: ScoreRecord) {
        log::info!(
            "score queued for {}: {} on {}",
            record.name,
            record.score,
            record.list_id
        );
        self.outbox.push(record);
    }
}
