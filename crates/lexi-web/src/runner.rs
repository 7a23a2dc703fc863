use lexi_engine::bridge::protocol::{
    HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER, HEADER_MAX_EVENTS, HEADER_MAX_SOUNDS,
    HEADER_PROTOCOL_VERSION, HEADER_SNAPSHOT_DIRTY, HEADER_SOUND_COUNT, HEADER_SPEECH_PENDING,
    PROTOCOL_VERSION,
};
use lexi_engine::{
    EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    clock: FrameClock,
    /// Real time since the last update, handed to the game uncapped.
    pending_time: f32,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
    /// Header + sound ids + events, read by JS after every tick.
    frame_buffer: Vec<f32>,
    /// Last serialized snapshot; refreshed only when the game marks itself dirty.
    snapshot_json: String,
    /// Most recent speech request (the synthesizer cancels older ones anyway).
    speech_text: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = layout.allocate();

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            clock,
            pending_time: 0.0,
            layout,
            config,
            initialized: false,
            frame_counter: 0,
            frame_buffer,
            snapshot_json: String::from("null"),
            speech_text: String::new(),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.frame_buffer = self.layout.allocate();
        self.clock = FrameClock::new(self.config.fixed_dt);
        self.pending_time = 0.0;
        self.game.init(&mut self.ctx);
        self.refresh_snapshot();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: feed input and elapsed time to the game, then pack outputs.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.speech_text.clear();

        if dt.is_finite() && dt > 0.0 {
            self.pending_time += dt;
        }
        // The step cap only limits how often the game wakes; time is never dropped.
        let steps = self.clock.accumulate(dt);
        if steps > 0 || !self.input.is_empty() {
            self.ctx.begin_frame(self.pending_time);
            self.pending_time = 0.0;
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
        }

        if self.ctx.is_dirty() {
            self.refresh_snapshot();
        }
        if let Some(text) = self.ctx.speech.last() {
            self.speech_text = text.clone();
        }
        self.pack_frame();
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    fn refresh_snapshot(&mut self) {
        match serde_json::to_string(&self.game.snapshot()) {
            Ok(json) => self.snapshot_json = json,
            Err(e) => log::warn!("snapshot serialization failed: {}", e),
        }
    }

    fn pack_frame(&mut self) {
        let sounds = &self.ctx.sounds;
        let events = &self.ctx.events;
        let sound_count = sounds.len().min(self.layout.max_sounds);
        let event_count = events.len().min(self.layout.max_events);
        if sound_count < sounds.len() || event_count < events.len() {
            log::warn!(
                "frame overflow: dropped {} sounds, {} events",
                sounds.len() - sound_count,
                events.len() - event_count
            );
        }

        let buf = &mut self.frame_buffer;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        buf[HEADER_MAX_SOUNDS] = self.layout.max_sounds as f32;
        buf[HEADER_SOUND_COUNT] = sound_count as f32;
        buf[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        buf[HEADER_EVENT_COUNT] = event_count as f32;
        buf[HEADER_SNAPSHOT_DIRTY] = if self.ctx.is_dirty() { 1.0 } else { 0.0 };
        buf[HEADER_SPEECH_PENDING] = if self.speech_text.is_empty() { 0.0 } else { 1.0 };

        let sound_start = self.layout.sound_data_offset;
        for (slot, sound) in buf[sound_start..sound_start + sound_count]
            .iter_mut()
            .zip(sounds)
        {
            *slot = sound.0 as f32;
        }

        let event_start = self.layout.event_data_offset;
        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        buf[event_start..event_start + event_floats.len()].copy_from_slice(event_floats);
    }

    // ---- Accessors for wasm-bindgen exports ----

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn snapshot_json(&self) -> String {
        self.snapshot_json.clone()
    }

    pub fn speech_text(&self) -> String {
        self.speech_text.clone()
    }

    /// Drain queued score records as a JSON array for the persistence layer.
    pub fn take_scores_json(&mut self) -> String {
        let records = self.ctx.take_outbox();
        match serde_json::to_string(&records) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("score serialization failed: {}", e);
                String::from("[]")
            }
        }
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}
