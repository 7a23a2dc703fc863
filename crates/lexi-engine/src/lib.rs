pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod scores;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{TileId, SoundEvent, GameEvent};
pub use core::rng::Rng;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::word_bank::{WordBank, WordList, TermPair};
pub use bridge::protocol::ProtocolLayout;
pub use systems::speech::SpeechTable;
pub use scores::record::{GameMode, ScoreRecord, ScoreSink};
pub use scores::leaderboard::Leaderboard;
