use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable identity of a letter tile within a puzzle round.
/// Two tiles carrying the same letter always have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

/// A sound cue requested by the game logic.
/// The numeric value maps to a game-defined cue in the JavaScript audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// Answer accepted.
    pub const CORRECT: SoundEvent = SoundEvent(1);
    /// Answer rejected.
    pub const WRONG: SoundEvent = SoundEvent(2);
    /// Session finalized / board cleared.
    pub const SESSION_COMPLETE: SoundEvent = SoundEvent(3);
    /// A card or tile was turned over.
    pub const FLIP: SoundEvent = SoundEvent(4);
}

/// A game event communicated from Rust to JavaScript through a flat f32 buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Event with only a kind and no payload.
    pub fn bare(kind: f32) -> Self {
        Self { kind, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let ev = GameEvent::new(2.0, 1.0, 0.5, 0.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&ev));
        assert_eq!(floats, &[2.0, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn tile_id_serializes_as_number() {
        let json = serde_json::to_string(&TileId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
