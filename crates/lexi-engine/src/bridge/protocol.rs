/// Frame buffer layout shared with JavaScript.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.
/// Snapshots and text payloads travel separately as JSON strings.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SOUNDS: usize = 2;
pub const HEADER_SOUND_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_SNAPSHOT_DIRTY: usize = 6;
pub const HEADER_SPEECH_PENDING: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per game event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sounds: usize, max_events: usize) -> Self {
        let sound_data_offset = HEADER_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_sounds,
            max_events,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_sounds, config.max_events)
    }

    /// Allocate a zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_sounds, config.max_sounds);
        assert_eq!(layout.max_events, config.max_events);
        assert_eq!(layout.sound_data_offset, HEADER_FLOATS);
        assert_eq!(
            layout.buffer_total_floats,
            HEADER_FLOATS + config.max_sounds + config.max_events * 4
        );
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20);
        assert_eq!(layout.sound_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 10);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 10 + 20 * EVENT_FLOATS);
        assert_eq!(layout.allocate().len(), layout.buffer_total_floats);
    }
}
