/// Input event types the engine understands.
/// Discrete UI gestures: the view layer hit-tests its own DOM and reports indices.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A tile in the unplaced pool was tapped.
    TileTap { index: usize },
    /// A letter slot (or card) was tapped.
    SlotTap { index: usize },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A custom event from the UI layer (React buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// Text handed over by the UI layer (player name, list id, JSON payloads).
    Text { kind: u32, text: String },
}

/// A queue of input events.
/// JS pushes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::TileTap { index: 3 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], InputEvent::TileTap { index: 3 });
        assert!(q.is_empty());
    }

    #[test]
    fn text_event_keeps_payload() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Text { kind: 2, text: "Somchai".to_string() });
        let first = q.iter().next();
        match first {
            Some(InputEvent::Text { kind, text }) => {
                assert_eq!(*kind, 2);
                assert_eq!(text, "Somchai");
            }
            other => panic!("Expected Text event, got {:?}", other),
        }
    }
}
