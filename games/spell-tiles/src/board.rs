use lexi_engine::{Rng, TileId};
use serde::Serialize;

/// Shown in the answer text for a letter slot that has no tile yet.
pub const PLACEHOLDER: char = '_';

/// One shuffled letter. The id keeps duplicate letters apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
}

/// One character position of the target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Word separator. Never holds a tile.
    Space,
    /// A letter position, holding at most one tile.
    Letter { expected: char, tile: Option<Tile> },
}

impl Slot {
    pub fn is_space(&self) -> bool {
        matches!(self, Slot::Space)
    }

    pub fn tile(&self) -> Option<Tile> {
        match self {
            Slot::Letter { tile, .. } => *tile,
            Slot::Space => None,
        }
    }
}

/// Result of checking a full board against the target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Uppercase, trimmed, whitespace runs collapsed to one space.
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Fill-in puzzle state for one target word.
///
/// Every tile is owned either by the pool or by exactly one slot. Together
/// they always carry the letters of the target (spaces excluded).
#[derive(Debug, Clone)]
pub struct PuzzleRound {
    target: String,
    slots: Vec<Slot>,
    pool: Vec<Tile>,
    selected: Option<usize>,
    locked: bool,
    feedback: Option<Verdict>,
}

impl PuzzleRound {
    /// Build the round for `word`.
    ///
    /// With `previous_answer` (the word was solved earlier) the answer's letters
    /// are pre-placed in slot order and the round is locked. Otherwise the
    /// letters are shuffled into the pool.
    pub fn begin(word: &str, previous_answer: Option<&str>, rng: &mut Rng) -> Self {
        let target = normalize_word(word);
        let slots = target
            .chars()
            .map(|c| {
                if c == ' ' {
                    Slot::Space
                } else {
                    Slot::Letter { expected: c, tile: None }
                }
            })
            .collect();

        let mut round = Self {
            target,
            slots,
            pool: Vec::new(),
            selected: None,
            locked: false,
            feedback: None,
        };

        match previous_answer {
            Some(answer) => round.place_solved(answer),
            None => round.deal(rng),
        }
        round
    }

    fn place_solved(&mut self, answer: &str) {
        let mut letters = answer
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>()
            .into_iter();
        let mut next_id = 0u32;

        for slot in &mut self.slots {
            if let Slot::Letter { tile, .. } = slot {
                if let Some(letter) = letters.next() {
                    *tile = Some(Tile { id: TileId(next_id), letter });
                    next_id += 1;
                }
            }
        }
        self.pool.clear();
        self.locked = true;
        self.feedback = Some(Verdict::Correct);
    }

    /// Empty every slot and shuffle all letters into a fresh pool.
    /// Ids follow pool order, so they say nothing about the solution.
    fn deal(&mut self, rng: &mut Rng) {
        let mut letters: Vec<char> = self
            .slots
            .iter_mut()
            .filter_map(|slot| match slot {
                Slot::Letter { expected, tile } => {
                    *tile = None;
                    Some(*expected)
                }
                Slot::Space => None,
            })
            .collect();
        rng.shuffle(&mut letters);

        self.pool = letters
            .into_iter()
            .enumerate()
            .map(|(i, letter)| Tile { id: TileId(i as u32), letter })
            .collect();
        self.selected = None;
        self.feedback = None;
    }

    /// Mark a pool tile as the one to place next. Replaces any earlier selection.
    pub fn select_tile(&mut self, pool_index: usize) -> bool {
        if self.locked || pool_index >= self.pool.len() {
            return false;
        }
        self.selected = Some(pool_index);
        true
    }

    /// Move the selected tile into an empty letter slot.
    pub fn place_selected(&mut self, slot_index: usize) -> bool {
        if self.locked {
            return false;
        }
        let Some(pool_index) = self.selected else {
            return false;
        };
        if !matches!(self.slots.get(slot_index), Some(Slot::Letter { tile: None, .. })) {
            return false;
        }
        if pool_index >= self.pool.len() {
            self.selected = None;
            return false;
        }

        let placed = self.pool.remove(pool_index);
        if let Some(Slot::Letter { tile, .. }) = self.slots.get_mut(slot_index) {
            *tile = Some(placed);
        }
        self.selected = None;
        self.feedback = None;
        true
    }

    /// Return a placed tile to the end of the pool.
    pub fn clear_slot(&mut self, slot_index: usize) -> bool {
        if self.locked {
            return false;
        }
        let Some(Slot::Letter { tile, .. }) = self.slots.get_mut(slot_index) else {
            return false;
        };
        let Some(taken) = tile.take() else {
            return false;
        };
        self.pool.push(taken);
        self.feedback = None;
        true
    }

    /// Discard all placements and reshuffle the same letters.
    pub fn reset(&mut self, rng: &mut Rng) -> bool {
        if self.locked {
            return false;
        }
        self.deal(rng);
        true
    }

    /// The board as text: placed letters, `_` for open slots, spaces kept.
    pub fn answer_text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Space => ' ',
                Slot::Letter { tile: Some(t), .. } => t.letter,
                Slot::Letter { tile: None, .. } => PLACEHOLDER,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| !matches!(slot, Slot::Letter { tile: None, .. }))
    }

    /// `None` while any letter slot is open. Compares letters, never tile ids.
    pub fn verdict(&self) -> Option<Verdict> {
        if !self.is_complete() {
            return None;
        }
        if normalize_word(&self.answer_text()) == self.target {
            Some(Verdict::Correct)
        } else {
            Some(Verdict::Wrong)
        }
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.selected = None;
    }

    pub fn set_feedback(&mut self, verdict: Verdict) {
        self.feedback = Some(verdict);
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn pool(&self) -> &[Tile] {
        &self.pool
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn feedback(&self) -> Option<Verdict> {
        self.feedback
    }
}
