use lexi_engine::{Rng, TermPair};
use serde::Serialize;

/// Seconds a matched pair stays face up before it is taken off the table.
pub const MATCH_DELAY: f32 = 0.6;
/// Seconds a mismatched pair stays face up before turning back down.
pub const MISMATCH_DELAY: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Term,
    Definition,
}

#[derive(Debug, Clone)]
pub struct Card {
    /// Index of the term/definition pair this card belongs to.
    pub pair: usize,
    pub side: Side,
    pub text: String,
    pub matched: bool,
}

impl Card {
    fn is_partner(&self, other: &Card) -> bool {
        self.pair == other.pair && self.side != other.side
    }
}

/// Result of tapping a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    /// First card of a pair turned up.
    Revealed,
    /// Second card completes a pair; both clear after `MATCH_DELAY`.
    Pair,
    /// Second card does not fit; both turn down after `MISMATCH_DELAY`.
    Mismatch,
}

/// What `tick` resolved, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Nothing,
    Matched,
    TurnedDown,
    /// The last pair was matched.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    OneUp(usize),
    /// Two cards face up, waiting out the delay.
    Showing { a: usize, b: usize, matched: bool, timer: f32 },
}

/// A shuffled table of term and definition cards.
pub struct MatchBoard {
    cards: Vec<Card>,
    phase: Phase,
    elapsed: f32,
    finished: bool,
}

impl MatchBoard {
    /// Two cards per pair, shuffled.
    pub fn new(pairs: &[TermPair], rng: &mut Rng) -> Self {
        let mut cards: Vec<Card> = pairs
            .iter()
            .enumerate()
            .flat_map(|(pair, tp)| {
                [
                    Card { pair, side: Side::Term, text: tp.term.clone(), matched: false },
                    Card { pair, side: Side::Definition, text: tp.definition.clone(), matched: false },
                ]
            })
            .collect();
        rng.shuffle(&mut cards);

        Self {
            finished: cards.is_empty(),
            cards,
            phase: Phase::Idle,
            elapsed: 0.0,
        }
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.finished {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if !card.matched => {}
            _ => return FlipOutcome::Ignored,
        }
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::OneUp(index);
                FlipOutcome::Revealed
            }
            Phase::OneUp(first) if first != index => {
                let matched = self.cards[first].is_partner(&self.cards[index]);
                let timer = if matched { MATCH_DELAY } else { MISMATCH_DELAY };
                self.phase = Phase::Showing { a: first, b: index, matched, timer };
                if matched {
                    FlipOutcome::Pair
                } else {
                    FlipOutcome::Mismatch
                }
            }
            _ => FlipOutcome::Ignored,
        }
    }

    /// Advance the clock and resolve a pending pair once its delay runs out.
    pub fn tick(&mut self, dt: f32) -> Resolved {
        if self.finished || dt.is_nan() || dt <= 0.0 {
            return Resolved::Nothing;
        }
        self.elapsed += dt;

        let Phase::Showing { a, b, matched, timer } = self.phase else {
            return Resolved::Nothing;
        };
        let remaining = timer - dt;
        if remaining > 0.0 {
            self.phase = Phase::Showing { a, b, matched, timer: remaining };
            return Resolved::Nothing;
        }

        self.phase = Phase::Idle;
        if !matched {
            return Resolved::TurnedDown;
        }
        self.cards[a].matched = true;
        self.cards[b].matched = true;
        if self.cards.iter().all(|c| c.matched) {
            self.finished = true;
            log::info!("board cleared in {:.1}s", self.elapsed);
            Resolved::Finished
        } else {
            Resolved::Matched
        }
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        match self.phase {
            Phase::OneUp(i) => i == index,
            Phase::Showing { a, b, .. } => a == index || b == index,
            Phase::Idle => false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whole seconds, as recorded on the leaderboard.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed.floor() as u32
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count() / 2
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cards: self
                .cards
                .iter()
                .enumerate()
                .map(|(i, card)| {
                    let face_up = card.matched || self.is_face_up(i);
                    CardView {
                        side: card.side,
                        text: face_up.then(|| card.text.clone()),
                        face_up,
                        matched: card.matched,
                    }
                })
                .collect(),
            elapsed_seconds: self.elapsed_seconds(),
            finished: self.finished,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub cards: Vec<CardView>,
    pub elapsed_seconds: u32,
    pub finished: bool,
}

/// Face-down cards carry no text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub side: Side,
    pub text: Option<String>,
    pub face_up: bool,
    pub matched: bool,
}
