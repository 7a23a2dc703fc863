use serde::{Deserialize, Serialize};

/// All vocabulary available to the games, grouped into ordered lists
/// (one per study week). Loaded from JSON at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordBank {
    pub lists: Vec<WordList>,
}

/// One selectable list, e.g. `week_3`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordList {
    /// Identifier used by the menu, the leaderboard and score records.
    pub id: String,
    /// Display title (e.g., "Week 3"). Falls back to the id.
    #[serde(default)]
    pub title: Option<String>,
    /// Words to spell, in session order.
    #[serde(default)]
    pub words: Vec<String>,
    /// Term/definition pairs for the matching game.
    #[serde(default)]
    pub terms: Vec<TermPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPair {
    pub term: String,
    pub definition: String,
}

impl WordList {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

impl WordBank {
    /// Parse a word bank from a JSON string.
    /// Blank words are dropped so a list never asks the player to spell nothing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut bank: WordBank = serde_json::from_str(json)?;
        for list in &mut bank.lists {
            list.words.retain(|w| !w.trim().is_empty());
        }
        Ok(bank)
    }

    pub fn get(&self, id: &str) -> Option<&WordList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().map(|l| l.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The list after `id`, wrapping to the first. Unknown ids start from the first list.
    pub fn next_id(&self, id: &str) -> Option<&str> {
        let n = self.lists.len();
        if n == 0 {
            return None;
        }
        let next = match self.position(id) {
            Some(i) => (i + 1) % n,
            None => 0,
        };
        Some(self.lists[next].id.as_str())
    }

    /// The list before `id`, wrapping to the last. Unknown ids start from the last list.
    pub fn previous_id(&self, id: &str) -> Option<&str> {
        let n = self.lists.len();
        if n == 0 {
            return None;
        }
        let prev = match self.position(id) {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        };
        Some(self.lists[prev].id.as_str())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }
}
