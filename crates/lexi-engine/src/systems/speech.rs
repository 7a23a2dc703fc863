use std::collections::HashMap;

/// Rewrites text before it is handed to the browser's speech synthesizer,
/// so acronyms are read letter by letter instead of as a word.
#[derive(Debug, Clone)]
pub struct SpeechTable {
    /// Uppercase token → spoken replacement.
    substitutions: HashMap<String, String>,
}

impl SpeechTable {
    /// A table with no substitutions.
    pub fn empty() -> Self {
        Self {
            substitutions: HashMap::new(),
        }
    }

    /// Add or replace a substitution. Matching is case-insensitive.
    pub fn with(mut self, token: &str, spoken: &str) -> Self {
        self.substitutions
            .insert(token.to_uppercase(), spoken.to_string());
        self
    }

    /// Text to speak for `text`: each whitespace-separated token found in the
    /// table is replaced, everything else is kept as written.
    pub fn spoken(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| {
                self.substitutions
                    .get(&token.to_uppercase())
                    .map(String::as_str)
                    .unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SpeechTable {
    fn default() -> Self {
        Self::empty()
            .with("IATA", "I A T A")
            .with("ETA", "E T A")
            .with("AWB", "A W B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acronym_inside_phrase() {
        let table = SpeechTable::default();
        assert_eq!(table.spoken("Agent IATA code"), "Agent I A T A code");
    }

    #[test]
    fn whole_text_acronym_any_case() {
        let table = SpeechTable::default();
        assert_eq!(table.spoken("eta"), "E T A");
        assert_eq!(table.spoken("AWB"), "A W B");
    }

    #[test]
    fn plain_words_untouched() {
        let table = SpeechTable::default();
        assert_eq!(table.spoken("Bill  of lading"), "Bill of lading");
        assert_eq!(table.spoken("Theta"), "Theta");
    }

    #[test]
    fn custom_entries() {
        let table = SpeechTable::empty().with("ETD", "E T D");
        assert_eq!(table.spoken("ETD"), "E T D");
        assert_eq!(table.spoken("ETA"), "ETA");
    }
}
