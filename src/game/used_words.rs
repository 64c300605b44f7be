use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Words already served during the current session, in the order they were served.
#[derive(Debug, Clone, Default)]
pub struct UsedWords {
    served: Vec<String>,
    lookup: HashSet<String>,
}

impl UsedWords {
    pub fn served(&self) -> &[String] {
        &self.served
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn clear(&mut self) {
        self.served.clear();
        self.lookup.clear();
    }

    /// Picks a word nobody has seen this session. Once the corpus is exhausted the
    /// session restarts with only the freshly drawn word marked as used.
    pub fn draw<R: Rng + ?Sized>(&mut self, corpus: &[String], rng: &mut R) -> Option<String> {
        let available: Vec<&String> = corpus
            .iter()
            .filter(|word| !self.lookup.contains(word.as_str()))
            .collect();

        let word = match available.choose(rng) {
            Some(word) => word.to_string(),
            None => {
                let word = corpus.choose(rng)?.to_string();
                log::warn!(
                    "Ran out of unused words, starting a new cycle. ServedWords: '{}', Corpus: '{}'.",
                    self.served.len(),
                    corpus.len()
                );
                self.clear();
                word
            }
        };

        self.lookup.insert(word.clone());
        self.served.push(word.clone());
        Some(word)
    }
}
