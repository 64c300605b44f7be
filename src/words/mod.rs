use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::error::domain_error::DomainError;
use crate::error::Error;

/// A fixed, non-empty vocabulary the turn engine draws from.
pub trait WordSource: Send + Sync {
    fn all_words(&self) -> &[String];

    fn random_word(&self, category: Option<&str>) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WordList {
    categories: Vec<Category>,
    all_words: Vec<String>,
}

impl WordList {
    const SPANISH: &'static str = include_str!("../../words/es.txt");
    const GENERAL_CATEGORY: &'static str = "General";

    pub fn new(categories: Vec<Category>) -> Result<Self, Error> {
        let categories: Vec<Category> = categories
            .into_iter()
            .filter(|category| !category.words.is_empty())
            .collect();
        let all_words: Vec<String> = categories
            .iter()
            .flat_map(|category| category.words.iter().cloned())
            .collect();
        if all_words.is_empty() {
            return Err(Error::Domain(DomainError::EmptyWordList));
        }
        Ok(WordList {
            categories,
            all_words,
        })
    }

    /// The built-in Spanish vocabulary.
    pub fn spanish() -> Self {
        match WordList::parse(WordList::SPANISH) {
            Ok(words) => words,
            Err(error) => {
                // The embedded list is never empty, this only guards against a bad edit of the file
                log::error!("The built-in word list could not be parsed. Error: '{error}'.");
                WordList {
                    categories: vec![],
                    all_words: vec!["palabra".to_string()],
                }
            }
        }
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, Error> {
        let file_path = file_path.as_ref();
        let content = fs::read_to_string(file_path).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Could not load words file. File: '{}', Error: '{error}'.",
                file_path.display()
            ))
        })?;
        let words = WordList::parse(&content)?;
        log::info!(
            "Words loaded. File: '{}', Categories: '{}', Words: '{}'.",
            file_path.display(),
            words.categories.len(),
            words.all_words.len()
        );
        Ok(words)
    }

    /// `# Name` lines open a category, any other non blank line is a word of the open category.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut categories: Vec<Category> = vec![];
        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(name) = line.strip_prefix('#') {
                categories.push(Category {
                    name: name.trim().to_string(),
                    words: vec![],
                });
                continue;
            }
            match categories.last_mut() {
                Some(category) => category.words.push(line.to_string()),
                None => categories.push(Category {
                    name: WordList::GENERAL_CATEGORY.to_string(),
                    words: vec![line.to_string()],
                }),
            }
        }
        WordList::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn pick<R: Rng + ?Sized>(&self, category: Option<&str>, rng: &mut R) -> Option<&String> {
        let category = match category {
            Some(name) => self
                .categories
                .iter()
                .find(|category| category.name == name)
                .or_else(|| self.categories.first()),
            None => self.categories.choose(rng),
        };
        match category {
            Some(category) => category.words.choose(rng),
            None => self.all_words.choose(rng),
        }
    }
}

impl WordSource for WordList {
    fn all_words(&self) -> &[String] {
        &self.all_words
    }

    fn random_word(&self, category: Option<&str>) -> String {
        self.pick(category, &mut thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}
