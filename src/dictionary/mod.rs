use std::path::Path;
use tokio::fs;
use anyhow::{Context, Result};

/// Words of one fixed length, in file order
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    word_length: usize,
}

impl WordList {
    /// Load a word list from a file, keeping only words of `word_length` characters
    pub async fn load<P: AsRef<Path>>(path: P, word_length: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read word list {}", path.display()))?;
        let list = Self::from_text(&content, word_length);

        tracing::info!(
            "Loaded {} words of length {} from {}",
            list.len(),
            word_length,
            path.display()
        );

        Ok(list)
    }

    /// Build a word list from line-delimited text
    pub fn from_text(content: &str, word_length: usize) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|word| word.chars().count() == word_length)
            .map(str::to_string)
            .collect();

        Self { words, word_length }
    }

    /// Create an empty word list (used when loading fails)
    pub fn empty(word_length: usize) -> Self {
        Self {
            words: Vec::new(),
            word_length,
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
