use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use sentence_tfidf::tokenizer;

/// Sentences as read from the user, before tokenization.
#[derive(Debug, PartialEq)]
pub enum InputSource {
    /// Raw texts, split on whitespace before use.
    Raw(Vec<String>),
    /// Texts that already arrive as token lists.
    Tokenized(Vec<Vec<String>>),
}

impl InputSource {
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(texts) => texts.len(),
            Self::Tokenized(sentences) => sentences.len(),
        }
    }

    pub fn into_sentences(self, lowercase: bool) -> Vec<Vec<String>> {
        match self {
            Self::Raw(texts) => tokenizer::tokenize(&texts, lowercase),
            Self::Tokenized(sentences) => sentences,
        }
    }
}

/// One sentence per line. Blank lines are kept as empty sentences.
pub fn read_lines(path: &Path) -> Result<InputSource> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(InputSource::Raw(contents.lines().map(String::from).collect()))
}

/// A JSON array of token arrays, e.g. `[["cat", "sat"], ["dog"]]`.
pub fn read_token_json(path: &Path) -> Result<InputSource> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let sentences: Vec<Vec<String>> = serde_json::from_str(&contents)
        .with_context(|| format!("Expected a JSON array of token arrays in {}", path.display()))?;
    Ok(InputSource::Tokenized(sentences))
}

pub fn read_stdin() -> Result<InputSource> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(InputSource::Raw(vec![buffer]))
}
