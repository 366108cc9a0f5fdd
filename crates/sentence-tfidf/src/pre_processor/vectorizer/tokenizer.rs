//! Whitespace tokenizer for callers that start from raw text.
//!
//! [`VocabularyModel::fit`](super::VocabularyModel::fit) and
//! [`Encoder::transform`](super::Encoder::transform) take tokens, never raw
//! strings; this is one way to produce them.

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

/// Batches with at least this many texts are split on the rayon pool.
const MIN_TEXTS_FOR_PARALLEL: usize = 100;

/// Smaller batches still go parallel once their total length reaches this.
const MIN_BYTES_FOR_PARALLEL: usize = 10_000;

fn progress_bar(len: usize) -> ProgressBar {
    let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len as u64)
        .with_style(style.progress_chars("#>-"))
        .with_message("Tokenizing texts")
}

/// Splits one text on Unicode whitespace.
#[must_use]
pub fn tokenize_text(text: &str, lowercase: bool) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            if lowercase {
                token.to_lowercase()
            } else {
                token.to_owned()
            }
        })
        .collect()
}

/// True for 100+ texts, or 10,000+ bytes of text in total.
fn should_use_parallel<T: AsRef<str>>(texts: &[T]) -> bool {
    texts.len() >= MIN_TEXTS_FOR_PARALLEL
        || texts.iter().map(|t| t.as_ref().len()).sum::<usize>() >= MIN_BYTES_FOR_PARALLEL
}

/// Tokenizes every text, keeping input order.
pub fn tokenize<T: AsRef<str> + Sync>(texts: &[T], lowercase: bool) -> Vec<Vec<String>> {
    let parallel = should_use_parallel(texts);
    debug!(num_texts = texts.len(), parallel, "Tokenizing texts");

    let pb = progress_bar(texts.len());
    let result = if parallel {
        texts
            .par_iter()
            .progress_with(pb.clone())
            .map(|text| tokenize_text(text.as_ref(), lowercase))
            .collect()
    } else {
        texts
            .iter()
            .progress_with(pb.clone())
            .map(|text| tokenize_text(text.as_ref(), lowercase))
            .collect()
    };
    pb.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_text_splits_on_whitespace() {
        assert_eq!(
            tokenize_text("  The cat\tsat\non the mat ", false),
            vec!["The", "cat", "sat", "on", "the", "mat"]
        );
        assert!(tokenize_text("   ", true).is_empty());
    }

    #[test]
    fn test_tokenize_text_lowercase() {
        assert_eq!(tokenize_text("Cat SAT", true), vec!["cat", "sat"]);
    }

    #[test]
    fn test_parallel_heuristic() {
        assert!(!should_use_parallel(&["short", "texts"]));
        assert!(should_use_parallel(&vec!["x"; MIN_TEXTS_FOR_PARALLEL]));
        assert!(should_use_parallel(&["y".repeat(MIN_BYTES_FOR_PARALLEL)]));
        assert!(!should_use_parallel(&["z".repeat(MIN_BYTES_FOR_PARALLEL - 1)]));
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let texts = (0..250)
            .map(|i| format!("Token{i} shared token{}", i % 7))
            .collect::<Vec<_>>();

        let parallel = tokenize(&texts, true);
        let sequential = texts
            .iter()
            .map(|text| tokenize_text(text, true))
            .collect::<Vec<_>>();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.len(), 250);
        assert_eq!(parallel[3], vec!["token3", "shared", "token3"]);
    }
}
