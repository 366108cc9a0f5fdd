//! Sentence vectorization: fit a TF-IDF vocabulary, then encode sentences with it.

mod vectorizer;

pub use vectorizer::{
    DEFAULT_MAX_FEATURES, EncodedVector, Encoder, VocabularyModel, VocabularyParams, tokenizer,
};
