//! # sentence-tfidf
//!
//! Fixed-size TF-IDF vectors for tokenized sentences.
//!
//! Fitting and encoding are two separate steps over plain data: a
//! [`VocabularyModel`] is learned once from a corpus and is read-only
//! afterwards, and [`Encoder`] turns any number of sentences into dense,
//! L2-normalized vectors with it.
//!
//! ```rust
//! use sentence_tfidf::{Encoder, VocabularyModel, VocabularyParams};
//!
//! let corpus = vec![vec!["cat", "sat"], vec!["cat", "ran"], vec!["dog", "ran"]];
//! let model = VocabularyModel::fit(&corpus, VocabularyParams::new(4)?)?;
//!
//! let encoded = Encoder::transform(&model, &[vec!["cat", "sat"]])?;
//! assert_eq!(encoded[0].len(), model.num_features());
//! # Ok::<(), sentence_tfidf::PreProcessingError>(())
//! ```
//!
//! Tokenization is up to the caller; [`tokenizer`] has a whitespace splitter.

mod error;
pub mod pre_processor;

pub use error::{PreProcessingError, PreProcessingResult};
pub use pre_processor::{
    DEFAULT_MAX_FEATURES, EncodedVector, Encoder, VocabularyModel, VocabularyParams, tokenizer,
};
