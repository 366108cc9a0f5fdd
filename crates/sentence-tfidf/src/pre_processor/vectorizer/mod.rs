mod encoder;
mod params;
pub mod tokenizer;
mod vocabulary_model;

pub use encoder::{EncodedVector, Encoder};
pub use params::{DEFAULT_MAX_FEATURES, VocabularyParams};
pub use vocabulary_model::VocabularyModel;
