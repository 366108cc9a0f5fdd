use crate::{PreProcessingError, PreProcessingResult};

/// Vocabulary size used when the caller does not pick one.
pub const DEFAULT_MAX_FEATURES: usize = 100;

#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabularyParams {
    /// Upper bound on the number of terms kept, after ranking every distinct
    /// token by its total occurrence count across the corpus.
    max_features: usize,
}

impl VocabularyParams {
    pub fn new(max_features: usize) -> PreProcessingResult<Self> {
        let params = Self { max_features };
        params.validate()?;
        Ok(params)
    }

    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Deserialized params bypass `new`, so `fit` re-checks them here.
    pub(crate) fn validate(&self) -> PreProcessingResult<()> {
        if self.max_features == 0 {
            return Err(PreProcessingError::InvalidArgument(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for VocabularyParams {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl TryFrom<usize> for VocabularyParams {
    type Error = PreProcessingError;

    fn try_from(max_features: usize) -> PreProcessingResult<Self> {
        Self::new(max_features)
    }
}
