use ahash::HashMap;
use tracing::{debug, info};

use super::params::VocabularyParams;
use crate::{PreProcessingError, PreProcessingResult};

/// A bounded vocabulary with smoothed inverse document frequencies.
///
/// Only [`VocabularyModel::fit`], [`VocabularyModel::from_parts`] and
/// (with the `bincode` feature) [`VocabularyModel::from_bytes`] produce one,
/// and there are no mutating methods, so a model is frozen once built.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VocabularyModel {
    /// Token to feature index, indices dense in `[0, idf.len())`.
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    max_features: usize,
}

/// Per-token counters gathered in one pass over the corpus.
#[derive(Debug)]
struct TermCount<'a> {
    token: &'a str,
    /// Occurrences across the whole corpus; only used for ranking.
    term_frequency: usize,
    /// Sentences containing the token at least once.
    document_frequency: usize,
    /// 1-based index of the last sentence that bumped `document_frequency`.
    last_sentence: usize,
}

/// Distinct tokens in first-seen order.
#[derive(Debug, Default)]
struct TermStatistics<'a> {
    terms: Vec<TermCount<'a>>,
    slots: HashMap<&'a str, usize>,
}

impl<'a> TermStatistics<'a> {
    fn collect<S, T>(corpus: &'a [S]) -> Self
    where
        S: AsRef<[T]>,
        T: AsRef<str> + 'a,
    {
        let mut stats = Self::default();
        for (sentence_idx, sentence) in corpus.iter().enumerate() {
            let sentence_id = sentence_idx + 1;
            for token in sentence.as_ref() {
                stats.record(token.as_ref(), sentence_id);
            }
        }
        stats
    }

    fn record(&mut self, token: &'a str, sentence_id: usize) {
        let slot = *self.slots.entry(token).or_insert_with(|| {
            self.terms.push(TermCount {
                token,
                term_frequency: 0,
                document_frequency: 0,
                last_sentence: 0,
            });
            self.terms.len() - 1
        });

        let term = &mut self.terms[slot];
        term.term_frequency += 1;
        if term.last_sentence != sentence_id {
            term.last_sentence = sentence_id;
            term.document_frequency += 1;
        }
    }

    fn len(&self) -> usize {
        self.terms.len()
    }

    /// Top `max_features` terms by total frequency.
    ///
    /// The sort is stable, so equal counts keep first-seen order.
    fn ranked(self, max_features: usize) -> Vec<TermCount<'a>> {
        let mut terms = self.terms;
        terms.sort_by(|a, b| b.term_frequency.cmp(&a.term_frequency));
        if terms.len() > max_features {
            debug!(
                distinct_tokens = terms.len(),
                max_features, "Truncating vocabulary to the most frequent tokens"
            );
            terms.truncate(max_features);
        }
        terms
    }
}

/// `ln((1 + n) / (1 + df)) + 1`, which stays strictly positive.
fn smoothed_idf(num_sentences: f64, document_frequency: usize) -> f64 {
    ((num_sentences + 1.0) / (document_frequency as f64 + 1.0)).ln() + 1.0
}

impl VocabularyModel {
    /// Learns the vocabulary and idf weights from an already tokenized corpus.
    ///
    /// Vocabulary indices follow the frequency ranking, so index 0 is the
    /// most frequent token.
    ///
    /// # Errors
    /// - [`PreProcessingError::InvalidArgument`] if `params.max_features()` is zero.
    /// - [`PreProcessingError::EmptyCorpus`] if there are no sentences or no tokens.
    pub fn fit<S, T>(corpus: &[S], params: VocabularyParams) -> PreProcessingResult<Self>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        params.validate()?;
        info!(
            num_sentences = corpus.len(),
            max_features = params.max_features(),
            "Learning TF-IDF vocabulary"
        );
        if corpus.is_empty() {
            return Err(PreProcessingError::EmptyCorpus);
        }

        let stats = TermStatistics::collect(corpus);
        if stats.len() == 0 {
            return Err(PreProcessingError::EmptyCorpus);
        }
        debug!(
            distinct_tokens = stats.len(),
            "Counted term and document frequencies"
        );

        let num_sentences = corpus.len() as f64;
        let ranked = stats.ranked(params.max_features());

        let mut vocabulary =
            HashMap::with_capacity_and_hasher(ranked.len(), ahash::RandomState::default());
        let mut idf = Vec::with_capacity(ranked.len());
        for (index, term) in ranked.into_iter().enumerate() {
            idf.push(smoothed_idf(num_sentences, term.document_frequency));
            vocabulary.insert(term.token.to_owned(), index);
        }

        info!(vocab_size = idf.len(), "TF-IDF vocabulary learned");
        Ok(Self {
            vocabulary,
            idf,
            max_features: params.max_features(),
        })
    }

    /// Rebuilds a model from its three persisted fields.
    ///
    /// # Errors
    /// [`PreProcessingError::ModelNotFitted`] if the parts could not have come
    /// out of [`VocabularyModel::fit`].
    pub fn from_parts<I>(
        vocabulary: I,
        idf: Vec<f64>,
        max_features: usize,
    ) -> PreProcessingResult<Self>
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let model = Self {
            vocabulary: vocabulary.into_iter().collect(),
            idf,
            max_features,
        };
        model.ensure_fitted()?;
        Ok(model)
    }

    /// Checks the invariants every fitted model holds.
    pub(crate) fn ensure_fitted(&self) -> PreProcessingResult<()> {
        let num_features = self.idf.len();
        let not_fitted = |reason: String| Err(PreProcessingError::ModelNotFitted(reason));

        if num_features == 0 {
            return not_fitted("vocabulary is empty".to_string());
        }
        if self.vocabulary.len() != num_features {
            return not_fitted(format!(
                "vocabulary has {} terms but idf has {num_features} weights",
                self.vocabulary.len()
            ));
        }
        if num_features > self.max_features {
            return not_fitted(format!(
                "{num_features} terms exceed max_features = {}",
                self.max_features
            ));
        }

        // Equal lengths plus unique in-range indices means the indices are dense.
        let mut seen = vec![false; num_features];
        for (token, &index) in &self.vocabulary {
            if index >= num_features || std::mem::replace(&mut seen[index], true) {
                return not_fitted(format!("index {index} of {token:?} is out of range or shared"));
            }
        }

        if let Some((index, weight)) = self
            .idf
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return not_fitted(format!("idf[{index}] = {weight} is not a positive weight"));
        }
        Ok(())
    }

    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Vocabulary size `V`, the length of every encoded vector.
    #[must_use]
    pub fn num_features(&self) -> usize {
        self.idf.len()
    }

    #[must_use]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    /// Tokens in feature-index order.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.num_features()];
        for (token, &index) in &self.vocabulary {
            if let Some(slot) = names.get_mut(index) {
                *slot = token.as_str();
            }
        }
        names
    }
}

/// On-disk form of a model: tokens listed by feature index.
///
/// Writing the tokens in index order instead of the hash map keeps the bytes
/// identical across runs for the same model.
#[cfg(feature = "bincode")]
#[derive(Debug, bincode::Encode, bincode::Decode)]
struct ModelRecord {
    terms: Vec<String>,
    idf: Vec<f64>,
    max_features: usize,
}

#[cfg(feature = "bincode")]
impl VocabularyModel {
    pub fn to_bytes(&self) -> PreProcessingResult<Vec<u8>> {
        let record = ModelRecord {
            terms: self.feature_names().into_iter().map(str::to_owned).collect(),
            idf: self.idf.clone(),
            max_features: self.max_features,
        };
        Ok(bincode::encode_to_vec(&record, bincode::config::standard())?)
    }

    /// Decodes a model written by [`VocabularyModel::to_bytes`].
    ///
    /// The decoded parts go through [`VocabularyModel::from_parts`], so a
    /// record with repeated tokens or bad weights is `ModelNotFitted`.
    pub fn from_bytes(bytes: &[u8]) -> PreProcessingResult<Self> {
        let (record, _): (ModelRecord, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        let vocabulary = record
            .terms
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, index));
        Self::from_parts(vocabulary, record.idf, record.max_features)
    }
}
