use ahash::HashMap;
use ndarray::Array2;
use sprs::CsMat;
use tracing::{debug, info};

use super::{params::VocabularyParams, vocabulary_model::VocabularyModel};
use crate::PreProcessingResult;

/// One TF-IDF weight per vocabulary term, for a single sentence.
pub type EncodedVector = Vec<f64>;

/// Turns tokenized sentences into L2-normalized TF-IDF vectors using a fitted
/// [`VocabularyModel`].
///
/// Tokens missing from the vocabulary are ignored. A sentence with no known
/// tokens encodes to the all-zero vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder;

impl Encoder {
    /// Encodes each sentence as a dense vector of length
    /// [`VocabularyModel::num_features`], aligned with the input.
    ///
    /// # Errors
    /// [`crate::PreProcessingError::ModelNotFitted`] if `model` breaks the
    /// fitted-model invariants.
    pub fn transform<S, T>(
        model: &VocabularyModel,
        sentences: &[S],
    ) -> PreProcessingResult<Vec<EncodedVector>>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        let tfidf_matrix = Self::transform_sparse(model, sentences)?;
        let num_features = tfidf_matrix.cols();

        Ok(tfidf_matrix
            .outer_iterator()
            .map(|row_vec| {
                let mut dense = vec![0.0; num_features];
                for (col_idx, &val) in row_vec.iter() {
                    dense[col_idx] = val;
                }
                dense
            })
            .collect())
    }

    /// Same as [`Encoder::transform`], as a `(sentences, features)` matrix.
    pub fn transform_array<S, T>(
        model: &VocabularyModel,
        sentences: &[S],
    ) -> PreProcessingResult<Array2<f64>>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        let tfidf_matrix = Self::transform_sparse(model, sentences)?;
        let mut dense = Array2::zeros(tfidf_matrix.shape());
        for (row_idx, row_vec) in tfidf_matrix.outer_iterator().enumerate() {
            for (col_idx, &val) in row_vec.iter() {
                dense[[row_idx, col_idx]] = val;
            }
        }
        Ok(dense)
    }

    /// Encodes into a CSR matrix with sorted column indices per row.
    pub fn transform_sparse<S, T>(
        model: &VocabularyModel,
        sentences: &[S],
    ) -> PreProcessingResult<CsMat<f64>>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        model.ensure_fitted()?;
        info!(
            num_sentences = sentences.len(),
            num_features = model.num_features(),
            "Encoding sentences with TF-IDF"
        );

        let mut tfidf_matrix = count_matrix(model, sentences);
        let idf = model.idf();

        for mut row_vec in tfidf_matrix.outer_iterator_mut() {
            for (col_idx, val) in row_vec.iter_mut() {
                *val *= idf[col_idx];
            }
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }

        info!(non_zero_entries = tfidf_matrix.nnz(), "Encoding finished");
        Ok(tfidf_matrix)
    }

    /// Fits a model on `corpus` and encodes the same corpus with it.
    pub fn fit_transform<S, T>(
        corpus: &[S],
        params: VocabularyParams,
    ) -> PreProcessingResult<(VocabularyModel, Vec<EncodedVector>)>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        let model = VocabularyModel::fit(corpus, params)?;
        let encoded = Self::transform(&model, corpus)?;
        Ok((model, encoded))
    }
}

/// Raw in-vocabulary term counts, one CSR row per sentence.
fn count_matrix<S, T>(model: &VocabularyModel, sentences: &[S]) -> CsMat<f64>
where
    S: AsRef<[T]>,
    T: AsRef<str>,
{
    let mut indptr = Vec::with_capacity(sentences.len() + 1);
    let mut indices = Vec::new();
    let mut data = Vec::new();
    indptr.push(0);

    let mut counts: HashMap<usize, usize> = HashMap::default();
    for sentence in sentences {
        counts.clear();
        for token in sentence.as_ref() {
            if let Some(col_idx) = model.index_of(token.as_ref()) {
                *counts.entry(col_idx).or_insert(0) += 1;
            }
        }

        let mut row_entries = counts.iter().map(|(&c, &n)| (c, n)).collect::<Vec<_>>();
        row_entries.sort_unstable_by_key(|(col_idx, _)| *col_idx);
        for (col_idx, count) in row_entries {
            indices.push(col_idx);
            data.push(count as f64);
        }
        indptr.push(indices.len());
    }

    debug!(non_zero_entries = data.len(), "Counted vocabulary terms");
    CsMat::new((sentences.len(), model.num_features()), indptr, indices, data)
}
