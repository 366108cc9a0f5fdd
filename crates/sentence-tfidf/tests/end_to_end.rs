use std::{sync::Arc, thread};

use sentence_tfidf::{
    Encoder, PreProcessingError, VocabularyModel, VocabularyParams, tokenizer,
};

fn corpus() -> Vec<Vec<&'static str>> {
    vec![vec!["cat", "sat"], vec!["cat", "ran"], vec!["dog", "ran"]]
}

#[test]
fn test_cat_sat_scenario() {
    let model = VocabularyModel::fit(&corpus(), VocabularyParams::new(4).unwrap()).unwrap();
    assert_eq!(model.num_features(), 4);

    let idf_of = |t: &str| model.idf()[model.index_of(t).unwrap()];
    assert!((idf_of("cat") - 1.2877).abs() < 1e-4);
    assert!((idf_of("ran") - 1.2877).abs() < 1e-4);
    assert!((idf_of("sat") - 1.6931).abs() < 1e-4);
    assert!((idf_of("dog") - 1.6931).abs() < 1e-4);

    let encoded = Encoder::transform(&model, &[vec!["cat", "sat"]]).unwrap();
    let vector = &encoded[0];
    let cat = model.index_of("cat").unwrap();
    let sat = model.index_of("sat").unwrap();

    let denom = (idf_of("cat").powi(2) + idf_of("sat").powi(2)).sqrt();
    assert!((vector[cat] - idf_of("cat") / denom).abs() < 1e-12);
    assert!((vector[sat] - idf_of("sat") / denom).abs() < 1e-12);
    assert_eq!(vector[model.index_of("ran").unwrap()], 0.0);
    assert_eq!(vector[model.index_of("dog").unwrap()], 0.0);
}

#[test]
fn test_empty_inputs() {
    let empty: Vec<Vec<&str>> = vec![];
    assert!(matches!(
        VocabularyModel::fit(&empty, VocabularyParams::default()),
        Err(PreProcessingError::EmptyCorpus)
    ));

    let model = VocabularyModel::fit(&corpus(), VocabularyParams::default()).unwrap();
    assert!(Encoder::transform(&model, &empty).unwrap().is_empty());
}

#[test]
fn test_model_shared_across_threads() {
    let model = Arc::new(VocabularyModel::fit(&corpus(), VocabularyParams::default()).unwrap());
    let expected = Encoder::transform(&model, &corpus()).unwrap();

    let handles = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            thread::spawn(move || Encoder::transform(&model, &corpus()).unwrap())
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_raw_text_through_tokenizer() {
    let texts = ["The cat sat", "the cat ran", "A dog ran"];
    let corpus = tokenizer::tokenize(&texts, true);
    let model = VocabularyModel::fit(&corpus, VocabularyParams::new(3).unwrap()).unwrap();

    // "the", "cat" and "ran" each occur twice and beat "sat", "a", "dog".
    assert_eq!(model.feature_names(), vec!["the", "cat", "ran"]);

    let sentences = tokenizer::tokenize(&["The dog"], true);
    let encoded = Encoder::transform(&model, &sentences).unwrap();
    assert!((encoded[0][0] - 1.0).abs() < 1e-12);
    assert_eq!(&encoded[0][1..], &[0.0, 0.0]);
}
