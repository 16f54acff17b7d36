//! Per-call TF-IDF vector space over normalized documents.
//!
//! The model is fit jointly over every document handed to `fit` (the ranking
//! engine passes all candidate documents plus the query as the last row), so
//! vocabulary and IDF weights are only meaningful within one ranking call.

use std::collections::{HashMap, HashSet};

/// Vocabulary and n-gram settings for the vector space.
#[derive(Debug, Clone)]
pub struct VectorSpaceConfig {
    /// A term must occur in at least this many documents.
    pub min_document_frequency: usize,
    /// Vocabulary cap, keeping the terms with the highest corpus counts.
    pub max_features: usize,
    /// Longest n-gram; unigrams are always included.
    pub max_ngram: usize,
}

impl Default for VectorSpaceConfig {
    fn default() -> Self {
        Self {
            min_document_frequency: 2,
            max_features: 5000,
            max_ngram: 2,
        }
    }
}

/// Sparse L2-normalized term weights as `(feature index, weight)`, ascending by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct TfIdfModel {
    /// Feature names in alphabetical order; position is the feature index.
    features: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    max_ngram: usize,
}

impl TfIdfModel {
    /// Fits vocabulary and smoothed IDF weights over `documents`.
    ///
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`. The resulting vocabulary may
    /// be empty, in which case every transformed vector is empty too.
    pub fn fit(documents: &[String], config: &VectorSpaceConfig) -> Self {
        let max_ngram = config.max_ngram.max(1);
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_count: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = extract_terms(doc, max_ngram);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_count.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut kept: Vec<(String, usize)> = document_frequency
            .iter()
            .filter(|(_, df)| **df >= config.min_document_frequency)
            .map(|(term, _)| (term.clone(), corpus_count.get(term).copied().unwrap_or(0)))
            .collect();

        if kept.len() > config.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(config.max_features);
        }

        let mut features: Vec<String> = kept.into_iter().map(|(term, _)| term).collect();
        features.sort();

        let n = documents.len() as f64;
        let idf = features
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let index = features
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self {
            features,
            index,
            idf,
            max_ngram,
        }
    }

    /// Projects a normalized document into the fitted space.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in extract_terms(document, self.max_ngram) {
            if let Some(&i) = self.index.get(&term) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();
        vector.sort_by_key(|(i, _)| *i);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.features.get(index).map(String::as_str)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Unigrams followed by higher-order n-grams over whitespace tokens.
fn extract_terms(document: &str, max_ngram: usize) -> Vec<String> {
    let tokens: Vec<&str> = document.split_whitespace().collect();
    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for n in 2..=max_ngram {
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    terms
}

/// Elementwise products of two sparse vectors over their shared features,
/// ascending by feature index.
pub fn term_products(a: &SparseVector, b: &SparseVector) -> Vec<(usize, f64)> {
    let mut products = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                products.push((a[i].0, a[i].1 * b[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    products
}

/// Cosine similarity clamped to `[0, 1]`; zero when either vector is all-zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = term_products(a, b).iter().map(|(_, p)| p).sum();
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn feature_names(model: &TfIdfModel) -> Vec<&str> {
        (0..model.vocabulary_len())
            .filter_map(|i| model.feature_name(i))
            .collect()
    }

    #[test]
    fn test_extract_terms_unigrams_and_bigrams() {
        assert_eq!(
            extract_terms("machine learning python", 2),
            vec![
                "machine",
                "learning",
                "python",
                "machine learning",
                "learning python"
            ]
        );
        assert_eq!(extract_terms("", 2), Vec::<String>::new());
    }

    #[test]
    fn test_min_document_frequency_filters_singletons() {
        let corpus = docs(&["python flask sql", "photoshop illustrator", "python flask"]);
        let model = TfIdfModel::fit(&corpus, &VectorSpaceConfig::default());
        assert_eq!(feature_names(&model), vec!["flask", "python", "python flask"]);
    }

    #[test]
    fn test_vocabulary_is_empty_when_nothing_repeats() {
        let corpus = docs(&["alpha beta", "gamma delta", "epsilon"]);
        let model = TfIdfModel::fit(&corpus, &VectorSpaceConfig::default());
        assert!(model.is_empty());
        assert!(model.transform("alpha beta").is_empty());
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let corpus = docs(&["rust rust rust go", "rust go java", "java go"]);
        let config = VectorSpaceConfig {
            min_document_frequency: 2,
            max_features: 2,
            max_ngram: 1,
        };
        let model = TfIdfModel::fit(&corpus, &config);
        // counts: rust 4, go 3, java 2
        assert_eq!(feature_names(&model), vec!["go", "rust"]);
    }

    #[test]
    fn test_smoothed_idf_values() {
        let corpus = docs(&["python sql", "python", "sql java", "java"]);
        let config = VectorSpaceConfig {
            min_document_frequency: 1,
            max_features: 10,
            max_ngram: 1,
        };
        let model = TfIdfModel::fit(&corpus, &config);
        // python: df 2 of 4 docs
        let python = model.index["python"];
        let expected = (5.0_f64 / 3.0).ln() + 1.0;
        assert!((model.idf[python] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let corpus = docs(&["python flask sql", "python flask", "sql python"]);
        let model = TfIdfModel::fit(&corpus, &VectorSpaceConfig::default());
        let v = model.transform("python flask sql");
        let norm: f64 = v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(v.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_cosine_identical_and_disjoint() {
        let a: SparseVector = vec![(0, 0.6), (2, 0.8)];
        let b: SparseVector = vec![(1, 1.0)];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a: SparseVector = vec![(0, 1.0)];
        assert_eq!(cosine_similarity(&a, &Vec::new()), 0.0);
        assert_eq!(cosine_similarity(&Vec::new(), &Vec::new()), 0.0);
    }

    #[test]
    fn test_term_products_only_shared_features() {
        let a: SparseVector = vec![(0, 0.5), (3, 0.5), (7, 0.7)];
        let b: SparseVector = vec![(3, 0.4), (5, 0.9), (7, 0.1)];
        let products = term_products(&a, &b);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].0, 3);
        assert!((products[0].1 - 0.2).abs() < 1e-12);
        assert_eq!(products[1].0, 7);
    }
}
