//! Ranking Engine — blends TF-IDF similarity with posting signals and explains each result.
//!
//! Two paths:
//! 1. Normalized query is empty → signal-only fallback score, fixed explanation.
//! 2. Otherwise → fit a TF-IDF space over all candidate documents plus the
//!    query, score `0.55·sim + 0.15·popularity + 0.15·stipend + 0.10·rating +
//!    0.05·prestige` (each signal scaled to `[0, 1]`), and explain with the top
//!    contributing terms.
//!
//! `rank` never fails. Randomness is only used to order exact score ties and
//! comes from the caller's `Rng`, so a seeded generator makes ranking fully
//! deterministic.

use rand::Rng;
use tracing::debug;

use crate::matching::explain::{
    build_explanation, top_contributing_terms, EXPLAIN_TOP_TERMS, FALLBACK_EXPLANATION,
};
use crate::matching::normalizer::normalize;
use crate::matching::vector_space::{cosine_similarity, TfIdfModel, VectorSpaceConfig};
use crate::models::posting::CandidateRecord;

const POPULARITY_SCALE: f64 = 100.0;
const RATING_SCALE: f64 = 5.0;
const PRESTIGE_SCALE: f64 = 10.0;

/// The candidate's profile text plus optional stated interests.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub resume_text: String,
    pub interests: String,
}

impl MatchQuery {
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            interests: String::new(),
        }
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    fn raw_text(&self) -> String {
        format!("{} {}", self.resume_text, self.interests)
    }
}

/// Weights for the similarity path.
#[derive(Debug, Clone)]
pub struct BlendWeights {
    pub similarity: f64,
    pub popularity: f64,
    pub stipend: f64,
    pub rating: f64,
    pub prestige: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            similarity: 0.55,
            popularity: 0.15,
            stipend: 0.15,
            rating: 0.10,
            prestige: 0.05,
        }
    }
}

/// Weights for the signal-only path used when the query has no usable text.
#[derive(Debug, Clone)]
pub struct FallbackWeights {
    pub popularity: f64,
    pub rating: f64,
    pub prestige: f64,
}

impl Default for FallbackWeights {
    fn default() -> Self {
        Self {
            popularity: 0.5,
            rating: 0.3,
            prestige: 0.2,
        }
    }
}

/// One entry of the shortlist. Borrows the posting from the caller's slice.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult<'a> {
    pub score: f64,
    pub posting: &'a CandidateRecord,
    pub explanation: String,
}

#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    pub blend: BlendWeights,
    pub fallback: FallbackWeights,
    pub vector_space: VectorSpaceConfig,
}

impl RankingEngine {
    /// Ranks `candidates` against `query` and returns at most `top_n` results,
    /// best first. `top_n` below 1 is treated as 1.
    pub fn rank<'a, R: Rng>(
        &self,
        query: &MatchQuery,
        candidates: &'a [CandidateRecord],
        top_n: usize,
        rng: &mut R,
    ) -> Vec<RankedResult<'a>> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let top_n = top_n.max(1);

        let normalized_query = normalize(&query.raw_text());
        if normalized_query.trim().is_empty() {
            debug!("Query has no usable terms; ranking by posting signals only");
            return self.rank_by_signals(candidates, top_n);
        }

        self.rank_by_similarity(&normalized_query, candidates, top_n, rng)
    }

    fn rank_by_signals<'a>(
        &self,
        candidates: &'a [CandidateRecord],
        top_n: usize,
    ) -> Vec<RankedResult<'a>> {
        let w = &self.fallback;
        let mut results: Vec<RankedResult<'a>> = candidates
            .iter()
            .map(|posting| RankedResult {
                score: w.popularity * scaled(posting.popularity, POPULARITY_SCALE)
                    + w.rating * scaled(posting.rating, RATING_SCALE)
                    + w.prestige * scaled(posting.company_prestige, PRESTIGE_SCALE),
                posting,
                explanation: FALLBACK_EXPLANATION.to_string(),
            })
            .collect();

        // Stable: equal scores keep catalog order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_n);
        results
    }

    fn rank_by_similarity<'a, R: Rng>(
        &self,
        normalized_query: &str,
        candidates: &'a [CandidateRecord],
        top_n: usize,
        rng: &mut R,
    ) -> Vec<RankedResult<'a>> {
        let mut corpus: Vec<String> = candidates
            .iter()
            .map(|posting| normalize(&posting.document_text()))
            .collect();
        corpus.push(normalized_query.to_string());

        let model = TfIdfModel::fit(&corpus, &self.vector_space);
        debug!(
            candidates = candidates.len(),
            vocabulary = model.vocabulary_len(),
            "Fitted vector space"
        );
        if model.is_empty() {
            debug!(
                candidates = candidates.len(),
                "Empty vocabulary after document-frequency filter; similarity is zero"
            );
        }
        let query_vec = model.transform(normalized_query);

        let max_stipend = candidates
            .iter()
            .map(|posting| finite_or_zero(posting.stipend))
            .fold(0.0_f64, f64::max);
        let max_stipend = if max_stipend > 0.0 { max_stipend } else { 1.0 };

        let w = &self.blend;
        let mut scored: Vec<(RankedResult<'a>, u64)> = candidates
            .iter()
            .zip(&corpus)
            .map(|(posting, document)| {
                let doc_vec = model.transform(document);
                let sim = cosine_similarity(&query_vec, &doc_vec);
                let stipend_share = (finite_or_zero(posting.stipend) / max_stipend).clamp(0.0, 1.0);

                let score = w.similarity * sim
                    + w.popularity * scaled(posting.popularity, POPULARITY_SCALE)
                    + w.stipend * stipend_share
                    + w.rating * scaled(posting.rating, RATING_SCALE)
                    + w.prestige * scaled(posting.company_prestige, PRESTIGE_SCALE);

                let terms = top_contributing_terms(&model, &query_vec, &doc_vec, EXPLAIN_TOP_TERMS);
                let explanation = build_explanation(sim, &terms, posting);

                (
                    RankedResult {
                        score,
                        posting,
                        explanation,
                    },
                    rng.gen::<u64>(),
                )
            })
            .collect();

        scored.sort_by(|(a, a_tie), (b, b_tie)| {
            b.score.total_cmp(&a.score).then_with(|| b_tie.cmp(a_tie))
        });

        scored
            .into_iter()
            .take(top_n)
            .map(|(result, _)| result)
            .collect()
    }
}

fn scaled(value: f64, scale: f64) -> f64 {
    finite_or_zero(value) / scale
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
